use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::late_fee::LateFee;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub struct ReturnBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    pub patron_id: String,
    pub book_id: String,
}

impl ReturnBookCommandRequest {
    pub fn new(patron_id: String, book_id: String) -> Self {
        Self {
            patron_id,
            book_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub checkout: CheckoutDto,
    pub late_fee: LateFee,
    pub message: String,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let outcome = self.checkout_service.return_book_by_patron(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from)?;
        Ok(ReturnBookCommandResponse {
            checkout: outcome.value.record,
            late_fee: outcome.value.late_fee,
            message: outcome.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, NaiveDate};
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, FixedClock};
    use crate::core::repository::RepositoryStore;
    use crate::utils::sql::build_initialized_client;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let config = Configuration::new("test");
        let borrowed_at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let book = create_catalog_service(&config, &client)
            .add_book_to_catalog("test book", "author", "9780306406157", 1).await.expect("should add book").value;

        let borrow_cmd = BorrowBookCommand::new(
            create_checkout_service(&config, &client, Arc::new(FixedClock::new(borrowed_at))));
        let return_cmd = ReturnBookCommand::new(
            create_checkout_service(&config, &client, Arc::new(FixedClock::new(borrowed_at + Duration::days(17)))));

        let err = return_cmd.execute(ReturnBookCommandRequest::new("123456".to_string(), book.book_id.to_string()))
            .await.expect_err("should not be borrowed");
        assert!(matches!(err, CommandError::NotFound { .. }));

        let _ = borrow_cmd.execute(BorrowBookCommandRequest::new("123456".to_string(), book.book_id.to_string()))
            .await.expect("should borrow book");
        let res = return_cmd.execute(ReturnBookCommandRequest::new("123456".to_string(), book.book_id.to_string()))
            .await.expect("should return book");
        assert_eq!(3, res.late_fee.days_overdue);
        assert_eq!(1.5, res.late_fee.fee_amount);
        assert_eq!("Successfully returned \"test book\". Late fee: $1.50 (3 days overdue).", res.message.as_str());
    }
}
