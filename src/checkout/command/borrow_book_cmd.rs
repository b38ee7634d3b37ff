use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub struct BorrowBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl BorrowBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BorrowBookCommandRequest {
    pub patron_id: String,
    pub book_id: String,
}

impl BorrowBookCommandRequest {
    pub fn new(patron_id: String, book_id: String) -> Self {
        Self {
            patron_id,
            book_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct BorrowBookCommandResponse {
    pub checkout: CheckoutDto,
    pub message: String,
}

impl BorrowBookCommandResponse {
    pub fn new(checkout: CheckoutDto, message: String) -> Self {
        Self {
            checkout,
            message,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.checkout_service.borrow_book_by_patron(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(|outcome| BorrowBookCommandResponse::new(outcome.value, outcome.message))
    }
}
