use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::late_fee::LateFee;
use crate::core::command::{Command, CommandError};

pub struct LateFeeCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl LateFeeCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LateFeeCommandRequest {
    pub patron_id: String,
    pub book_id: String,
}

impl LateFeeCommandRequest {
    pub fn new(patron_id: String, book_id: String) -> Self {
        Self {
            patron_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LateFeeCommandResponse {
    pub fee_amount: f64,
    pub days_overdue: i64,
    pub status: String,
}

impl From<LateFee> for LateFeeCommandResponse {
    fn from(other: LateFee) -> Self {
        Self {
            fee_amount: other.fee_amount,
            days_overdue: other.days_overdue,
            status: other.status.to_string(),
        }
    }
}

#[async_trait]
impl Command<LateFeeCommandRequest, LateFeeCommandResponse> for LateFeeCommand {
    async fn execute(&self, req: LateFeeCommandRequest) -> Result<LateFeeCommandResponse, CommandError> {
        self.checkout_service.calculate_late_fee_for_book(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(LateFeeCommandResponse::from)
    }
}
