use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fees::domain::FeeService;

pub struct PayFeesCommand {
    fee_service: Box<dyn FeeService>,
}

impl PayFeesCommand {
    pub fn new(fee_service: Box<dyn FeeService>) -> Self {
        Self {
            fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PayFeesCommandRequest {
    pub patron_id: String,
    pub book_id: String,
}

impl PayFeesCommandRequest {
    pub fn new(patron_id: &str, book_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayFeesCommandResponse {
    pub transaction_id: String,
    pub message: String,
}

#[async_trait]
impl Command<PayFeesCommandRequest, PayFeesCommandResponse> for PayFeesCommand {
    async fn execute(&self, req: PayFeesCommandRequest) -> Result<PayFeesCommandResponse, CommandError> {
        self.fee_service.pay_late_fees(req.patron_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from)
            .map(|outcome| PayFeesCommandResponse { transaction_id: outcome.value, message: outcome.message })
    }
}
