use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fees::domain::FeeService;
use crate::gateway::payment::TransactionStatus;

pub struct VerifyPaymentCommand {
    fee_service: Box<dyn FeeService>,
}

impl VerifyPaymentCommand {
    pub fn new(fee_service: Box<dyn FeeService>) -> Self {
        Self {
            fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentCommandRequest {
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentCommandResponse {
    #[serde(flatten)]
    pub status: TransactionStatus,
}

#[async_trait]
impl Command<VerifyPaymentCommandRequest, VerifyPaymentCommandResponse> for VerifyPaymentCommand {
    async fn execute(&self, req: VerifyPaymentCommandRequest) -> Result<VerifyPaymentCommandResponse, CommandError> {
        self.fee_service.verify_payment(req.transaction_id.as_str())
            .await.map_err(CommandError::from)
            .map(|status| VerifyPaymentCommandResponse { status })
    }
}
