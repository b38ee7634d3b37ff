use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fees::domain::FeeService;

pub struct RefundFeeCommand {
    fee_service: Box<dyn FeeService>,
}

impl RefundFeeCommand {
    pub fn new(fee_service: Box<dyn FeeService>) -> Self {
        Self {
            fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefundFeeCommandRequest {
    pub transaction_id: String,
    pub amount: f64,
}

impl RefundFeeCommandRequest {
    pub fn new(transaction_id: &str, amount: f64) -> Self {
        Self {
            transaction_id: transaction_id.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefundFeeCommandResponse {
    pub message: String,
}

#[async_trait]
impl Command<RefundFeeCommandRequest, RefundFeeCommandResponse> for RefundFeeCommand {
    async fn execute(&self, req: RefundFeeCommandRequest) -> Result<RefundFeeCommandResponse, CommandError> {
        self.fee_service.refund_late_fee_payment(req.transaction_id.as_str(), req.amount)
            .await.map_err(CommandError::from)
            .map(|outcome| RefundFeeCommandResponse { message: outcome.message })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, system_clock};
    use crate::core::repository::RepositoryStore;
    use crate::fees::command::refund_fee_cmd::{RefundFeeCommand, RefundFeeCommandRequest};
    use crate::fees::factory::create_fee_service;
    use crate::gateway::factory::create_payment_gateway;
    use crate::utils::sql::build_initialized_client;

    #[tokio::test]
    async fn test_should_run_refund_fee() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let cmd = RefundFeeCommand::new(create_fee_service(
            &Configuration::new("test"), &client, system_clock(), create_payment_gateway(system_clock())));
        let res = cmd.execute(RefundFeeCommandRequest::new("txn_123456_1", 4.5)).await.expect("should refund");
        assert!(res.message.starts_with("Refund of $4.50 processed successfully. Refund ID: refund_txn_123456_1_"));

        let err = cmd.execute(RefundFeeCommandRequest::new("txn_123456_1", 20.0)).await.expect_err("should reject");
        assert!(matches!(err, CommandError::Access { .. }));
    }
}
