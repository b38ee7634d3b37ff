use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

/// Outcome of a charge, a declined charge has no transaction id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub message: String,
}

impl PaymentResult {
    pub fn approved(transaction_id: &str, message: &str) -> Self {
        PaymentResult { success: true, transaction_id: Some(transaction_id.to_string()), message: message.to_string() }
    }

    pub fn declined(message: &str) -> Self {
        PaymentResult { success: false, transaction_id: None, message: message.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundResult {
    pub success: bool,
    pub message: String,
}

impl RefundResult {
    pub fn approved(message: &str) -> Self {
        RefundResult { success: true, message: message.to_string() }
    }

    pub fn declined(message: &str) -> Self {
        RefundResult { success: false, message: message.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Completed,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub status: TransactionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub message: String,
}

// PaymentGateway abstracts the external card processor. Declines are reported through the
// result values, an Err means the processor itself could not be reached or misbehaved.
#[async_trait]
pub trait PaymentGateway: Sync + Send {
    async fn process_payment(&self, patron_id: &str, amount: f64, description: &str) -> LibraryResult<PaymentResult>;
    async fn refund_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<RefundResult>;
    async fn verify_payment_status(&self, transaction_id: &str) -> LibraryResult<TransactionStatus>;
}

#[cfg(test)]
mod tests {
    use crate::gateway::payment::{TransactionState, TransactionStatus};

    #[tokio::test]
    async fn test_should_serialize_transaction_status() {
        let status = TransactionStatus {
            transaction_id: None,
            status: TransactionState::NotFound,
            amount: None,
            message: "Transaction not found".to_string(),
        };
        let json = serde_json::to_value(&status).expect("should serialize");
        assert_eq!(serde_json::json!({"status": "not_found", "message": "Transaction not found"}), json);
    }
}
