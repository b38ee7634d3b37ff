use std::sync::Arc;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::info;
use crate::core::domain::Clock;
use crate::core::library::LibraryResult;
use crate::gateway::payment::{PaymentGateway, PaymentResult, RefundResult, TransactionState, TransactionStatus};
use crate::utils::validation::is_valid_patron_id;

const TRANSACTION_PREFIX: &str = "txn_";
const MAX_PAYMENT: f64 = 1000.0;
// every verified transaction reports this amount
const VERIFIED_AMOUNT: f64 = 10.50;

/// SimulatedPaymentGateway approves anything that passes its input checks, transaction ids
/// are derived from the patron and the clock.
pub struct SimulatedPaymentGateway {
    clock: Arc<dyn Clock>,
}

impl SimulatedPaymentGateway {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
        }
    }

    fn timestamp(&self) -> i64 {
        Utc.from_utc_datetime(&self.clock.now()).timestamp()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self, patron_id: &str, amount: f64, description: &str) -> LibraryResult<PaymentResult> {
        if amount <= 0.0 {
            return Ok(PaymentResult::declined("Invalid amount: must be greater than 0"));
        }
        if amount > MAX_PAYMENT {
            return Ok(PaymentResult::declined("Payment declined: amount exceeds limit"));
        }
        if !is_valid_patron_id(patron_id) {
            return Ok(PaymentResult::declined("Invalid patron ID format"));
        }
        let transaction_id = format!("{}{}_{}", TRANSACTION_PREFIX, patron_id, self.timestamp());
        info!("charged {:.2} to {} for {}", amount, patron_id, description);
        Ok(PaymentResult::approved(transaction_id.as_str(),
                                   format!("Payment of ${:.2} processed successfully", amount).as_str()))
    }

    async fn refund_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<RefundResult> {
        if !transaction_id.starts_with(TRANSACTION_PREFIX) {
            return Ok(RefundResult::declined("Invalid transaction ID"));
        }
        if amount <= 0.0 {
            return Ok(RefundResult::declined("Invalid refund amount"));
        }
        let refund_id = format!("refund_{}_{}", transaction_id, self.timestamp());
        Ok(RefundResult::approved(
            format!("Refund of ${:.2} processed successfully. Refund ID: {}", amount, refund_id).as_str()))
    }

    async fn verify_payment_status(&self, transaction_id: &str) -> LibraryResult<TransactionStatus> {
        if !transaction_id.starts_with(TRANSACTION_PREFIX) {
            return Ok(TransactionStatus {
                transaction_id: None,
                status: TransactionState::NotFound,
                amount: None,
                message: "Transaction not found".to_string(),
            });
        }
        Ok(TransactionStatus {
            transaction_id: Some(transaction_id.to_string()),
            status: TransactionState::Completed,
            amount: Some(VERIFIED_AMOUNT),
            message: "Transaction completed successfully".to_string(),
        })
    }
}
