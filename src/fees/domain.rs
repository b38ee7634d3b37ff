pub mod service;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, Outcome};
use crate::gateway::payment::TransactionStatus;

#[async_trait]
pub trait FeeService: Sync + Send {
    // charges the late fee currently accrued on the borrow, the outcome carries the transaction id
    async fn pay_late_fees(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<String>>;
    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<Outcome<()>>;
    async fn verify_payment(&self, transaction_id: &str) -> LibraryResult<TransactionStatus>;
}
