use async_trait::async_trait;
use tracing::{info, warn};
use crate::catalog::domain::CatalogService;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::late_fee::MAX_LATE_FEE;
use crate::core::library::{LibraryError, LibraryResult, Outcome};
use crate::fees::domain::FeeService;
use crate::gateway::payment::{PaymentGateway, TransactionStatus};
use crate::utils::validation::validate_patron_id;

const TRANSACTION_PREFIX: &str = "txn_";

pub(crate) struct FeeServiceImpl {
    checkout_service: Box<dyn CheckoutService>,
    catalog_service: Box<dyn CatalogService>,
    payment_gateway: Box<dyn PaymentGateway>,
}

impl FeeServiceImpl {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>, catalog_service: Box<dyn CatalogService>,
                      payment_gateway: Box<dyn PaymentGateway>) -> Self {
        Self {
            checkout_service,
            catalog_service,
            payment_gateway,
        }
    }
}

#[async_trait]
impl FeeService for FeeServiceImpl {
    async fn pay_late_fees(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<String>> {
        validate_patron_id(patron_id)?;
        let late_fee = self.checkout_service.calculate_late_fee_for_book(patron_id, book_id).await?;
        if !late_fee.is_owed() {
            return Err(LibraryError::validation("No late fees to pay for this book.", Some("400".to_string())));
        }
        let book = self.catalog_service.find_book_by_id(book_id).await?;

        let description = format!("Late fees for '{}'", book.title);
        match self.payment_gateway.process_payment(patron_id, late_fee.fee_amount, description.as_str()).await {
            Ok(res) if res.success => {
                let transaction_id = res.transaction_id.unwrap_or_default();
                info!("patron {} paid {:.2} for {} in {}", patron_id, late_fee.fee_amount, book_id, transaction_id);
                Ok(Outcome::new(transaction_id, format!("Payment successful! {}", res.message)))
            }
            Ok(res) => {
                warn!("payment by {} declined: {}", patron_id, res.message);
                Err(LibraryError::payment(format!("Payment failed: {}", res.message).as_str(), None))
            }
            Err(err) => {
                warn!("payment by {} could not be processed: {}", patron_id, err);
                Err(LibraryError::payment(format!("Payment processing error: {}", err).as_str(), None))
            }
        }
    }

    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<Outcome<()>> {
        if !transaction_id.starts_with(TRANSACTION_PREFIX) {
            return Err(LibraryError::validation("Invalid transaction ID.", Some("400".to_string())));
        }
        if amount <= 0.0 {
            return Err(LibraryError::validation("Refund amount must be greater than 0.", Some("400".to_string())));
        }
        if amount > MAX_LATE_FEE {
            return Err(LibraryError::not_granted("Refund amount exceeds maximum late fee.", Some("403".to_string())));
        }

        match self.payment_gateway.refund_payment(transaction_id, amount).await {
            Ok(res) if res.success => {
                info!("refunded {:.2} of {}", amount, transaction_id);
                Ok(Outcome::new((), res.message))
            }
            Ok(res) => {
                warn!("refund of {} declined: {}", transaction_id, res.message);
                Err(LibraryError::payment(format!("Refund failed: {}", res.message).as_str(), None))
            }
            Err(err) => {
                warn!("refund of {} could not be processed: {}", transaction_id, err);
                Err(LibraryError::payment(format!("Refund processing error: {}", err).as_str(), None))
            }
        }
    }

    async fn verify_payment(&self, transaction_id: &str) -> LibraryResult<TransactionStatus> {
        self.payment_gateway.verify_payment_status(transaction_id).await
            .map_err(|err| LibraryError::payment(format!("Verification processing error: {}", err).as_str(), None))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::factory::create_checkout_service;
    use crate::core::domain::{Configuration, FixedClock};
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;
    use crate::fees::domain::FeeService;
    use crate::fees::factory::create_fee_service;
    use crate::gateway::payment::{PaymentGateway, PaymentResult, RefundResult, TransactionState, TransactionStatus};
    use crate::utils::sql::{build_initialized_client, DbClient};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum GatewayCall {
        Payment(String, f64, String),
        Refund(String, f64),
    }

    // Fake processor answering with a canned reply and remembering what it was asked.
    pub(crate) struct RecordingGateway {
        pub(crate) reply: Option<bool>,
        pub(crate) calls: Arc<Mutex<Vec<GatewayCall>>>,
    }

    impl RecordingGateway {
        pub(crate) fn new(reply: Option<bool>) -> (Self, Arc<Mutex<Vec<GatewayCall>>>) {
            let calls = Arc::new(Mutex::new(vec![]));
            (RecordingGateway { reply, calls: calls.clone() }, calls)
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn process_payment(&self, patron_id: &str, amount: f64, description: &str) -> LibraryResult<PaymentResult> {
            self.calls.lock().unwrap().push(GatewayCall::Payment(patron_id.to_string(), amount, description.to_string()));
            match self.reply {
                Some(true) => Ok(PaymentResult::approved("txn_123", "Success")),
                Some(false) => Ok(PaymentResult::declined("Insufficient funds")),
                None => Err(LibraryError::runtime("Network timeout", None)),
            }
        }

        async fn refund_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<RefundResult> {
            self.calls.lock().unwrap().push(GatewayCall::Refund(transaction_id.to_string(), amount));
            match self.reply {
                Some(true) => Ok(RefundResult::approved("Refund processed")),
                Some(false) => Ok(RefundResult::declined("Refund window closed")),
                None => Err(LibraryError::runtime("Network timeout", None)),
            }
        }

        async fn verify_payment_status(&self, transaction_id: &str) -> LibraryResult<TransactionStatus> {
            Ok(TransactionStatus {
                transaction_id: Some(transaction_id.to_string()),
                status: TransactionState::Completed,
                amount: Some(1.0),
                message: "ok".to_string(),
            })
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(11, 0, 0).unwrap()
    }

    // borrows a book on the first of the month and returns a client whose clock is `days_late` past due
    async fn overdue_book(days_late: i64) -> (DbClient, String, Arc<FixedClock>) {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let config = Configuration::new("test");
        let book = create_catalog_service(&config, &client)
            .add_book_to_catalog("Emma", "Jane Austen", "9780141439587", 1).await.expect("should add book").value;
        let _ = create_checkout_service(&config, &client, Arc::new(FixedClock::new(start())))
            .borrow_book_by_patron("123456", book.book_id.as_str()).await.expect("should borrow");
        (client, book.book_id, Arc::new(FixedClock::new(start() + Duration::days(14 + days_late))))
    }

    fn fee_service(client: &DbClient, clock: Arc<FixedClock>, gateway: RecordingGateway) -> Box<dyn FeeService> {
        create_fee_service(&Configuration::new("test"), client, clock, Box::new(gateway))
    }

    #[tokio::test]
    async fn test_should_pay_late_fees() {
        let (client, book_id, clock) = overdue_book(3).await;
        let (gateway, calls) = RecordingGateway::new(Some(true));
        let fee_svc = fee_service(&client, clock, gateway);
        let outcome = fee_svc.pay_late_fees("123456", book_id.as_str()).await.expect("should pay");
        assert_eq!("txn_123", outcome.value.as_str());
        assert_eq!("Payment successful! Success", outcome.message.as_str());
        assert_eq!(vec![GatewayCall::Payment("123456".to_string(), 1.5, "Late fees for 'Emma'".to_string())],
                   *calls.lock().unwrap());
    }

    #[tokio::test]
    async fn test_should_report_declined_payment() {
        let (client, book_id, clock) = overdue_book(10).await;
        let (gateway, calls) = RecordingGateway::new(Some(false));
        let err = fee_service(&client, clock, gateway).pay_late_fees("123456", book_id.as_str()).await
            .expect_err("should decline");
        assert!(matches!(err, LibraryError::Payment { .. }));
        assert_eq!("Payment failed: Insufficient funds", err.to_string());
        assert_eq!(1, calls.lock().unwrap().len());
    }

    #[tokio::test]
    async fn test_should_contain_gateway_fault() {
        let (client, book_id, clock) = overdue_book(30).await;
        let (gateway, calls) = RecordingGateway::new(None);
        let err = fee_service(&client, clock, gateway).pay_late_fees("123456", book_id.as_str()).await
            .expect_err("should fail");
        assert_eq!("Payment processing error: Network timeout", err.to_string());
        assert_eq!(vec![GatewayCall::Payment("123456".to_string(), 15.0, "Late fees for 'Emma'".to_string())],
                   *calls.lock().unwrap());
    }

    #[tokio::test]
    async fn test_should_not_charge_without_fees() {
        let (client, book_id, clock) = overdue_book(-2).await;
        let (gateway, calls) = RecordingGateway::new(Some(true));
        let fee_svc = fee_service(&client, clock, gateway);
        let err = fee_svc.pay_late_fees("123456", book_id.as_str()).await.expect_err("should reject");
        assert_eq!("No late fees to pay for this book.", err.to_string());
        let err = fee_svc.pay_late_fees("12345", book_id.as_str()).await.expect_err("should reject");
        assert_eq!("Invalid patron ID. Must be exactly 6 digits.", err.to_string());
        let err = fee_svc.pay_late_fees("123456", "missing").await.expect_err("should reject");
        assert_eq!("No late fees to pay for this book.", err.to_string());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_should_refund_payment() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let (gateway, calls) = RecordingGateway::new(Some(true));
        let fee_svc = fee_service(&client, Arc::new(FixedClock::new(start())), gateway);
        let outcome = fee_svc.refund_late_fee_payment("txn_123", 5.0).await.expect("should refund");
        assert_eq!("Refund processed", outcome.message.as_str());
        assert_eq!(vec![GatewayCall::Refund("txn_123".to_string(), 5.0)], *calls.lock().unwrap());

        let status = fee_svc.verify_payment("txn_123").await.expect("should verify");
        assert_eq!(TransactionState::Completed, status.status);
    }

    #[tokio::test]
    async fn test_should_validate_refund_before_gateway() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let (gateway, calls) = RecordingGateway::new(Some(true));
        let fee_svc = fee_service(&client, Arc::new(FixedClock::new(start())), gateway);
        let err = fee_svc.refund_late_fee_payment("", 5.0).await.expect_err("should reject");
        assert_eq!("Invalid transaction ID.", err.to_string());
        let err = fee_svc.refund_late_fee_payment("abc_123", 5.0).await.expect_err("should reject");
        assert_eq!("Invalid transaction ID.", err.to_string());
        let err = fee_svc.refund_late_fee_payment("txn_123", 0.0).await.expect_err("should reject");
        assert_eq!("Refund amount must be greater than 0.", err.to_string());
        let err = fee_svc.refund_late_fee_payment("txn_123", 15.01).await.expect_err("should reject");
        assert!(matches!(err, LibraryError::NotGranted { .. }));
        assert_eq!("Refund amount exceeds maximum late fee.", err.to_string());
        assert!(calls.lock().unwrap().is_empty());
        let _ = fee_svc.refund_late_fee_payment("txn_123", 15.0).await.expect("should refund the maximum");
    }

    #[tokio::test]
    async fn test_should_report_refund_failures() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let (declining, _) = RecordingGateway::new(Some(false));
        let err = fee_service(&client, Arc::new(FixedClock::new(start())), declining)
            .refund_late_fee_payment("txn_123", 5.0).await.expect_err("should decline");
        assert_eq!("Refund failed: Refund window closed", err.to_string());
        let (faulty, _) = RecordingGateway::new(None);
        let err = fee_service(&client, Arc::new(FixedClock::new(start())), faulty)
            .refund_late_fee_payment("txn_123", 5.0).await.expect_err("should fail");
        assert_eq!("Refund processing error: Network timeout", err.to_string());
    }
}
