use std::sync::Arc;
use async_trait::async_trait;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::late_fee::LateFee;
use crate::core::domain::{Clock, Configuration};
use crate::core::library::{LibraryResult, PatronStanding};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronStatusReport;
use crate::utils::validation::is_valid_patron_id;

pub(crate) struct PatronServiceImpl {
    max_borrowed_books: i64,
    clock: Arc<dyn Clock>,
    checkout_service: Box<dyn CheckoutService>,
}

impl PatronServiceImpl {
    pub(crate) fn new(config: &Configuration, clock: Arc<dyn Clock>,
                      checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            max_borrowed_books: config.max_borrowed_books,
            clock,
            checkout_service,
        }
    }

    fn standing(&self, borrow_count: i64, owed_late_fees: f64) -> PatronStanding {
        if borrow_count >= self.max_borrowed_books {
            PatronStanding::BorrowLimitReached
        } else if owed_late_fees > 0.0 {
            PatronStanding::OutstandingFees
        } else {
            PatronStanding::NoIssues
        }
    }
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn get_patron_status_report(&self, patron_id: &str) -> LibraryResult<Option<PatronStatusReport>> {
        if !is_valid_patron_id(patron_id) {
            return Ok(None);
        }
        let mut report = PatronStatusReport::empty(patron_id);
        report.currently_borrowed = self.checkout_service.find_borrowed_books(patron_id).await?;
        report.borrow_history = self.checkout_service.find_borrow_history(patron_id).await?;
        report.current_borrow_count = report.currently_borrowed.len() as i64;
        let now = self.clock.now();
        report.owed_late_fees = report.currently_borrowed.iter()
            .map(|borrowed| LateFee::accrued(borrowed.due_date, now).fee_amount)
            .sum();
        report.status = self.standing(report.current_borrow_count, report.owed_late_fees);
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::factory::create_checkout_service;
    use crate::core::domain::{Configuration, FixedClock};
    use crate::core::library::PatronStanding;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::factory;
    use crate::utils::sql::{build_initialized_client, DbClient};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap()
    }

    async fn borrow_books(client: &DbClient, patron_id: &str, count: i64) -> Vec<String> {
        let config = Configuration::new("test");
        let catalog_svc = create_catalog_service(&config, client);
        let checkout_svc = create_checkout_service(&config, client, Arc::new(FixedClock::new(start())));
        let mut ids = vec![];
        for i in 0..count {
            let book = catalog_svc.add_book_to_catalog(format!("Book {}", i).as_str(), "Author",
                                                       format!("{:013}", 9782000000000i64 + i).as_str(), 2)
                .await.expect("should add book").value;
            let _ = checkout_svc.borrow_book_by_patron(patron_id, book.book_id.as_str()).await.expect("should borrow");
            ids.push(book.book_id);
        }
        ids
    }

    #[tokio::test]
    async fn test_should_skip_malformed_patron() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let patron_svc = factory::create_patron_service(&Configuration::new("test"), &client,
                                                        Arc::new(FixedClock::new(start())));
        assert_eq!(None, patron_svc.get_patron_status_report("12ab56").await.expect("should report"));
        assert_eq!(None, patron_svc.get_patron_status_report("").await.expect("should report"));
    }

    #[tokio::test]
    async fn test_should_report_patron_without_borrows() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let patron_svc = factory::create_patron_service(&Configuration::new("test"), &client,
                                                        Arc::new(FixedClock::new(start())));
        let report = patron_svc.get_patron_status_report("123456").await.expect("should report").expect("should have report");
        assert_eq!(0, report.current_borrow_count);
        assert_eq!(0.0, report.owed_late_fees);
        assert!(report.currently_borrowed.is_empty());
        assert_eq!(PatronStanding::NoIssues, report.status);
    }

    #[tokio::test]
    async fn test_should_report_outstanding_fees() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let ids = borrow_books(&client, "123456", 2).await;
        let later = Arc::new(FixedClock::new(start() + Duration::days(14 + 3)));
        let config = Configuration::new("test");
        let _ = create_checkout_service(&config, &client, later.clone())
            .return_book_by_patron("123456", ids[0].as_str()).await.expect("should return");

        let patron_svc = factory::create_patron_service(&config, &client, later);
        let report = patron_svc.get_patron_status_report("123456").await.expect("should report").expect("should have report");
        assert_eq!(1, report.current_borrow_count);
        assert_eq!("Book 1", report.currently_borrowed[0].title.as_str());
        assert!(report.currently_borrowed[0].is_overdue);
        assert_eq!(1.5, report.owed_late_fees);
        assert_eq!(1, report.borrow_history.len());
        assert_eq!(ids[0], report.borrow_history[0].book_id);
        assert_eq!(PatronStanding::OutstandingFees, report.status);
    }

    #[tokio::test]
    async fn test_should_report_borrow_limit() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let _ = borrow_books(&client, "654321", 5).await;
        let patron_svc = factory::create_patron_service(&Configuration::new("test"), &client,
                                                        Arc::new(FixedClock::new(start() + Duration::days(30))));
        let report = patron_svc.get_patron_status_report("654321").await.expect("should report").expect("should have report");
        assert_eq!(5, report.current_borrow_count);
        assert_eq!(62.5, report.owed_late_fees);
        assert_eq!(PatronStanding::BorrowLimitReached, report.status);
    }
}
