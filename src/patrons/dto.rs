use serde::{Deserialize, Serialize};
use crate::checkout::dto::{BorrowedBook, CheckoutDto};
use crate::core::library::PatronStanding;

// PatronStatusReport summarizes what a patron holds, owes and has returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatronStatusReport {
    pub patron_id: String,
    pub currently_borrowed: Vec<BorrowedBook>,
    pub owed_late_fees: f64,
    pub current_borrow_count: i64,
    pub borrow_history: Vec<CheckoutDto>,
    pub status: PatronStanding,
}

impl PatronStatusReport {
    pub fn empty(patron_id: &str) -> Self {
        PatronStatusReport {
            patron_id: patron_id.to_string(),
            currently_borrowed: vec![],
            owed_late_fees: 0.0,
            current_borrow_count: 0,
            borrow_history: vec![],
            status: PatronStanding::NoIssues,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::PatronStanding;
    use crate::patrons::dto::PatronStatusReport;

    #[tokio::test]
    async fn test_should_build_empty_report() {
        let report = PatronStatusReport::empty("123456");
        assert_eq!("123456", report.patron_id.as_str());
        assert_eq!(0, report.current_borrow_count);
        assert_eq!(0.0, report.owed_late_fees);
        assert_eq!(PatronStanding::NoIssues, report.status);
    }
}
