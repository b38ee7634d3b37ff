use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::CheckoutStatus;
use crate::utils::date::{opt_serializer, serializer};

// CheckoutEntity abstracts a borrow record, it is created on borrow and closed by setting
// the return date, records are never deleted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CheckoutEntity {
    pub checkout_id: String,
    pub version: i64,
    pub branch_id: String,
    pub patron_id: String,
    pub book_id: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub return_date: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutEntity {
    pub fn new(branch_id: &str, patron_id: &str, book_id: &str,
               borrow_date: NaiveDateTime, loan_days: i64) -> Self {
        Self {
            checkout_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            patron_id: patron_id.to_string(),
            book_id: book_id.to_string(),
            checkout_status: CheckoutStatus::CheckedOut,
            borrow_date,
            due_date: borrow_date + Duration::days(loan_days),
            return_date: None,
            created_at: borrow_date,
            updated_at: borrow_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::core::library::CheckoutStatus;

    #[tokio::test]
    async fn test_should_build_checkout() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let checkout = CheckoutEntity::new("main", "123456", "book1", at, 14);
        assert_eq!("book1", checkout.book_id.as_str());
        assert_eq!("123456", checkout.patron_id.as_str());
        assert_eq!(CheckoutStatus::CheckedOut, checkout.checkout_status);
        assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), checkout.due_date.date());
        assert_eq!(None, checkout.return_date);
    }
}
