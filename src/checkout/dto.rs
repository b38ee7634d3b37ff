use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::late_fee::LateFee;
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::library::CheckoutStatus;
use crate::utils::date::{opt_serializer, serializer};


// CheckoutDto abstracts the borrow record of a book by a patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
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

impl CheckoutDto {
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.return_date.is_none() && now > self.due_date
    }
}

impl From<&CheckoutEntity> for CheckoutDto {
    fn from(other: &CheckoutEntity) -> CheckoutDto {
        CheckoutDto {
            checkout_id: other.checkout_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id.to_string(),
            checkout_status: other.checkout_status,
            borrow_date: other.borrow_date,
            due_date: other.due_date,
            return_date: other.return_date,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&CheckoutDto> for CheckoutEntity {
    fn from(other: &CheckoutDto) -> CheckoutEntity {
        CheckoutEntity {
            checkout_id: other.checkout_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id.to_string(),
            checkout_status: other.checkout_status,
            borrow_date: other.borrow_date,
            due_date: other.due_date,
            return_date: other.return_date,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// BorrowedBook is the read model of an open borrow joined with its catalog entry.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowedBook {
    pub checkout_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
    pub is_overdue: bool,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ReturnedBook {
    pub record: CheckoutDto,
    pub late_fee: LateFee,
}
