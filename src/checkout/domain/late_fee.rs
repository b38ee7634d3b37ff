use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Fees never exceed this amount for a single borrow, however late the return.
pub const MAX_LATE_FEE: f64 = 15.0;

const FIRST_TIER_DAYS: i64 = 7;
const FIRST_TIER_RATE: f64 = 0.5;
const SECOND_TIER_DAYS: i64 = 18;
const SECOND_TIER_RATE: f64 = 1.0;

/// Late fee owed for a book returned `days_overdue` days after its due date.
///
/// The first week is charged at $0.50 per day, every following day at $1.00, and the total
/// is capped at [`MAX_LATE_FEE`] once more than 18 days have passed.
pub fn late_fee_for_days(days_overdue: i64) -> f64 {
    if days_overdue <= 0 {
        0.0
    } else if days_overdue <= FIRST_TIER_DAYS {
        days_overdue as f64 * FIRST_TIER_RATE
    } else if days_overdue <= SECOND_TIER_DAYS {
        FIRST_TIER_DAYS as f64 * FIRST_TIER_RATE + (days_overdue - FIRST_TIER_DAYS) as f64 * SECOND_TIER_RATE
    } else {
        MAX_LATE_FEE
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FeeStatus {
    InvalidPatron,
    BookNotFound,
    NotBorrowed,
    OnTime,
    Overdue(i64),
}

impl Display for FeeStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FeeStatus::InvalidPatron => write!(f, "Patron ID must be 6 digits"),
            FeeStatus::BookNotFound => write!(f, "Book does not exist or is not available"),
            FeeStatus::NotBorrowed => write!(f, "Book not borrowed by this user"),
            FeeStatus::OnTime => write!(f, "Book returned before due date - no late fee applied"),
            FeeStatus::Overdue(days) => write!(f, "Book returned {} days after the due date", days),
        }
    }
}

// serialized as the patron-facing text
impl Serialize for FeeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// LateFee is computed on demand and never persisted
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct LateFee {
    pub fee_amount: f64,
    pub days_overdue: i64,
    pub status: FeeStatus,
}

impl LateFee {
    pub fn none(status: FeeStatus) -> Self {
        LateFee { fee_amount: 0.0, days_overdue: 0, status }
    }

    pub fn overdue(days_overdue: i64) -> Self {
        LateFee {
            fee_amount: late_fee_for_days(days_overdue),
            days_overdue,
            status: FeeStatus::Overdue(days_overdue),
        }
    }

    // Days are counted between calendar dates so a return later on the due date costs nothing.
    pub fn accrued(due_date: NaiveDateTime, now: NaiveDateTime) -> Self {
        if now <= due_date {
            return LateFee::none(FeeStatus::OnTime);
        }
        let days_overdue = (now.date() - due_date.date()).num_days();
        if days_overdue <= 0 {
            return LateFee::none(FeeStatus::OnTime);
        }
        LateFee::overdue(days_overdue)
    }

    pub fn is_owed(&self) -> bool {
        self.fee_amount > 0.0
    }
}
