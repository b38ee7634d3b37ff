use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The request was well-formed but the resource cannot serve it right now, e.g. no copies
    // of a book are left on the shelf. Retrying only helps once the state changes.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    // Failure reported by, or while talking to, the payment gateway.
    Payment {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn payment(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Payment { message: message.to_string(), reason_code }
    }

    // maps sqlite failures onto library errors, constraint violations are surfaced as duplicates
    pub fn from_sqlite(message: &str, err: &rusqlite::Error) -> LibraryError {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                LibraryError::not_found(message)
            }
            rusqlite::Error::SqliteFailure(code, _) => {
                match code.code {
                    rusqlite::ErrorCode::ConstraintViolation => {
                        LibraryError::duplicate_key(format!("{} {}", message, err).as_str())
                    }
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                        LibraryError::unavailable(format!("{} {}", message, err).as_str(),
                                                  Some(format!("{:?}", code.code)), true)
                    }
                    _ => {
                        LibraryError::database(format!("{} {}", message, err).as_str(),
                                               Some(format!("{:?}", code.code)), false)
                    }
                }
            }
            _ => LibraryError::database(format!("{} {}", message, err).as_str(), None, false),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Database { message, .. } => message,
            LibraryError::NotGranted { message, .. } => message,
            LibraryError::DuplicateKey { message } => message,
            LibraryError::NotFound { message } => message,
            LibraryError::CurrentlyUnavailable { message, .. } => message,
            LibraryError::Validation { message, .. } => message,
            LibraryError::Serialization { message } => message,
            LibraryError::Runtime { message, .. } => message,
            LibraryError::Payment { message, .. } => message,
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::NotGranted { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
            LibraryError::Payment { .. } => { false }
        }
    }
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        LibraryError::from_sqlite("sqlite error", &err)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

// The message is what callers show to patrons, so it is printed verbatim.
impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Successful outcome of a library operation along with the message meant for the patron.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn new(value: T, message: String) -> Self {
        Outcome { value, message }
    }
}

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum CheckoutStatus {
    CheckedOut,
    Returned,
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CheckoutStatus::CheckedOut => write!(f, "CheckedOut"),
            CheckoutStatus::Returned => write!(f, "Returned"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum PatronStanding {
    NoIssues,
    OutstandingFees,
    BorrowLimitReached,
}

impl Display for PatronStanding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PatronStanding::NoIssues => write!(f, "No issues"),
            PatronStanding::OutstandingFees => write!(f, "Outstanding late fees"),
            PatronStanding::BorrowLimitReached => write!(f, "Borrowing limit reached"),
        }
    }
}
