use std::env;
use std::sync::Arc;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// Clock supplies the current instant for due-date and overdue math
pub trait Clock : Sync + Send {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// FixedClock always reports the same instant, used to replay borrow histories deterministically.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

const MAX_LOAN_DAYS: i64 = 365;
const MAX_BORROW_LIMIT: i64 = 100;

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_borrowed_books: i64,
    pub book_loan_days: i64,
    pub database_path: Option<String>,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_borrowed_books: 5,
            book_loan_days: 14,
            database_path: None,
        }
    }

    // overrides defaults from LIBRARY_* environment variables, malformed or out of range numbers are ignored
    pub fn from_env(branch_id: &str) -> Self {
        let mut config = Configuration::new(branch_id);
        if let Ok(path) = env::var("LIBRARY_DB_PATH") {
            if !path.trim().is_empty() {
                config.database_path = Some(path);
            }
        }
        if let Some(max) = env_number("LIBRARY_MAX_BORROWED_BOOKS", MAX_BORROW_LIMIT) {
            config.max_borrowed_books = max;
        }
        if let Some(days) = env_number("LIBRARY_LOAN_DAYS", MAX_LOAN_DAYS) {
            config.book_loan_days = days;
        }
        config
    }
}

fn env_number(name: &str, max: i64) -> Option<i64> {
    env::var(name).ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| (1..=max).contains(n))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::domain::{Clock, Configuration, FixedClock};

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(5, config.max_borrowed_books);
        assert_eq!(14, config.book_loan_days);
        assert_eq!(None, config.database_path);
    }

    #[tokio::test]
    async fn test_should_build_config_from_env() {
        std::env::set_var("LIBRARY_LOAN_DAYS", "21");
        std::env::set_var("LIBRARY_MAX_BORROWED_BOOKS", "not-a-number");
        let config = Configuration::from_env("test");
        assert_eq!(21, config.book_loan_days);
        assert_eq!(5, config.max_borrowed_books);

        std::env::set_var("LIBRARY_LOAN_DAYS", "99999999999");
        std::env::set_var("LIBRARY_MAX_BORROWED_BOOKS", "0");
        let config = Configuration::from_env("test");
        assert_eq!(14, config.book_loan_days);
        assert_eq!(5, config.max_borrowed_books);
        std::env::set_var("LIBRARY_LOAN_DAYS", "365");
        assert_eq!(365, Configuration::from_env("test").book_loan_days);
        std::env::remove_var("LIBRARY_LOAN_DAYS");
        std::env::remove_var("LIBRARY_MAX_BORROWED_BOOKS");
    }

    #[tokio::test]
    async fn test_should_return_fixed_time() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(at, clock.now());
        assert_eq!(clock.now(), clock.now());
    }
}
