use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::late_fee::{FeeStatus, LateFee};
use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::dto::{BorrowedBook, CheckoutDto, ReturnedBook};
use crate::checkout::repository::CheckoutRepository;
use crate::core::domain::{Clock, Configuration};
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult, Outcome};
use crate::core::repository::Repository;
use crate::utils::validation::{is_valid_patron_id, validate_patron_id};

const BOOK_NOT_FOUND: &str = "Book not found.";

pub(crate) struct CheckoutServiceImpl {
    branch_id: String,
    max_borrowed_books: i64,
    book_loan_days: i64,
    clock: Arc<dyn Clock>,
    checkout_repository: Box<dyn CheckoutRepository>,
    book_repository: Box<dyn BookRepository>,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(config: &Configuration, clock: Arc<dyn Clock>,
                      checkout_repository: Box<dyn CheckoutRepository>,
                      book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_borrowed_books: config.max_borrowed_books,
            book_loan_days: config.book_loan_days,
            clock,
            checkout_repository,
            book_repository,
        }
    }

    async fn find_book(&self, book_id: &str) -> LibraryResult<Option<BookEntity>> {
        match self.book_repository.get(book_id).await {
            Ok(book) => Ok(Some(book)),
            Err(LibraryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_book(&self, book_id: &str) -> LibraryResult<BookEntity> {
        self.find_book(book_id).await?.ok_or_else(|| LibraryError::not_found(BOOK_NOT_FOUND))
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn borrow_book_by_patron(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<CheckoutDto>> {
        validate_patron_id(patron_id)?;
        let book = self.get_book(book_id).await?;
        if book.available_copies <= 0 {
            return Err(LibraryError::unavailable("This book is currently not available.", None, false));
        }
        let borrowed = self.checkout_repository.count_open(patron_id).await?;
        if borrowed >= self.max_borrowed_books {
            warn!("patron {} is at the borrowing limit with {} books", patron_id, borrowed);
            return Err(LibraryError::not_granted(
                format!("You have reached the maximum borrowing limit of {} books.", self.max_borrowed_books).as_str(),
                Some("403".to_string())));
        }

        let now = self.clock.now();
        let checkout = CheckoutEntity::new(self.branch_id.as_str(), patron_id, book_id, now, self.book_loan_days);
        if let Err(err) = self.checkout_repository.create(&checkout).await {
            warn!("failed to create borrow record for {}: {}", patron_id, err);
            return Err(LibraryError::database("Database error occurred while creating borrow record.", None, err.retryable()));
        }
        // the borrow record stays in place if the counter cannot be moved
        if let Err(err) = self.book_repository.update_availability(book_id, -1, now).await {
            warn!("failed to decrement availability of {}: {}", book_id, err);
            return Err(LibraryError::database("Database error occurred while updating book availability.", None, err.retryable()));
        }
        info!("patron {} borrowed {} until {}", patron_id, book_id, checkout.due_date);
        Ok(Outcome::new(CheckoutDto::from(&checkout),
                        format!("Successfully borrowed \"{}\". Due date: {}.", book.title, checkout.due_date.format("%Y-%m-%d"))))
    }

    async fn return_book_by_patron(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<ReturnedBook>> {
        validate_patron_id(patron_id)?;
        let book = self.get_book(book_id).await?;
        let mut checkout = self.checkout_repository.find_open(patron_id, book_id).await?
            .ok_or_else(|| LibraryError::not_found("Book was not borrowed by this patron."))?;

        let now = self.clock.now();
        let late_fee = LateFee::accrued(checkout.due_date, now);
        checkout.checkout_status = CheckoutStatus::Returned;
        checkout.return_date = Some(now);
        checkout.updated_at = now;
        if let Err(err) = self.checkout_repository.update(&checkout).await {
            warn!("failed to close borrow record {}: {}", checkout.checkout_id, err);
            return Err(LibraryError::database("Database error occurred while updating borrow record.", None, err.retryable()));
        }
        checkout.version += 1;
        if let Err(err) = self.book_repository.update_availability(book_id, 1, now).await {
            warn!("failed to increment availability of {}: {}", book_id, err);
            return Err(LibraryError::database("Database error occurred while updating book availability.", None, err.retryable()));
        }
        info!("patron {} returned {} with fee {:.2}", patron_id, book_id, late_fee.fee_amount);
        let message = format!("Successfully returned \"{}\". Late fee: ${:.2} ({} days overdue).",
                              book.title, late_fee.fee_amount, late_fee.days_overdue);
        Ok(Outcome::new(ReturnedBook { record: CheckoutDto::from(&checkout), late_fee }, message))
    }

    async fn calculate_late_fee_for_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<LateFee> {
        if !is_valid_patron_id(patron_id) {
            return Ok(LateFee::none(FeeStatus::InvalidPatron));
        }
        if self.find_book(book_id).await?.is_none() {
            return Ok(LateFee::none(FeeStatus::BookNotFound));
        }
        match self.checkout_repository.find_open(patron_id, book_id).await? {
            Some(checkout) => Ok(LateFee::accrued(checkout.due_date, self.clock.now())),
            None => Ok(LateFee::none(FeeStatus::NotBorrowed)),
        }
    }

    async fn find_borrowed_books(&self, patron_id: &str) -> LibraryResult<Vec<BorrowedBook>> {
        self.checkout_repository.find_borrowed_books(patron_id, self.clock.now()).await
    }

    async fn find_borrow_history(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutDto>> {
        let res = self.checkout_repository.find_returned(patron_id).await?;
        Ok(res.iter().map(CheckoutDto::from).collect())
    }
}
