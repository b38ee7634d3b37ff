use async_trait::async_trait;
use crate::checkout::domain::late_fee::LateFee;
use crate::checkout::dto::{BorrowedBook, CheckoutDto, ReturnedBook};
use crate::core::library::{LibraryResult, Outcome};

pub mod late_fee;
pub mod model;
pub mod service;

#[async_trait]
pub trait CheckoutService: Sync + Send {
    async fn borrow_book_by_patron(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<CheckoutDto>>;
    async fn return_book_by_patron(&self, patron_id: &str, book_id: &str) -> LibraryResult<Outcome<ReturnedBook>>;
    // a zero fee carries the reason in its status, errors are reserved for storage failures
    async fn calculate_late_fee_for_book(&self, patron_id: &str, book_id: &str) -> LibraryResult<LateFee>;
    async fn find_borrowed_books(&self, patron_id: &str) -> LibraryResult<Vec<BorrowedBook>>;
    async fn find_borrow_history(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutDto>>;
}
