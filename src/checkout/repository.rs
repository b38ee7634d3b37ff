pub mod sql_checkout_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::dto::BorrowedBook;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait CheckoutRepository : Repository<CheckoutEntity> {
    // persists a changed record, rejected when the stored version moved on
    async fn update(&self, entity: &CheckoutEntity) -> LibraryResult<usize>;

    async fn count_open(&self, patron_id: &str) -> LibraryResult<i64>;

    async fn find_borrowed_books(&self, patron_id: &str, now: NaiveDateTime) -> LibraryResult<Vec<BorrowedBook>>;

    // oldest open record of the book for the patron
    async fn find_open(&self, patron_id: &str, book_id: &str) -> LibraryResult<Option<CheckoutEntity>>;

    async fn find_returned(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutEntity>>;
}
