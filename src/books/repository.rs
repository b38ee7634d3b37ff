pub mod sql_book_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn get(&self, id: &str) -> LibraryResult<BookEntity>;

    // one page of the catalog in insertion order
    async fn query(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>>;

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;

    // moves available_copies by delta, rejected when the result would leave 0..=total_copies
    async fn update_availability(&self, book_id: &str, delta: i64, now: NaiveDateTime) -> LibraryResult<usize>;
}
