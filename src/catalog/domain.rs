pub mod service;

use std::str::FromStr;
use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult, Outcome};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SearchType {
    Author,
    Title,
    Isbn,
}

impl FromStr for SearchType {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "author" => Ok(SearchType::Author),
            "title" => Ok(SearchType::Title),
            "isbn" => Ok(SearchType::Isbn),
            other => Err(LibraryError::validation(
                format!("unsupported search type {}", other).as_str(), Some("400".to_string()))),
        }
    }
}

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book_to_catalog(&self, title: &str, author: &str, isbn: &str,
                                 total_copies: i64) -> LibraryResult<Outcome<BookDto>>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    // unknown search types and empty terms match nothing
    async fn search_books_in_catalog(&self, term: &str, search_type: &str) -> LibraryResult<Vec<BookDto>>;
}
