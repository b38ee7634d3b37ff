use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::{CatalogService, SearchType};
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, Outcome};
use crate::core::repository::Repository;
use crate::utils::validation::{is_valid_isbn, normalize_isbn, validate_author, validate_isbn, validate_title, validate_total_copies};

const DUPLICATE_ISBN: &str = "A book with this ISBN already exists.";
const BOOK_NOT_FOUND: &str = "Book not found.";
const LIST_PAGE_SIZE: usize = 200;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book_to_catalog(&self, title: &str, author: &str, isbn: &str,
                                 total_copies: i64) -> LibraryResult<Outcome<BookDto>> {
        let title = validate_title(title)?;
        let author = validate_author(author)?;
        let isbn = validate_isbn(isbn)?;
        let total_copies = validate_total_copies(total_copies)?;

        if self.book_repository.find_by_isbn(isbn.as_str()).await?.is_some() {
            warn!("branch {} rejected duplicate isbn {}", self.branch_id, isbn);
            return Err(LibraryError::duplicate_key(DUPLICATE_ISBN));
        }
        let book = BookEntity::new(title.as_str(), author.as_str(), isbn.as_str(), total_copies);
        match self.book_repository.create(&book).await {
            Ok(_) => {}
            // lost a race with a concurrent add of the same isbn
            Err(LibraryError::DuplicateKey { .. }) => {
                return Err(LibraryError::duplicate_key(DUPLICATE_ISBN));
            }
            Err(err) => {
                warn!("failed to add book {}: {}", isbn, err);
                return Err(LibraryError::database("Database error occurred while adding the book.", None, err.retryable()));
            }
        }
        info!("branch {} added book {} with {} copies", self.branch_id, book.book_id, total_copies);
        Ok(Outcome::new(BookDto::from(&book),
                        format!("Book \"{}\" has been successfully added to the catalog.", title)))
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        match self.book_repository.get(id).await {
            Ok(book) => Ok(BookDto::from(&book)),
            Err(LibraryError::NotFound { .. }) => Err(LibraryError::not_found(BOOK_NOT_FOUND)),
            Err(err) => Err(err),
        }
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>> {
        let isbn = normalize_isbn(isbn);
        Ok(self.book_repository.find_by_isbn(isbn.as_str()).await?.as_ref().map(BookDto::from))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.book_repository.query(next_page.as_deref(), LIST_PAGE_SIZE).await?;
            books.extend(res.records.iter().map(BookDto::from));
            match res.next_page {
                Some(page) => next_page = Some(page),
                None => break,
            }
        }
        Ok(books)
    }

    async fn search_books_in_catalog(&self, term: &str, search_type: &str) -> LibraryResult<Vec<BookDto>> {
        let search_type = match search_type.parse::<SearchType>() {
            Ok(search_type) => search_type,
            Err(_) => return Ok(vec![]),
        };
        if term.is_empty() {
            return Ok(vec![]);
        }
        match search_type {
            SearchType::Isbn => {
                if !is_valid_isbn(term) {
                    return Ok(vec![]);
                }
                Ok(self.find_book_by_isbn(term).await?.into_iter().collect())
            }
            SearchType::Author | SearchType::Title => {
                let needle = term.to_lowercase();
                let books = self.list_books().await?;
                Ok(books.into_iter().filter(|book| {
                    let haystack = if search_type == SearchType::Author { &book.author } else { &book.title };
                    haystack.to_lowercase().contains(needle.as_str())
                }).collect())
            }
        }
    }
}
