use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str, total_copies: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
    pub message: String,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto, message: String) -> Self {
        Self {
            book,
            message,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book_to_catalog(
            req.title.as_str(), req.author.as_str(), req.isbn.as_str(), req.total_copies)
            .await.map_err(CommandError::from).map(|outcome| AddBookCommandResponse::new(outcome.value, outcome.message))
    }
}
