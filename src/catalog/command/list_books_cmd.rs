use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.list_books().await.map_err(CommandError::from).map(ListBooksCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sql::build_initialized_client;

    #[tokio::test]
    async fn test_should_run_list_books() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        let svc = factory::create_catalog_service(&Configuration::new("test"), &client);
        let _ = svc.add_book_to_catalog("one", "author", "9780306406157", 1).await.expect("should add book");
        let _ = svc.add_book_to_catalog("two", "author", "9780306406158", 1).await.expect("should add book");
        let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest::default()).await.expect("should list books");
        assert_eq!(2, res.books.len());
    }
}
