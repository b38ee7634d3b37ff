use crate::books::repository::BookRepository;
use crate::books::repository::sql_book_repository::SqlBookRepository;
use crate::utils::sql::DbClient;

pub(crate) fn create_book_repository(client: &DbClient) -> Box<dyn BookRepository> {
    Box::new(SqlBookRepository::new(client.clone(), "books"))
}
