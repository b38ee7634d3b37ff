use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params, Row};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::sql::{DbClient, parse_date_column, query_page, string_date, with_connection};

pub(crate) struct SqlBookRepository {
    client: DbClient,
    table_name: String,
}

impl SqlBookRepository {
    pub(crate) fn new(client: DbClient, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for SqlBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let sql = format!("INSERT INTO {} (book_id, version, title, author, isbn, total_copies, available_copies, created_at, updated_at) \
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)", self.table_name);
        with_connection(&self.client, format!("failed to insert book {}", entity.isbn).as_str(), |conn| {
            conn.execute(&sql, params![
                entity.book_id,
                entity.version,
                entity.title,
                entity.author,
                entity.isbn,
                entity.total_copies,
                entity.available_copies,
                string_date(entity.created_at),
                string_date(entity.updated_at),
            ])
        })
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let sql = format!("SELECT * FROM {} WHERE book_id = ?1", self.table_name);
        with_connection(&self.client, format!("failed to get book {}", id).as_str(), |conn| {
            conn.query_row(&sql, params![id], map_to_book).optional()
        })?.ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn query(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        query_page(&self.client, self.table_name.as_str(), "created_at, book_id", page, page_size, map_to_book)
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let sql = format!("SELECT * FROM {} WHERE isbn = ?1", self.table_name);
        with_connection(&self.client, format!("failed to find book by isbn {}", isbn).as_str(), |conn| {
            conn.query_row(&sql, params![isbn], map_to_book).optional()
        })
    }

    async fn update_availability(&self, book_id: &str, delta: i64, now: NaiveDateTime) -> LibraryResult<usize> {
        let sql = format!("UPDATE {} SET available_copies = available_copies + ?1, version = version + 1, updated_at = ?2 \
                           WHERE book_id = ?3 AND available_copies + ?1 BETWEEN 0 AND total_copies", self.table_name);
        let updated = with_connection(&self.client, format!("failed to update availability of {}", book_id).as_str(), |conn| {
            conn.execute(&sql, params![delta, string_date(now), book_id])
        })?;
        if updated == 0 {
            return Err(LibraryError::database(
                format!("availability of {} cannot move by {}", book_id, delta).as_str(), None, false));
        }
        Ok(updated)
    }
}

fn map_to_book(row: &Row) -> rusqlite::Result<BookEntity> {
    Ok(BookEntity {
        book_id: row.get("book_id")?,
        version: row.get("version")?,
        title: row.get("title")?,
        author: row.get("author")?,
        isbn: row.get("isbn")?,
        total_copies: row.get("total_copies")?,
        available_copies: row.get("available_copies")?,
        created_at: parse_date_column(row, "created_at")?,
        updated_at: parse_date_column(row, "updated_at")?,
    })
}
