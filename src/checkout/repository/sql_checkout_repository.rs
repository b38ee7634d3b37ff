use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params, Row};

use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::dto::BorrowedBook;
use crate::checkout::repository::CheckoutRepository;
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::sql::{DbClient, opt_string_date, parse_date_column, parse_opt_date_column, string_date, with_connection};

pub(crate) struct SqlCheckoutRepository {
    client: DbClient,
    table_name: String,
    books_table_name: String,
}

impl SqlCheckoutRepository {
    pub(crate) fn new(client: DbClient, table_name: &str, books_table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            books_table_name: books_table_name.to_string(),
        }
    }

    fn select_all(&self, sql: &str, patron_id: &str) -> LibraryResult<Vec<CheckoutEntity>> {
        with_connection(&self.client, format!("failed to query checkout for {}", patron_id).as_str(), |conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params![patron_id], map_to_checkout)?;
            let records = rows.collect::<rusqlite::Result<Vec<CheckoutEntity>>>();
            records
        })
    }
}

#[async_trait]
impl Repository<CheckoutEntity> for SqlCheckoutRepository {
    async fn create(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let sql = format!("INSERT INTO {} (checkout_id, version, branch_id, patron_id, book_id, checkout_status, \
                           borrow_date, due_date, return_date, created_at, updated_at) \
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)", self.table_name);
        with_connection(&self.client, format!("failed to insert checkout {}", entity.checkout_id).as_str(), |conn| {
            conn.execute(&sql, params![
                entity.checkout_id,
                entity.version,
                entity.branch_id,
                entity.patron_id,
                entity.book_id,
                entity.checkout_status.to_string(),
                string_date(entity.borrow_date),
                string_date(entity.due_date),
                opt_string_date(entity.return_date),
                string_date(entity.created_at),
                string_date(entity.updated_at),
            ])
        })
    }
}

#[async_trait]
impl CheckoutRepository for SqlCheckoutRepository {
    async fn update(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let sql = format!("UPDATE {} SET version = version + 1, checkout_status = ?1, due_date = ?2, \
                           return_date = ?3, updated_at = ?4 WHERE checkout_id = ?5 AND version = ?6", self.table_name);
        let updated = with_connection(&self.client, format!("failed to update checkout {}", entity.checkout_id).as_str(), |conn| {
            conn.execute(&sql, params![
                entity.checkout_status.to_string(),
                string_date(entity.due_date),
                opt_string_date(entity.return_date),
                string_date(entity.updated_at),
                entity.checkout_id,
                entity.version,
            ])
        })?;
        if updated == 0 {
            return Err(LibraryError::database(
                format!("checkout {} was not updated, version {} is stale", entity.checkout_id, entity.version).as_str(),
                None, true));
        }
        Ok(updated)
    }

    async fn count_open(&self, patron_id: &str) -> LibraryResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE patron_id = ?1 AND return_date IS NULL", self.table_name);
        with_connection(&self.client, format!("failed to count checkout for {}", patron_id).as_str(), |conn| {
            conn.query_row(&sql, params![patron_id], |row| row.get(0))
        })
    }

    async fn find_borrowed_books(&self, patron_id: &str, now: NaiveDateTime) -> LibraryResult<Vec<BorrowedBook>> {
        let sql = format!("SELECT c.checkout_id, c.book_id, b.title, b.author, c.borrow_date, c.due_date \
                           FROM {} c JOIN {} b ON c.book_id = b.book_id \
                           WHERE c.patron_id = ?1 AND c.return_date IS NULL ORDER BY c.borrow_date, c.checkout_id",
                          self.table_name, self.books_table_name);
        with_connection(&self.client, format!("failed to find borrowed books for {}", patron_id).as_str(), |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![patron_id], |row| {
                let due_date = parse_date_column(row, "due_date")?;
                Ok(BorrowedBook {
                    checkout_id: row.get("checkout_id")?,
                    book_id: row.get("book_id")?,
                    title: row.get("title")?,
                    author: row.get("author")?,
                    borrow_date: parse_date_column(row, "borrow_date")?,
                    due_date,
                    is_overdue: now > due_date,
                })
            })?;
            let records = rows.collect::<rusqlite::Result<Vec<BorrowedBook>>>();
            records
        })
    }

    async fn find_open(&self, patron_id: &str, book_id: &str) -> LibraryResult<Option<CheckoutEntity>> {
        let sql = format!("SELECT * FROM {} WHERE patron_id = ?1 AND book_id = ?2 AND return_date IS NULL \
                           ORDER BY borrow_date, checkout_id LIMIT 1", self.table_name);
        with_connection(&self.client, format!("failed to find checkout of {} for {}", book_id, patron_id).as_str(), |conn| {
            conn.query_row(&sql, params![patron_id, book_id], map_to_checkout).optional()
        })
    }

    async fn find_returned(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutEntity>> {
        let sql = format!("SELECT * FROM {} WHERE patron_id = ?1 AND return_date IS NOT NULL \
                           ORDER BY borrow_date, checkout_id", self.table_name);
        self.select_all(sql.as_str(), patron_id)
    }
}

fn parse_status(row: &Row) -> rusqlite::Result<CheckoutStatus> {
    let status: String = row.get("checkout_status")?;
    match status.as_str() {
        "CheckedOut" => Ok(CheckoutStatus::CheckedOut),
        "Returned" => Ok(CheckoutStatus::Returned),
        other => Err(rusqlite::Error::InvalidColumnType(
            0, format!("checkout_status {}", other), rusqlite::types::Type::Text)),
    }
}

fn map_to_checkout(row: &Row) -> rusqlite::Result<CheckoutEntity> {
    Ok(CheckoutEntity {
        checkout_id: row.get("checkout_id")?,
        version: row.get("version")?,
        branch_id: row.get("branch_id")?,
        patron_id: row.get("patron_id")?,
        book_id: row.get("book_id")?,
        checkout_status: parse_status(row)?,
        borrow_date: parse_date_column(row, "borrow_date")?,
        due_date: parse_date_column(row, "due_date")?,
        return_date: parse_opt_date_column(row, "return_date")?,
        created_at: parse_date_column(row, "created_at")?,
        updated_at: parse_date_column(row, "updated_at")?,
    })
}
