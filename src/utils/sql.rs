use std::cmp;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use chrono::NaiveDateTime;
use rusqlite::{Connection, params, Row};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::DATE_FMT;

/// Shared handle to the relational store. The lock is only held for the duration of a
/// single statement, never across an await point.
pub type DbClient = Arc<Mutex<Connection>>;

const MAX_PAGE_SIZE: usize = 500;
const BUSY_TIMEOUT_SECS: u64 = 5;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS books (
    book_id TEXT PRIMARY KEY,
    version INTEGER NOT NULL DEFAULT 0,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn TEXT NOT NULL UNIQUE,
    total_copies INTEGER NOT NULL CHECK (total_copies > 0),
    available_copies INTEGER NOT NULL CHECK (available_copies >= 0 AND available_copies <= total_copies),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS checkout (
    checkout_id TEXT PRIMARY KEY,
    version INTEGER NOT NULL DEFAULT 0,
    branch_id TEXT NOT NULL,
    patron_id TEXT NOT NULL,
    book_id TEXT NOT NULL REFERENCES books(book_id),
    checkout_status TEXT NOT NULL,
    borrow_date TEXT NOT NULL,
    due_date TEXT NOT NULL,
    return_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS checkout_ndx ON checkout (patron_id, return_date);
";

// helper method to open the relational store for the given configuration
pub fn build_db_client(store: &RepositoryStore) -> LibraryResult<DbClient> {
    let conn = match store {
        RepositoryStore::Sqlite { path } => {
            let conn = Connection::open(path)
                .map_err(|e| LibraryError::from_sqlite(format!("failed to open {}", path).as_str(), &e))?;
            // WAL gives readers a consistent view while a borrow is being written
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            // the file is shared by every lambda, writers wait for each other instead of failing
            conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))?;
            conn
        }
        RepositoryStore::InMemory => {
            Connection::open_in_memory()
                .map_err(|e| LibraryError::from_sqlite("failed to open in-memory store", &e))?
        }
    };
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn create_tables(client: &DbClient) -> LibraryResult<()> {
    with_connection(client, "failed to create tables", |conn| conn.execute_batch(SCHEMA))
}

pub fn build_initialized_client(store: &RepositoryStore) -> LibraryResult<DbClient> {
    let client = build_db_client(store)?;
    create_tables(&client)?;
    Ok(client)
}

pub(crate) fn with_connection<T, F>(client: &DbClient, context: &str, f: F) -> LibraryResult<T>
    where F: FnOnce(&Connection) -> rusqlite::Result<T> {
    let conn = client.lock()
        .map_err(|e| LibraryError::runtime(format!("{} due to poisoned connection {}", context, e).as_str(), None))?;
    f(&*conn).map_err(|e| LibraryError::from_sqlite(context, &e))
}

pub(crate) fn string_date(date: NaiveDateTime) -> String {
    format!("{}", date.format(DATE_FMT))
}

pub(crate) fn opt_string_date(opt_date: Option<NaiveDateTime>) -> Option<String> {
    opt_date.map(string_date)
}

pub(crate) fn parse_date_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDateTime> {
    let str: String = row.get(name)?;
    NaiveDateTime::parse_from_str(&str, DATE_FMT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
}

pub(crate) fn parse_opt_date_column(row: &Row, name: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let str: Option<String> = row.get(name)?;
    match str {
        Some(s) if !s.is_empty() => NaiveDateTime::parse_from_str(&s, DATE_FMT).map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))),
        _ => Ok(None),
    }
}

// pages are plain row offsets encoded as strings
pub(crate) fn to_sql_page(page: Option<&str>) -> usize {
    page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0)
}

/// Runs a select over `table`, fetching one extra row to learn whether another page follows.
pub(crate) fn query_page<T, F>(client: &DbClient, table: &str, order_by: &str, page: Option<&str>,
                               page_size: usize, map: F) -> LibraryResult<PaginatedResult<T>>
    where F: Fn(&Row) -> rusqlite::Result<T> {
    let limit = cmp::max(1, cmp::min(page_size, MAX_PAGE_SIZE));
    let offset = to_sql_page(page);
    let sql = format!("SELECT * FROM {} ORDER BY {} LIMIT ?1 OFFSET ?2", table, order_by);
    let mut records = with_connection(client, format!("failed to query {}", table).as_str(), |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![(limit + 1) as i64, offset as i64], |row| map(row))?;
        let records = rows.collect::<rusqlite::Result<Vec<T>>>();
        records
    })?;
    let next_page = if records.len() > limit {
        records.truncate(limit);
        Some((offset + limit).to_string())
    } else {
        None
    };
    Ok(PaginatedResult::new(page, limit, next_page, records))
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;
    use crate::utils::sql::{build_initialized_client, to_sql_page, with_connection};

    #[tokio::test]
    async fn test_should_create_tables_idempotently() {
        let client = build_initialized_client(&RepositoryStore::InMemory).expect("should open store");
        crate::utils::sql::create_tables(&client).expect("should create tables twice");
        let count: i64 = with_connection(&client, "count", |conn| {
            conn.query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'", [], |r| r.get(0))
        }).expect("should count tables");
        assert_eq!(2, count);
    }

    #[tokio::test]
    async fn test_should_parse_page() {
        assert_eq!(0, to_sql_page(None));
        assert_eq!(40, to_sql_page(Some("40")));
        assert_eq!(0, to_sql_page(Some("garbage")));
    }
}
