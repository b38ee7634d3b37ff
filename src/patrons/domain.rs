pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::patrons::dto::PatronStatusReport;

#[async_trait]
pub trait PatronService: Sync + Send {
    // None when the patron id is malformed
    async fn get_patron_status_report(&self, patron_id: &str) -> LibraryResult<Option<PatronStatusReport>>;
}
