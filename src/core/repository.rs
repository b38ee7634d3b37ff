use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// store shared by every lambda unless LIBRARY_DB_PATH points elsewhere
pub const DEFAULT_DB_PATH: &str = "library.db";

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub enum RepositoryStore {
    Sqlite { path: String },
    InMemory,
}

impl RepositoryStore {
    pub fn from_path(path: Option<&str>) -> RepositoryStore {
        RepositoryStore::Sqlite { path: path.unwrap_or(DEFAULT_DB_PATH).to_string() }
    }
}
