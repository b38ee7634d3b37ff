use std::sync::Arc;
use axum::http::StatusCode;
use crate::core::command::CommandError;
use crate::core::domain::{Clock, Configuration, system_clock};
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::utils::sql::{build_initialized_client, DbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub client: DbClient,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Configuration, client: DbClient, clock: Arc<dyn Clock>) -> AppState {
        AppState {
            config,
            client,
            clock,
        }
    }

    pub fn from_env(branch_id: &str) -> LibraryResult<AppState> {
        AppState::from_config(Configuration::from_env(branch_id))
    }

    // every lambda opens the same database file, so state written by one is seen by the others
    pub fn from_config(config: Configuration) -> LibraryResult<AppState> {
        let store = RepositoryStore::from_path(config.database_path.as_deref());
        let client = build_initialized_client(&store)?;
        Ok(AppState::new(config, client, system_clock()))
    }
}

pub type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Access { .. } => StatusCode::FORBIDDEN,
            CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Runtime { .. } => StatusCode::CONFLICT,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
            CommandError::Payment { .. } => StatusCode::BAD_GATEWAY,
        };
        (status, err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use axum::http::StatusCode;
    use uuid::Uuid;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::domain::CheckoutService;
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, ServerError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_share_store_between_lambdas() {
        let path = std::env::temp_dir().join(format!("circulation-{}.db", Uuid::new_v4()));
        let mut config = Configuration::new("test");
        config.database_path = Some(path.to_string_lossy().to_string());

        let catalog_state = AppState::from_config(config.clone()).expect("should build catalog state");
        let checkout_state = AppState::from_config(config).expect("should build checkout state");
        let book = create_catalog_service(&catalog_state.config, &catalog_state.client)
            .add_book_to_catalog("Dune", "Frank Herbert", "9780441013593", 1).await.expect("should add book").value;
        let borrowed = create_checkout_service(&checkout_state.config, &checkout_state.client, checkout_state.clock.clone())
            .borrow_book_by_patron("123456", book.book_id.as_str()).await.expect("should borrow");
        assert_eq!(book.book_id, borrowed.value.book_id);
        let loaded = create_catalog_service(&catalog_state.config, &catalog_state.client)
            .find_book_by_id(book.book_id.as_str()).await.expect("should find book");
        assert_eq!(0, loaded.available_copies);

        drop(catalog_state);
        drop(checkout_state);
        for suffix in ["", "-wal", "-shm"] {
            let _ = fs::remove_file(format!("{}{}", path.to_string_lossy(), suffix));
        }
    }

    #[tokio::test]
    async fn test_should_map_command_errors_to_status() {
        let (status, message) = ServerError::from(CommandError::NotFound { message: "Book not found.".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Book not found.", message.as_str());
        let (status, _) = ServerError::from(CommandError::Access { message: "limit".to_string(), reason_code: None });
        assert_eq!(StatusCode::FORBIDDEN, status);
        let (status, _) = ServerError::from(CommandError::Payment { message: "declined".to_string(), reason_code: None });
        assert_eq!(StatusCode::BAD_GATEWAY, status);
    }
}
