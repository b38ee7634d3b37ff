use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::utils::sql::DbClient;

pub fn create_catalog_service(config: &Configuration, client: &DbClient) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(client);
    Box::new(CatalogServiceImpl::new(config, book_repo))
}
