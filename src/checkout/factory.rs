use std::sync::Arc;
use crate::books::factory::create_book_repository;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::checkout::repository::CheckoutRepository;
use crate::checkout::repository::sql_checkout_repository::SqlCheckoutRepository;
use crate::core::domain::{Clock, Configuration};
use crate::utils::sql::DbClient;

pub(crate) fn create_checkout_repository(client: &DbClient) -> Box<dyn CheckoutRepository> {
    Box::new(SqlCheckoutRepository::new(client.clone(), "checkout", "books"))
}

pub fn create_checkout_service(config: &Configuration, client: &DbClient, clock: Arc<dyn Clock>) -> Box<dyn CheckoutService> {
    let checkout_repo = create_checkout_repository(client);
    let book_repo = create_book_repository(client);
    Box::new(CheckoutServiceImpl::new(config, clock, checkout_repo, book_repo))
}
