use std::sync::Arc;
use crate::checkout::factory::create_checkout_service;
use crate::core::domain::{Clock, Configuration};
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;
use crate::utils::sql::DbClient;

pub fn create_patron_service(config: &Configuration, client: &DbClient, clock: Arc<dyn Clock>) -> Box<dyn PatronService> {
    let checkout_svc = create_checkout_service(config, client, clock.clone());
    Box::new(PatronServiceImpl::new(config, clock, checkout_svc))
}
