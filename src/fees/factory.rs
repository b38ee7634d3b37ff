use std::sync::Arc;
use crate::catalog::factory::create_catalog_service;
use crate::checkout::factory::create_checkout_service;
use crate::core::domain::{Clock, Configuration};
use crate::fees::domain::FeeService;
use crate::fees::domain::service::FeeServiceImpl;
use crate::gateway::payment::PaymentGateway;
use crate::utils::sql::DbClient;

pub fn create_fee_service(config: &Configuration, client: &DbClient, clock: Arc<dyn Clock>,
                          payment_gateway: Box<dyn PaymentGateway>) -> Box<dyn FeeService> {
    let checkout_svc = create_checkout_service(config, client, clock);
    let catalog_svc = create_catalog_service(config, client);
    Box::new(FeeServiceImpl::new(checkout_svc, catalog_svc, payment_gateway))
}
