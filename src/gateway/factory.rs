use std::sync::Arc;
use crate::core::domain::Clock;
use crate::gateway::payment::PaymentGateway;
use crate::gateway::simulated::processor::SimulatedPaymentGateway;

pub fn create_payment_gateway(clock: Arc<dyn Clock>) -> Box<dyn PaymentGateway> {
    Box::new(SimulatedPaymentGateway::new(clock))
}
