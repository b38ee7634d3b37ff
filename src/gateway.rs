pub mod payment;
pub mod simulated {
    pub mod processor;
}
pub mod factory;
