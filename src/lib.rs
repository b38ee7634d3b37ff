pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod sql;
    pub mod validation;
}

pub mod books {
    pub mod domain;
    pub mod dto;
    pub(crate) mod factory;
    pub(crate) mod repository;
}

pub mod catalog;
pub mod checkout;
pub mod fees;
pub mod gateway;
pub mod patrons;
