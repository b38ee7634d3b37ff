pub mod domain;
pub mod command;
pub mod dto;
pub mod factory;
pub(crate) mod repository;
pub mod controller;
