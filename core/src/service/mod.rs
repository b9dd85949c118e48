// order_service/src/service/mod.rs

pub mod order_service;

pub use order_service::OrderService;
