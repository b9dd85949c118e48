// src/lib.rs

//! order_service: the business rules of a small order-management API.
//!
//! The crate provides:
//!  - The order aggregate (`Order`, `OrderLineItem`, `OrderStatus`).
//!  - Repository traits describing the persistence the service needs.
//!  - `OrderService`, which creates, fetches, cancels and deletes orders,
//!    enforcing that an order has at least one line item, that an order is
//!    cancelled at most once, and that line items are removed before their order.
//!  - In-memory repositories for tests, benchmarks and local runs.
//!
//! HTTP routing, request mapping and a durable store are left to the embedding
//! application. `OrderError::is_invalid_request` tells such a layer which
//! failures are the client's fault.

pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;

// --- Re-exports for the Public API ---

pub use crate::config::ServiceConfig;
pub use crate::error::{OrderError, OrderResult};
pub use crate::model::{Order, OrderId, OrderLineItem, OrderStatus, UserId};
pub use crate::repository::{
  InMemoryOrderLineItemRepository, InMemoryOrderRepository, OrderLineItemRepository, OrderRepository,
};
pub use crate::service::OrderService;

/*
    Typical wiring:
    1. Implement `OrderRepository` and `OrderLineItemRepository` for your store
       (or use the in-memory pair).
    2. Build an `OrderService` from `Arc`s of both, optionally with a
       `ServiceConfig` loaded via `ServiceConfig::from_env()`.
    3. Call `create_order` / `get_order` / `cancel_order` / `delete_order` from
       your request handlers and map `OrderError::InvalidRequest` to a client error.
*/
