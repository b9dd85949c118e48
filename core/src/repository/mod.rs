// order_service/src/repository/mod.rs

//! Collaborator contracts the service is written against.
//!
//! Implementations decide how and where data is stored. Each call is expected
//! to be atomic on its own; nothing in this crate spans a transaction across
//! calls. Failures are reported as `anyhow::Error` and reach the caller of
//! `OrderService` unchanged.

pub mod memory;

use async_trait::async_trait;

use crate::model::{Order, OrderId, OrderLineItem};

pub use memory::{InMemoryOrderLineItemRepository, InMemoryOrderRepository};

/// Persistence of bare order records (without their line items).
#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// Stores a new order and returns it with its assigned `order_id`.
  async fn create_order(&self, order: Order) -> anyhow::Result<Order>;

  /// `Ok(None)` when no order has this id.
  async fn get_order(&self, order_id: OrderId) -> anyhow::Result<Option<Order>>;

  async fn update_order(&self, order: Order) -> anyhow::Result<Order>;

  /// Removes the order and returns what was removed.
  async fn delete_order(&self, order: Order) -> anyhow::Result<Order>;
}

/// Persistence of line items, always scoped to their parent order.
#[async_trait]
pub trait OrderLineItemRepository: Send + Sync {
  /// Stores a line item and returns its persisted form.
  async fn create_order_line_item(&self, line_item: OrderLineItem) -> anyhow::Result<OrderLineItem>;

  async fn get_order_line_items(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>>;

  /// Removes every line item of `order_id` and returns the removed items.
  async fn delete_all_line_items_in_order(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>>;
}
