// order_service/src/repository/memory.rs

//! Process-local repositories backed by `parking_lot` locks.
//!
//! Nothing is durable. These exist so the service can run without a database:
//! in tests, in the benchmark and in the demo binary.
//!
//! Lock guards are never held across an `.await`; every method takes the lock,
//! does its work synchronously and releases it before returning.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{event, Level};

use super::{OrderLineItemRepository, OrderRepository};
use crate::model::{Order, OrderId, OrderLineItem};

/// Hands out identifiers starting at 1. Fails once `i32::MAX` has been issued.
#[derive(Debug)]
struct IdSequence(AtomicI32);

impl IdSequence {
  fn new() -> Self {
    IdSequence(AtomicI32::new(1))
  }

  #[cfg(test)]
  fn starting_at(first: i32) -> Self {
    IdSequence(AtomicI32::new(first))
  }

  fn next(&self) -> anyhow::Result<i32> {
    // i32::MIN marks an exhausted sequence.
    self
      .0
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
        (current != i32::MIN).then(|| current.checked_add(1).unwrap_or(i32::MIN))
      })
      .map_err(|_| anyhow!("Id sequence exhausted"))
  }
}

#[derive(Debug)]
pub struct InMemoryOrderRepository {
  orders: RwLock<BTreeMap<OrderId, Order>>,
  ids: IdSequence,
}

impl InMemoryOrderRepository {
  pub fn new() -> Self {
    Self {
      orders: RwLock::new(BTreeMap::new()),
      ids: IdSequence::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }
}

impl Default for InMemoryOrderRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
  async fn create_order(&self, order: Order) -> anyhow::Result<Order> {
    let mut stored = order.without_line_items();
    stored.order_id = self.ids.next()?;
    self.orders.write().insert(stored.order_id, stored.clone());
    event!(Level::TRACE, order_id = stored.order_id, "Stored new order.");
    Ok(stored)
  }

  async fn get_order(&self, order_id: OrderId) -> anyhow::Result<Option<Order>> {
    Ok(self.orders.read().get(&order_id).cloned())
  }

  async fn update_order(&self, order: Order) -> anyhow::Result<Order> {
    let mut orders = self.orders.write();
    match orders.get_mut(&order.order_id) {
      Some(existing) => {
        *existing = order.without_line_items();
        Ok(order)
      }
      None => Err(anyhow!("Cannot update order {}: it does not exist", order.order_id)),
    }
  }

  async fn delete_order(&self, order: Order) -> anyhow::Result<Order> {
    self
      .orders
      .write()
      .remove(&order.order_id)
      .ok_or_else(|| anyhow!("Cannot delete order {}: it does not exist", order.order_id))
  }
}

#[derive(Debug)]
pub struct InMemoryOrderLineItemRepository {
  // Keyed by order, each bucket in insertion order.
  line_items: RwLock<BTreeMap<OrderId, Vec<OrderLineItem>>>,
  ids: IdSequence,
}

impl InMemoryOrderLineItemRepository {
  pub fn new() -> Self {
    Self {
      line_items: RwLock::new(BTreeMap::new()),
      ids: IdSequence::new(),
    }
  }

  /// Total number of stored line items across all orders.
  pub fn len(&self) -> usize {
    self.line_items.read().values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for InMemoryOrderLineItemRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl OrderLineItemRepository for InMemoryOrderLineItemRepository {
  async fn create_order_line_item(&self, line_item: OrderLineItem) -> anyhow::Result<OrderLineItem> {
    let mut stored = line_item;
    stored.order_line_item_id = self.ids.next()?;
    self
      .line_items
      .write()
      .entry(stored.order_id)
      .or_default()
      .push(stored.clone());
    Ok(stored)
  }

  async fn get_order_line_items(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>> {
    Ok(self.line_items.read().get(&order_id).cloned().unwrap_or_default())
  }

  async fn delete_all_line_items_in_order(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>> {
    Ok(self.line_items.write().remove(&order_id).unwrap_or_default())
  }
}
