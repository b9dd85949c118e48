// order_service/src/service/order_service.rs

//! `OrderService`: the order lifecycle rules on top of the two repositories.

use std::sync::Arc;

use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{event, instrument, Level};

use crate::config::ServiceConfig;
use crate::error::{OrderError, OrderResult};
use crate::model::{Order, OrderId, OrderLineItem, OrderStatus};
use crate::repository::{OrderLineItemRepository, OrderRepository};

pub(crate) const EMPTY_LINE_ITEMS: &str = "To create an order you must supply at least 1 line item";
pub(crate) const NOTHING_TO_CANCEL: &str = "There is no order with that ID to be cancelled.";
pub(crate) const ALREADY_CANCELLED: &str = "This order has already been cancelled.";
pub(crate) const NOTHING_TO_DELETE: &str = "No order found to delete.";

/// Coordinates the order and line-item repositories into aggregate operations.
///
/// Multi-step operations are not transactional. If a repository call fails
/// part way through `create_order` or `delete_order`, the steps that already
/// ran are not undone, so the store may hold an order without its line items
/// or line items without their order. Callers that need stronger guarantees
/// must provide them in the repositories.
#[derive(Clone)]
pub struct OrderService {
  orders: Arc<dyn OrderRepository>,
  line_items: Arc<dyn OrderLineItemRepository>,
  config: ServiceConfig,
}

impl OrderService {
  pub fn new(orders: Arc<dyn OrderRepository>, line_items: Arc<dyn OrderLineItemRepository>) -> Self {
    Self::with_config(orders, line_items, ServiceConfig::default())
  }

  pub fn with_config(
    orders: Arc<dyn OrderRepository>,
    line_items: Arc<dyn OrderLineItemRepository>,
    config: ServiceConfig,
  ) -> Self {
    Self {
      orders,
      line_items,
      config,
    }
  }

  pub fn config(&self) -> &ServiceConfig {
    &self.config
  }

  /// Persists a new order and then all of its line items.
  ///
  /// The order is written first so its assigned id can be stamped on every
  /// line item. The line items are then written concurrently; the call returns
  /// once all of them are stored, or with the first failure. The returned
  /// order carries the persisted line items in the order they were given.
  #[instrument(
    name = "OrderService::create_order",
    skip_all,
    fields(user_id = order.user_id, line_items = order.order_line_items.len())
  )]
  pub async fn create_order(&self, mut order: Order) -> OrderResult<Order> {
    if order.order_line_items.is_empty() {
      event!(Level::WARN, "Rejected order without line items.");
      return Err(OrderError::invalid_request(EMPTY_LINE_ITEMS));
    }

    let line_items = std::mem::take(&mut order.order_line_items);

    let mut created = self
      .orders
      .create_order(order)
      .await
      .map_err(|e| repository_failure("create_order", e))?;
    let order_id = created.order_id;

    let pending: Vec<OrderLineItem> = line_items
      .into_iter()
      .map(|mut item| {
        item.order_id = order_id;
        item
      })
      .collect();

    created.order_line_items = self
      .create_line_items(pending)
      .await
      .map_err(|e| repository_failure("create_order_line_item", e))?;

    event!(
      Level::INFO,
      order_id,
      line_items = created.order_line_items.len(),
      "Order created."
    );
    Ok(created)
  }

  /// Fetches an order with its line items. `Ok(None)` when it does not exist.
  #[instrument(name = "OrderService::get_order", skip(self))]
  pub async fn get_order(&self, order_id: OrderId) -> OrderResult<Option<Order>> {
    let order = self
      .orders
      .get_order(order_id)
      .await
      .map_err(|e| repository_failure("get_order", e))?;

    match order {
      Some(order) => Ok(Some(self.build_up(order).await?)),
      None => {
        event!(Level::DEBUG, "Order not found.");
        Ok(None)
      }
    }
  }

  /// Moves an order to `Cancelled` and persists it.
  ///
  /// Fails if the order does not exist, or if it is already cancelled.
  #[instrument(name = "OrderService::cancel_order", skip(self))]
  pub async fn cancel_order(&self, order_id: OrderId) -> OrderResult<Order> {
    let mut order = match self.get_order(order_id).await? {
      Some(order) => order,
      None => {
        event!(Level::WARN, "Cannot cancel: order not found.");
        return Err(OrderError::invalid_request(NOTHING_TO_CANCEL));
      }
    };
    if order.is_cancelled() {
      event!(Level::WARN, "Cannot cancel: order already cancelled.");
      return Err(OrderError::invalid_request(ALREADY_CANCELLED));
    }

    let previous_status = order.order_status;
    order.order_status = OrderStatus::Cancelled;

    let updated = self
      .orders
      .update_order(order)
      .await
      .map_err(|e| repository_failure("update_order", e))?;

    event!(Level::INFO, ?previous_status, "Order cancelled.");
    Ok(updated)
  }

  /// Deletes an order's line items and then the order itself.
  ///
  /// Returns the order as it was just before deletion, line items included.
  #[instrument(name = "OrderService::delete_order", skip(self))]
  pub async fn delete_order(&self, order_id: OrderId) -> OrderResult<Order> {
    let snapshot = match self.get_order(order_id).await? {
      Some(order) => order,
      None => {
        event!(Level::WARN, "Cannot delete: order not found.");
        return Err(OrderError::invalid_request(NOTHING_TO_DELETE));
      }
    };

    // Children first: the parent must outlive every row that refers to it.
    let removed = self
      .line_items
      .delete_all_line_items_in_order(order_id)
      .await
      .map_err(|e| repository_failure("delete_all_line_items_in_order", e))?;

    self
      .orders
      .delete_order(snapshot.clone())
      .await
      .map_err(|e| repository_failure("delete_order", e))?;

    event!(Level::INFO, line_items_removed = removed.len(), "Order deleted.");
    Ok(snapshot)
  }

  /// Attaches the stored line items of `order` to it.
  async fn build_up(&self, mut order: Order) -> OrderResult<Order> {
    order.order_line_items = self
      .line_items
      .get_order_line_items(order.order_id)
      .await
      .map_err(|e| repository_failure("get_order_line_items", e))?;
    Ok(order)
  }

  async fn create_line_items(&self, line_items: Vec<OrderLineItem>) -> anyhow::Result<Vec<OrderLineItem>> {
    let repo = &self.line_items;
    match self.config.line_item_concurrency {
      None => try_join_all(line_items.into_iter().map(|item| repo.create_order_line_item(item))).await,
      Some(limit) => {
        stream::iter(line_items)
          .map(|item| repo.create_order_line_item(item))
          .buffered(limit.get())
          .try_collect()
          .await
      }
    }
  }
}

fn repository_failure(operation: &'static str, source: anyhow::Error) -> OrderError {
  event!(Level::ERROR, operation, error = %source, "Repository call failed.");
  OrderError::Repository(source)
}
