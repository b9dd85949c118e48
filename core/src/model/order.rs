// order_service/src/model/order.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderLineItem, OrderStatus, UserId};

/// An order together with (optionally) its line items.
///
/// `order_line_items` is only guaranteed to be populated on orders returned by
/// `OrderService`; a bare record coming out of an `OrderRepository` has an
/// empty vector until it is built up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: OrderId,
  pub order_status: OrderStatus,
  pub user_id: UserId,
  pub purchased_on: DateTime<Utc>,
  #[serde(default)]
  pub order_line_items: Vec<OrderLineItem>,
}

impl Order {
  /// A new, unsaved order for `user_id`, purchased now, in `Pending` status.
  pub fn pending(user_id: UserId, order_line_items: Vec<OrderLineItem>) -> Self {
    Self {
      order_id: 0,
      order_status: OrderStatus::Pending,
      user_id,
      purchased_on: Utc::now(),
      order_line_items,
    }
  }

  pub fn is_cancelled(&self) -> bool {
    self.order_status == OrderStatus::Cancelled
  }

  /// The same order without line items, as an order repository stores it.
  pub fn without_line_items(&self) -> Self {
    Self {
      order_line_items: Vec::new(),
      ..self.clone()
    }
  }
}
