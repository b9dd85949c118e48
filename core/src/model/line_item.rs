// order_service/src/model/line_item.rs
use serde::{Deserialize, Serialize};

use super::OrderId;

/// One line of an order. Only `order_id` is interpreted by the service; the
/// rest is carried through to the repository as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
  pub order_line_item_id: i32,
  pub order_id: OrderId,
  pub product_id: i32,
  pub quantity: i32,
}

impl OrderLineItem {
  /// An unsaved line item. Both identifiers are assigned later: `order_id` by
  /// the service once the parent exists, `order_line_item_id` by the repository.
  pub fn new(product_id: i32, quantity: i32) -> Self {
    Self {
      order_line_item_id: 0,
      order_id: 0,
      product_id,
      quantity,
    }
  }
}
