// order_service/src/model/status.rs
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The service only models `Pending -> Cancelled`. `Cancelled` is terminal.
/// The remaining values belong to processes outside this crate and are passed
/// through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
  #[default]
  Pending,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}
