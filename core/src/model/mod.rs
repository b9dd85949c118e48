// order_service/src/model/mod.rs

//! Plain data types for the order aggregate. No business logic lives here;
//! the rules are enforced by `crate::service::OrderService`.

pub mod line_item;
pub mod order;
pub mod status;

/// Repository-assigned identifier of an order. `0` means "not yet assigned".
pub type OrderId = i32;

/// Identifier of the purchasing user.
pub type UserId = i32;

pub use line_item::OrderLineItem;
pub use order::Order;
pub use status::OrderStatus;
