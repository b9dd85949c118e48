// order_service/examples/order_lifecycle.rs

use order_service::{
  InMemoryOrderLineItemRepository, InMemoryOrderRepository, Order, OrderError, OrderLineItem, OrderService,
  ServiceConfig,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), OrderError> {
  dotenvy::dotenv().ok(); // Load .env file if present

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")))
    .init();

  info!("--- Order Lifecycle Example ---");

  let config = ServiceConfig::from_env()?;
  let service = OrderService::with_config(
    Arc::new(InMemoryOrderRepository::new()),
    Arc::new(InMemoryOrderLineItemRepository::new()),
    config,
  );

  // An order needs at least one line item.
  match service.create_order(Order::pending(7, Vec::new())).await {
    Err(e) if e.is_invalid_request() => warn!("Rejected as expected: {}", e),
    other => panic!("Expected an invalid request, got {:?}", other),
  }

  let created = service
    .create_order(Order::pending(
      7,
      vec![OrderLineItem::new(1001, 2), OrderLineItem::new(1002, 1)],
    ))
    .await?;
  info!(
    "Created order {} with {} line items",
    created.order_id,
    created.order_line_items.len()
  );

  let fetched = service.get_order(created.order_id).await?;
  info!("Fetched: {:?}", fetched);

  let cancelled = service.cancel_order(created.order_id).await?;
  info!("Order {} is now {:?}", cancelled.order_id, cancelled.order_status);

  if let Err(e) = service.cancel_order(created.order_id).await {
    warn!("Second cancel refused: {}", e);
  }

  let deleted = service.delete_order(created.order_id).await?;
  info!(
    "Deleted order {} (had {} line items)",
    deleted.order_id,
    deleted.order_line_items.len()
  );

  assert!(service.get_order(created.order_id).await?.is_none());
  info!("Order {} is gone.", created.order_id);

  Ok(())
}
