// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use order_service::{
  InMemoryOrderLineItemRepository, InMemoryOrderRepository, Order, OrderId, OrderLineItem, OrderLineItemRepository,
  OrderRepository, OrderService, OrderStatus, ServiceConfig,
};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tracing::Level;

// --- Shared call log ---
// Every repository call is appended here so tests can assert on ordering.
pub type CallLog = Arc<Mutex<Vec<String>>>;

fn injected(operation: &str) -> anyhow::Error {
  anyhow::anyhow!("injected failure in {}", operation)
}

// --- Recording order repository ---
pub struct RecordingOrderRepository {
  pub inner: InMemoryOrderRepository,
  log: CallLog,
  fail_on: Mutex<Option<&'static str>>,
}

impl RecordingOrderRepository {
  pub fn new(log: CallLog) -> Self {
    Self {
      inner: InMemoryOrderRepository::new(),
      log,
      fail_on: Mutex::new(None),
    }
  }

  /// Makes the named operation ("create", "get", "update", "delete") fail.
  pub fn fail_on(&self, operation: &'static str) {
    *self.fail_on.lock() = Some(operation);
  }

  fn record(&self, operation: &'static str, detail: impl std::fmt::Display) -> anyhow::Result<()> {
    self.log.lock().push(format!("orders.{}({})", operation, detail));
    if *self.fail_on.lock() == Some(operation) {
      return Err(injected(operation));
    }
    Ok(())
  }
}

#[async_trait]
impl OrderRepository for RecordingOrderRepository {
  async fn create_order(&self, order: Order) -> anyhow::Result<Order> {
    self.record("create", order.user_id)?;
    self.inner.create_order(order).await
  }

  async fn get_order(&self, order_id: OrderId) -> anyhow::Result<Option<Order>> {
    self.record("get", order_id)?;
    self.inner.get_order(order_id).await
  }

  async fn update_order(&self, order: Order) -> anyhow::Result<Order> {
    self.record("update", order.order_id)?;
    self.inner.update_order(order).await
  }

  async fn delete_order(&self, order: Order) -> anyhow::Result<Order> {
    self.record("delete", order.order_id)?;
    self.inner.delete_order(order).await
  }
}

// --- Recording line-item repository ---
pub struct RecordingLineItemRepository {
  pub inner: InMemoryOrderLineItemRepository,
  log: CallLog,
  fail_on: Mutex<Option<&'static str>>,
  fail_on_product: Mutex<Option<i32>>,
  create_delay: Mutex<Option<Duration>>,
  in_flight: AtomicUsize,
  pub max_in_flight: AtomicUsize,
}

impl RecordingLineItemRepository {
  pub fn new(log: CallLog) -> Self {
    Self {
      inner: InMemoryOrderLineItemRepository::new(),
      log,
      fail_on: Mutex::new(None),
      fail_on_product: Mutex::new(None),
      create_delay: Mutex::new(None),
      in_flight: AtomicUsize::new(0),
      max_in_flight: AtomicUsize::new(0),
    }
  }

  /// Makes the named operation ("create", "get_all", "delete_all") fail.
  pub fn fail_on(&self, operation: &'static str) {
    *self.fail_on.lock() = Some(operation);
  }

  /// Makes `create` fail only for line items of this product.
  pub fn fail_on_product(&self, product_id: i32) {
    *self.fail_on_product.lock() = Some(product_id);
  }

  /// Every `create` sleeps this long before storing, to observe overlap.
  pub fn delay_creates(&self, delay: Duration) {
    *self.create_delay.lock() = Some(delay);
  }

  pub fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }

  fn record(&self, operation: &'static str, detail: impl std::fmt::Display) -> anyhow::Result<()> {
    self.log.lock().push(format!("line_items.{}({})", operation, detail));
    if *self.fail_on.lock() == Some(operation) {
      return Err(injected(operation));
    }
    Ok(())
  }
}

#[async_trait]
impl OrderLineItemRepository for RecordingLineItemRepository {
  async fn create_order_line_item(&self, line_item: OrderLineItem) -> anyhow::Result<OrderLineItem> {
    self.record("create", line_item.order_id)?;

    let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
    let delay = *self.create_delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    if *self.fail_on_product.lock() == Some(line_item.product_id) {
      return Err(injected("create"));
    }
    self.inner.create_order_line_item(line_item).await
  }

  async fn get_order_line_items(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>> {
    self.record("get_all", order_id)?;
    self.inner.get_order_line_items(order_id).await
  }

  async fn delete_all_line_items_in_order(&self, order_id: OrderId) -> anyhow::Result<Vec<OrderLineItem>> {
    self.record("delete_all", order_id)?;
    self.inner.delete_all_line_items_in_order(order_id).await
  }
}

// --- Fixture wiring both repositories to a service ---
pub struct Fixture {
  pub log: CallLog,
  pub orders: Arc<RecordingOrderRepository>,
  pub line_items: Arc<RecordingLineItemRepository>,
}

impl Fixture {
  pub fn new() -> Self {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    Self {
      orders: Arc::new(RecordingOrderRepository::new(log.clone())),
      line_items: Arc::new(RecordingLineItemRepository::new(log.clone())),
      log,
    }
  }

  pub fn service(&self) -> OrderService {
    OrderService::new(self.orders.clone(), self.line_items.clone())
  }

  pub fn service_with(&self, config: ServiceConfig) -> OrderService {
    OrderService::with_config(self.orders.clone(), self.line_items.clone(), config)
  }

  /// Stores an order with `line_item_count` line items directly in the inner
  /// repositories, bypassing the call log.
  pub async fn seed_order(&self, status: OrderStatus, line_item_count: i32) -> Order {
    let mut order = self
      .orders
      .inner
      .create_order(Order::pending(42, Vec::new()))
      .await
      .unwrap();
    order.order_status = status;
    self.orders.inner.update_order(order.clone()).await.unwrap();

    for n in 0..line_item_count {
      let mut item = OrderLineItem::new(100 + n, n + 1);
      item.order_id = order.order_id;
      let stored = self.line_items.inner.create_order_line_item(item).await.unwrap();
      order.order_line_items.push(stored);
    }
    order
  }

  /// The bare order record as the order repository holds it.
  pub async fn stored_order(&self, order_id: OrderId) -> Option<Order> {
    self.orders.inner.get_order(order_id).await.unwrap()
  }

  pub fn calls(&self) -> Vec<String> {
    self.log.lock().clone()
  }

  pub fn clear_calls(&self) {
    self.log.lock().clear();
  }
}

pub fn line_items(count: i32) -> Vec<OrderLineItem> {
  (0..count).map(|n| OrderLineItem::new(500 + n, n + 1)).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
