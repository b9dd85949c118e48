// order_service/src/config.rs

use crate::error::{OrderError, OrderResult};
use std::env;
use std::num::NonZeroUsize;

pub const LINE_ITEM_CONCURRENCY_VAR: &str = "ORDER_SERVICE_LINE_ITEM_CONCURRENCY";

/// Tunables for `OrderService`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
  /// Upper bound on line-item writes in flight during `create_order`.
  /// `None` issues all of them at once.
  pub line_item_concurrency: Option<NonZeroUsize>,
}

impl ServiceConfig {
  /// Reads the configuration from the process environment.
  ///
  /// An unset or blank `ORDER_SERVICE_LINE_ITEM_CONCURRENCY` means unbounded.
  /// Loading a `.env` file, if wanted, is the caller's business.
  pub fn from_env() -> OrderResult<Self> {
    let line_item_concurrency = match env::var(LINE_ITEM_CONCURRENCY_VAR) {
      Ok(raw) => parse_concurrency(&raw)?,
      Err(env::VarError::NotPresent) => None,
      Err(e) => {
        return Err(OrderError::Configuration {
          key: LINE_ITEM_CONCURRENCY_VAR.to_string(),
          message: e.to_string(),
        })
      }
    };

    tracing::debug!(?line_item_concurrency, "Order service configuration loaded.");
    Ok(Self { line_item_concurrency })
  }

  /// Caps concurrent line-item writes at `limit`. A limit of 0 lifts the cap.
  pub fn with_line_item_concurrency(mut self, limit: usize) -> Self {
    self.line_item_concurrency = NonZeroUsize::new(limit);
    self
  }
}

fn parse_concurrency(raw: &str) -> OrderResult<Option<NonZeroUsize>> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  match trimmed.parse::<usize>() {
    Ok(limit) => match NonZeroUsize::new(limit) {
      Some(limit) => Ok(Some(limit)),
      None => Err(OrderError::Configuration {
        key: LINE_ITEM_CONCURRENCY_VAR.to_string(),
        message: "must be at least 1".to_string(),
      }),
    },
    Err(e) => Err(OrderError::Configuration {
      key: LINE_ITEM_CONCURRENCY_VAR.to_string(),
      message: format!("invalid value '{}': {}", trimmed, e),
    }),
  }
}
