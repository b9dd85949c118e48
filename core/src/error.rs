// order_service/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
  /// A business rule rejected the request. The message is meant for the caller.
  #[error("Invalid request: {0}")]
  InvalidRequest(String),

  /// A repository collaborator failed. Carried through unchanged.
  #[error(transparent)]
  Repository(#[from] AnyhowError),

  #[error("Configuration error for '{key}': {message}")]
  Configuration { key: String, message: String },
}

impl OrderError {
  pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
    OrderError::InvalidRequest(message.into())
  }

  /// True for business-rule violations, which an enclosing layer reports as a
  /// client error rather than a server fault.
  pub fn is_invalid_request(&self) -> bool {
    matches!(self, OrderError::InvalidRequest(_))
  }

  /// The human-readable message of an `InvalidRequest`, if this is one.
  pub fn invalid_request_message(&self) -> Option<&str> {
    match self {
      OrderError::InvalidRequest(message) => Some(message.as_str()),
      _ => None,
    }
  }
}

pub type OrderResult<T, E = OrderError> = std::result::Result<T, E>;
