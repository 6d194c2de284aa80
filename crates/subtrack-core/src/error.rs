//! Error types for `subtrack-core`.
//!
//! Store operations fail in exactly two ways: the targeted subscription does
//! not exist, or the storage layer failed. Backends convert their own errors
//! into this enum at the [`crate::store::SubscriptionStore`] boundary.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subscription not found: {0}")]
  NotFound(Uuid),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
