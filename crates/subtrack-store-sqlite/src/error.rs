//! Error type for `subtrack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("stored date is malformed: {0}")]
  MonthYear(#[from] subtrack_core::month_year::MonthYearError),

  #[error("subscription not found: {0}")]
  NotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything except a missing row is a storage failure to callers of the
/// core trait.
impl From<Error> for subtrack_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::NotFound(id) => subtrack_core::Error::NotFound(id),
      other => subtrack_core::Error::storage(other),
    }
  }
}
