//! SQLite backend for the subtrack subscription store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use query::TotalSumQuery;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
