//! Core types and trait definitions for the subtrack subscription service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod month_year;
pub mod service;
pub mod store;
pub mod subscription;
pub mod validate;

pub use error::{Error, Result};
pub use month_year::MonthYear;
pub use service::SubscriptionService;
pub use subscription::{NewSubscription, Subscription, SubscriptionRequest};
