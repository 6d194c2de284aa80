//! JSON REST API for subtrack.
//!
//! Exposes an axum [`Router`] backed by a [`SubscriptionService`] over any
//! [`subtrack_core::store::SubscriptionStore`]. TLS, tracing middleware and
//! the listener are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let service = Arc::new(SubscriptionService::new(store));
//! axum::serve(listener, subtrack_api::api_router(service)).await?;
//! ```

pub mod error;
pub mod subscriptions;
pub mod total;

use std::sync::Arc;

use axum::{Router, routing::get};
use subtrack_core::{SubscriptionService, store::SubscriptionStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<SubscriptionService<S>>) -> Router<()>
where
  S: SubscriptionStore + 'static,
{
  Router::new()
    .route(
      "/subscriptions",
      get(subscriptions::list::<S>).post(subscriptions::create::<S>),
    )
    .route("/subscriptions/total", get(total::handler::<S>))
    .route(
      "/subscription/{id}",
      get(subscriptions::get_one::<S>)
        .put(subscriptions::update_one::<S>)
        .delete(subscriptions::delete_one::<S>),
    )
    .with_state(service)
}
