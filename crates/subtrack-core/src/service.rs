//! [`SubscriptionService`] — the orchestration layer used by transports.
//!
//! The service adds no rules of its own; it forwards to the store and logs
//! outcomes so that adapters only deal with one type.

use tracing::{error, info};
use uuid::Uuid;

use crate::{
  Error, Result,
  store::{SubscriptionStore, TotalCostQuery},
  subscription::{NewSubscription, Subscription},
};

/// Subscription operations over any [`SubscriptionStore`].
#[derive(Debug, Clone)]
pub struct SubscriptionService<S> {
  store: S,
}

impl<S: SubscriptionStore> SubscriptionService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewSubscription) -> Result<Subscription> {
    let sub = self.store.create(input).await.inspect_err(log_failure("create"))?;
    info!(id = %sub.id, user_id = %sub.user_id, "created subscription");
    Ok(sub)
  }

  pub async fn get(&self, id: Uuid) -> Result<Subscription> {
    self.store.get(id).await.inspect_err(log_failure("get"))
  }

  /// Replace the subscription `id` and return what is now stored.
  ///
  /// The write and the read-back happen atomically inside the store, so a
  /// concurrent delete surfaces as [`Error::NotFound`] rather than a partial
  /// update.
  pub async fn update(&self, id: Uuid, input: NewSubscription) -> Result<Subscription> {
    let sub = self.store.update(id, input).await.inspect_err(log_failure("update"))?;
    info!(%id, "updated subscription");
    Ok(sub)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(id).await.inspect_err(log_failure("delete"))?;
    info!(%id, "deleted subscription");
    Ok(())
  }

  pub async fn list(&self) -> Result<Vec<Subscription>> {
    self.store.list().await.inspect_err(log_failure("list"))
  }

  pub async fn total_cost(&self, query: &TotalCostQuery) -> Result<i64> {
    let total = self
      .store
      .total_cost(query)
      .await
      .inspect_err(log_failure("total_cost"))?;
    info!(
      period_start = %query.period_start,
      period_end = %query.period_end,
      total,
      "computed total cost"
    );
    Ok(total)
  }
}

/// Not-found is an expected outcome; only storage failures are errors.
fn log_failure(op: &'static str) -> impl Fn(&Error) {
  move |err: &Error| {
    if let Error::Storage(source) = err {
      error!(op, error = %source, "storage failure");
    }
  }
}
