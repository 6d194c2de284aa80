//! The `SubscriptionStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `subtrack-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  month_year::MonthYear,
  subscription::{NewSubscription, Subscription},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`SubscriptionStore::total_cost`].
///
/// A subscription counts towards the total when its active interval overlaps
/// `[period_start, period_end]` and it passes every active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalCostQuery {
  pub period_start: MonthYear,
  pub period_end:   MonthYear,
  /// Equality filter on the owning user. `None` and the nil UUID disable it.
  pub user_id:      Option<Uuid>,
  /// Equality filter on the service name. `None` and `""` disable it.
  pub service_name: Option<String>,
}

impl TotalCostQuery {
  /// A query over `[period_start, period_end]` with no filters.
  pub fn new(period_start: MonthYear, period_end: MonthYear) -> Self {
    Self { period_start, period_end, user_id: None, service_name: None }
  }

  pub fn with_user(mut self, user_id: Uuid) -> Self {
    self.user_id = Some(user_id);
    self
  }

  pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
    self.service_name = Some(name.into());
    self
  }

  /// The user filter, if it is active.
  pub fn user_filter(&self) -> Option<Uuid> {
    self.user_id.filter(|id| !id.is_nil())
  }

  /// The service-name filter, if it is active.
  pub fn service_name_filter(&self) -> Option<&str> {
    self.service_name.as_deref().filter(|name| !name.is_empty())
  }

  /// Whether `sub` would be counted by this query.
  ///
  /// Reference form of the predicate that store backends evaluate in their
  /// own query language; backend tests compare their totals against it.
  pub fn matches(&self, sub: &Subscription) -> bool {
    sub.start_date <= self.period_end
      && sub.end_date.is_none_or(|end| end >= self.period_start)
      && self.user_filter().is_none_or(|id| sub.user_id == id)
      && self.service_name_filter().is_none_or(|name| sub.service_name == name)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a subscription store backend.
///
/// Every operation is a single atomic unit against the backend. Failures are
/// reported as [`crate::Error::NotFound`] when the targeted id has no row and
/// [`crate::Error::Storage`] for everything else.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SubscriptionStore: Send + Sync {
  /// Persist a new subscription under a freshly generated id.
  fn create(
    &self,
    input: NewSubscription,
  ) -> impl Future<Output = Result<Subscription>> + Send + '_;

  /// Persist a new subscription under a caller-supplied id.
  ///
  /// The nil UUID is treated as "no id supplied" and replaced with a fresh
  /// one. Fails with a storage error if the id is already taken.
  fn create_with_id(
    &self,
    id: Uuid,
    input: NewSubscription,
  ) -> impl Future<Output = Result<Subscription>> + Send + '_;

  /// Retrieve a subscription by id.
  fn get(&self, id: Uuid) -> impl Future<Output = Result<Subscription>> + Send + '_;

  /// Replace every mutable field of the subscription `id` and return the
  /// stored result. The id itself never changes.
  fn update(
    &self,
    id: Uuid,
    input: NewSubscription,
  ) -> impl Future<Output = Result<Subscription>> + Send + '_;

  /// Remove the subscription `id`.
  fn delete(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;

  /// Every stored subscription, in a stable order. May be empty.
  fn list(&self) -> impl Future<Output = Result<Vec<Subscription>>> + Send + '_;

  /// Sum of `price` over every subscription matching `query`; `0` when
  /// nothing matches.
  fn total_cost<'a>(
    &'a self,
    query: &'a TotalCostQuery,
  ) -> impl Future<Output = Result<i64>> + Send + 'a;
}
