//! Subscription types — the single entity tracked by the store.
//!
//! [`SubscriptionRequest`] is what a client sends. It is deliberately loose so
//! that every field problem can be reported at once by
//! [`crate::validate::check_request`]. [`NewSubscription`] is the validated,
//! typed form accepted by the store, and [`Subscription`] is a persisted row.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::month_year::MonthYear;

// ─── Persisted ───────────────────────────────────────────────────────────────

/// A user's recurring subscription to an online service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
  /// Server-assigned unless supplied at creation; never changes afterwards.
  pub id:           Uuid,
  pub service_name: String,
  /// Monetary units per billing cycle; always positive.
  pub price:        i64,
  pub user_id:      Uuid,
  pub start_date:   MonthYear,
  /// `None` means the subscription is still running.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date:     Option<MonthYear>,
}

impl Subscription {
  /// Assemble a persisted record from an id and its validated fields.
  pub fn from_parts(id: Uuid, fields: NewSubscription) -> Self {
    Self {
      id,
      service_name: fields.service_name,
      price: fields.price,
      user_id: fields.user_id,
      start_date: fields.start_date,
      end_date: fields.end_date,
    }
  }
}

// ─── Validated input ─────────────────────────────────────────────────────────

/// The mutable fields of a subscription, already validated.
///
/// Input to [`crate::store::SubscriptionStore::create`] and
/// [`crate::store::SubscriptionStore::update`]. Construct it with
/// `NewSubscription::try_from(request)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
  pub service_name: String,
  pub price:        i64,
  pub user_id:      Uuid,
  pub start_date:   MonthYear,
  pub end_date:     Option<MonthYear>,
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// A subscription exactly as a client submitted it.
///
/// Missing or `null` JSON fields fall back to empty/zero/nil values so that
/// they are reported by validation rather than rejected during
/// deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionRequest {
  #[serde(deserialize_with = "null_as_default")]
  pub service_name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub price:        i64,
  #[serde(deserialize_with = "null_as_default")]
  pub user_id:      Uuid,
  #[serde(deserialize_with = "null_as_default")]
  pub start_date:   String,
  pub end_date:     Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
