//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings. Month-year dates are
//! stored as `MM-YYYY`; query parameters that are compared against them use
//! the first day of the month as `YYYY-MM-DD`.

use subtrack_core::{MonthYear, Subscription};
use uuid::Uuid;

use crate::Result;

/// Column list shared by every `SELECT` that feeds [`RawSubscription::from_row`].
pub const SELECT_SUBSCRIPTION: &str =
  "SELECT id, service_name, price, user_id, start_date, end_date FROM subscriptions";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── MonthYear ───────────────────────────────────────────────────────────────

pub fn encode_month_year(m: MonthYear) -> String { m.to_string() }

pub fn decode_month_year(s: &str) -> Result<MonthYear> { Ok(s.parse::<MonthYear>()?) }

/// `YYYY-MM-01` for `m`; the form produced by [`month_start_sql`].
pub fn encode_month_start(m: MonthYear) -> String {
  m.first_day().format("%Y-%m-%d").to_string()
}

/// SQL expression normalising a `MM-YYYY` column to `YYYY-MM-01`.
///
/// Evaluates to `NULL` when the column is `NULL`.
pub fn month_start_sql(column: &str) -> String {
  format!("date(substr({column}, 4, 4) || '-' || substr({column}, 1, 2) || '-01')")
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `subscriptions` row.
pub struct RawSubscription {
  pub id:           String,
  pub service_name: String,
  pub price:        i64,
  pub user_id:      String,
  pub start_date:   String,
  pub end_date:     Option<String>,
}

impl RawSubscription {
  /// Row mapper for statements built on [`SELECT_SUBSCRIPTION`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      service_name: row.get(1)?,
      price:        row.get(2)?,
      user_id:      row.get(3)?,
      start_date:   row.get(4)?,
      end_date:     row.get(5)?,
    })
  }

  pub fn into_subscription(self) -> Result<Subscription> {
    Ok(Subscription {
      id:           decode_uuid(&self.id)?,
      service_name: self.service_name,
      price:        self.price,
      user_id:      decode_uuid(&self.user_id)?,
      start_date:   decode_month_year(&self.start_date)?,
      end_date:     self.end_date.as_deref().map(decode_month_year).transpose()?,
    })
  }
}
