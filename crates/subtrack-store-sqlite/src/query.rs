//! [`TotalSumQuery`] — builds the `SUM(price)` statement for
//! [`SubscriptionStore::total_cost`](subtrack_core::store::SubscriptionStore::total_cost).
//!
//! Clauses are appended in a fixed order: the period overlap first, then the
//! user filter, then the service-name filter. Every value is bound to its own
//! positional parameter; only fixed clause text is ever written into the SQL.

use rusqlite::types::Value;
use subtrack_core::{MonthYear, store::TotalCostQuery};
use uuid::Uuid;

use crate::encode::{encode_month_start, encode_uuid, month_start_sql};

#[derive(Debug, Clone)]
pub struct TotalSumQuery {
  clauses: Vec<String>,
  params:  Vec<Value>,
}

impl TotalSumQuery {
  /// Build the statement for `query`, skipping inactive filters.
  pub fn from_query(query: &TotalCostQuery) -> Self {
    let mut built = Self::overlapping(query.period_start, query.period_end);
    if let Some(user_id) = query.user_filter() {
      built.push_user(user_id);
    }
    if let Some(name) = query.service_name_filter() {
      built.push_service_name(name);
    }
    built
  }

  /// Subscriptions whose `[start_date, end_date]` interval intersects
  /// `[period_start, period_end]`. A `NULL` end date is unbounded.
  fn overlapping(period_start: MonthYear, period_end: MonthYear) -> Self {
    let mut built = Self { clauses: Vec::new(), params: Vec::new() };

    let end = built.bind(encode_month_start(period_end));
    let start = built.bind(encode_month_start(period_start));
    built.clauses.push(format!(
      "{starts} <= {end} AND ({ends} >= {start} OR end_date IS NULL)",
      starts = month_start_sql("start_date"),
      ends = month_start_sql("end_date"),
    ));

    built
  }

  fn push_user(&mut self, user_id: Uuid) {
    let p = self.bind(encode_uuid(user_id));
    self.clauses.push(format!("user_id = {p}"));
  }

  fn push_service_name(&mut self, name: &str) {
    let p = self.bind(name.to_owned());
    self.clauses.push(format!("service_name = {p}"));
  }

  /// Record `value` and return its placeholder (`?1`, `?2`, …).
  fn bind(&mut self, value: impl Into<Value>) -> String {
    self.params.push(value.into());
    format!("?{}", self.params.len())
  }

  pub fn sql(&self) -> String {
    format!(
      "SELECT SUM(price) FROM subscriptions WHERE {}",
      self.clauses.join(" AND ")
    )
  }

  pub fn params(&self) -> &[Value] { &self.params }

  pub fn into_parts(self) -> (String, Vec<Value>) {
    let sql = self.sql();
    (sql, self.params)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn month(s: &str) -> MonthYear { s.parse().unwrap() }

  fn text(v: &Value) -> &str {
    match v {
      Value::Text(s) => s,
      other => panic!("expected text parameter, got {other:?}"),
    }
  }

  #[test]
  fn period_only_binds_two_parameters() {
    let q = TotalSumQuery::from_query(&TotalCostQuery::new(month("01-2025"), month("06-2025")));

    let sql = q.sql();
    assert!(sql.starts_with("SELECT SUM(price) FROM subscriptions WHERE "));
    assert!(sql.contains("<= ?1"));
    assert!(sql.contains(">= ?2 OR end_date IS NULL"));
    assert!(!sql.contains("user_id"));
    assert!(!sql.contains("service_name"));

    let params: Vec<&str> = q.params().iter().map(text).collect();
    assert_eq!(params, ["2025-06-01", "2025-01-01"]);
  }

  #[test]
  fn filters_follow_overlap_in_order() {
    let user = Uuid::new_v4();
    let q = TotalSumQuery::from_query(
      &TotalCostQuery::new(month("01-2025"), month("12-2025"))
        .with_user(user)
        .with_service_name("Netflix"),
    );

    let sql = q.sql();
    let user_at = sql.find("user_id = ?3").expect("user clause");
    let name_at = sql.find("service_name = ?4").expect("name clause");
    assert!(sql.find("end_date IS NULL").unwrap() < user_at);
    assert!(user_at < name_at);

    let params: Vec<&str> = q.params().iter().map(text).collect();
    assert_eq!(params[2], user.hyphenated().to_string());
    assert_eq!(params[3], "Netflix");
  }

  #[test]
  fn name_filter_alone_takes_third_slot() {
    let q = TotalSumQuery::from_query(
      &TotalCostQuery::new(month("01-2025"), month("12-2025"))
        .with_user(Uuid::nil())
        .with_service_name("Spotify"),
    );

    assert!(q.sql().contains("service_name = ?3"));
    assert!(!q.sql().contains("user_id"));
    assert_eq!(q.params().len(), 3);
  }

  #[test]
  fn name_is_bound_not_inlined() {
    let q = TotalSumQuery::from_query(
      &TotalCostQuery::new(month("01-2025"), month("12-2025"))
        .with_service_name("x' OR '1'='1"),
    );
    assert!(!q.sql().contains("OR '1'='1"));
  }
}
