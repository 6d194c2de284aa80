//! Field validation for incoming subscriptions.
//!
//! Every rule is checked on every call; the caller gets the full list of
//! problems in one pass.

use thiserror::Error;

use crate::{
  month_year::MonthYear,
  subscription::{NewSubscription, SubscriptionRequest},
};

const MONTH_YEAR_HINT: &str = "has invalid format, must be 'MM-YYYY'";

/// All the rule violations found in a [`SubscriptionRequest`], in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid subscription: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
  pub fn messages(&self) -> &[String] { &self.0 }

  pub fn into_messages(self) -> Vec<String> { self.0 }
}

/// Whether `s` is a well-formed `MM-YYYY` value.
pub fn is_valid_month_year(s: &str) -> bool { s.parse::<MonthYear>().is_ok() }

/// Check `req` against every rule and return one message per violated rule.
/// An empty list means the request is valid.
pub fn check_request(req: &SubscriptionRequest) -> Vec<String> {
  let mut errors = Vec::new();

  if req.service_name.is_empty() {
    errors.push("service_name is required".to_owned());
  }

  if req.price <= 0 {
    errors.push("price must be positive".to_owned());
  }

  if req.user_id.is_nil() {
    errors.push("user_id is required".to_owned());
  }

  if req.start_date.is_empty() {
    errors.push("start_date is required".to_owned());
  } else if !is_valid_month_year(&req.start_date) {
    errors.push(format!("start_date {MONTH_YEAR_HINT}"));
  }

  if let Some(end) = non_empty(req.end_date.as_deref())
    && !is_valid_month_year(end)
  {
    errors.push(format!("end_date {MONTH_YEAR_HINT}"));
  }

  errors
}

fn non_empty(s: Option<&str>) -> Option<&str> { s.filter(|s| !s.is_empty()) }

impl TryFrom<SubscriptionRequest> for NewSubscription {
  type Error = ValidationErrors;

  fn try_from(req: SubscriptionRequest) -> Result<Self, Self::Error> {
    let errors = check_request(&req);
    if !errors.is_empty() {
      return Err(ValidationErrors(errors));
    }

    let parse = |field: &str, raw: &str| {
      raw
        .parse::<MonthYear>()
        .map_err(|_| ValidationErrors(vec![format!("{field} {MONTH_YEAR_HINT}")]))
    };

    let start_date = parse("start_date", &req.start_date)?;
    let end_date = non_empty(req.end_date.as_deref())
      .map(|end| parse("end_date", end))
      .transpose()?;

    Ok(Self {
      service_name: req.service_name,
      price: req.price,
      user_id: req.user_id,
      start_date,
      end_date,
    })
  }
}
