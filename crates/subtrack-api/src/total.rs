//! Handler for `GET /subscriptions/total`.
//!
//! `start_date` and `end_date` (both `MM-YYYY`) are required. `user_id` and
//! `service_name` are optional equality filters; an empty value is the same
//! as leaving the parameter out.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use subtrack_core::{
  MonthYear, SubscriptionService,
  store::{SubscriptionStore, TotalCostQuery},
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TotalParams {
  pub start_date:   Option<String>,
  pub end_date:     Option<String>,
  pub user_id:      Option<String>,
  pub service_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TotalResponse {
  pub total_sum: i64,
}

impl TryFrom<TotalParams> for TotalCostQuery {
  type Error = ApiError;

  fn try_from(params: TotalParams) -> Result<Self, Self::Error> {
    let user_id = non_empty(params.user_id)
      .map(|raw| Uuid::parse_str(&raw))
      .transpose()
      .map_err(|_| ApiError::bad_request("invalid user ID"))?;

    let (Some(start), Some(end)) = (non_empty(params.start_date), non_empty(params.end_date))
    else {
      return Err(ApiError::bad_request("start_date and end_date must be in query"));
    };

    let (Ok(start), Ok(end)) = (start.parse::<MonthYear>(), end.parse::<MonthYear>()) else {
      return Err(ApiError::bad_request("dates must be valid"));
    };

    Ok(TotalCostQuery {
      period_start: start,
      period_end: end,
      user_id,
      service_name: non_empty(params.service_name),
    })
  }
}

fn non_empty(s: Option<String>) -> Option<String> { s.filter(|s| !s.is_empty()) }

/// `GET /subscriptions/total?start_date=MM-YYYY&end_date=MM-YYYY[&user_id=...][&service_name=...]`
pub async fn handler<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
  Query(params): Query<TotalParams>,
) -> Result<Json<TotalResponse>, ApiError>
where
  S: SubscriptionStore + 'static,
{
  let query = TotalCostQuery::try_from(params)?;
  let total_sum = service.total_cost(&query).await?;
  Ok(Json(TotalResponse { total_sum }))
}
