//! Handlers for subscription CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subscriptions` | All subscriptions |
//! | `POST`   | `/subscriptions` | Body: [`SubscriptionRequest`]; returns 201 + stored record |
//! | `GET`    | `/subscription/:id` | 404 if not found |
//! | `PUT`    | `/subscription/:id` | Full replacement; returns the stored record |
//! | `DELETE` | `/subscription/:id` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use subtrack_core::{
  NewSubscription, Subscription, SubscriptionRequest, SubscriptionService,
  store::SubscriptionStore,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

/// Unwrap a JSON body, turning a rejection into a 400.
fn request_body(
  body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<NewSubscription, ApiError> {
  let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
  NewSubscription::try_from(req).map_err(|errors| {
    debug!(?errors, "rejected subscription payload");
    ApiError::from(errors)
  })
}

fn subscription_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
  path
    .map(|Path(id)| id)
    .map_err(|_| ApiError::bad_request("invalid subscription ID"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subscriptions`
pub async fn list<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
) -> Result<Json<Vec<Subscription>>, ApiError>
where
  S: SubscriptionStore + 'static,
{
  Ok(Json(service.list().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /subscriptions` — returns 201 + the stored [`Subscription`].
pub async fn create<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
  body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubscriptionStore + 'static,
{
  let input = request_body(body)?;
  let sub = service.create(input).await?;
  Ok((StatusCode::CREATED, Json(sub)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subscription/:id`
pub async fn get_one<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
  path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Subscription>, ApiError>
where
  S: SubscriptionStore + 'static,
{
  let id = subscription_id(path)?;
  Ok(Json(service.get(id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /subscription/:id` — body is the full replacement [`SubscriptionRequest`].
pub async fn update_one<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
  path: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError>
where
  S: SubscriptionStore + 'static,
{
  let id = subscription_id(path)?;
  let input = request_body(body)?;
  Ok(Json(service.update(id, input).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subscription/:id`
pub async fn delete_one<S>(
  State(service): State<Arc<SubscriptionService<S>>>,
  path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: SubscriptionStore + 'static,
{
  let id = subscription_id(path)?;
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
