//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"errors": ["..."]}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use subtrack_core::validate::ValidationErrors;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {}", .0.join("; "))]
  BadRequest(Vec<String>),

  #[error("store error: {0}")]
  Store(#[source] subtrack_core::Error),
}

impl ApiError {
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::BadRequest(vec![message.into()])
  }
}

impl From<subtrack_core::Error> for ApiError {
  fn from(err: subtrack_core::Error) -> Self {
    match err {
      subtrack_core::Error::NotFound(_) => Self::NotFound("subscription not found".to_owned()),
      other => Self::Store(other),
    }
  }
}

impl From<ValidationErrors> for ApiError {
  fn from(err: ValidationErrors) -> Self { Self::BadRequest(err.into_messages()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, messages) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, vec![m]),
      ApiError::BadRequest(ms) => (StatusCode::BAD_REQUEST, ms),
      ApiError::Store(e) => {
        // Details stay in the log; clients get a generic message.
        tracing::error!(error = %e, "request failed in the store");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          vec!["internal error occurred".to_owned()],
        )
      }
    };
    (status, Json(json!({ "errors": messages }))).into_response()
  }
}
