//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Response bodies follow the wire contract: every failure carries
//! `{"success": false, "message": <generic>}`, and validation failures add
//! the field-error list. Internal diagnostics never leak to the caller.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use leadvault_core::validate::FieldError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed ({} errors)", .0.len())]
  Validation(Vec<FieldError>),

  #[error("malformed request body")]
  Malformed,

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store error as an internal fault.
  pub fn internal<E>(error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Internal(Box::new(error))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "success": false,
          "message": "Please correct the highlighted fields and try again.",
          "errors": errors,
        })),
      )
        .into_response(),

      ApiError::Malformed => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "success": false,
          "message": "Request body must be valid JSON.",
        })),
      )
        .into_response(),

      ApiError::Internal(error) => {
        tracing::error!(error = %error, "request failed with internal fault");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({
            "success": false,
            "message": "Something went wrong. Please try again later.",
          })),
        )
          .into_response()
      }
    }
  }
}
