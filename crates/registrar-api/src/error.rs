//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use registrar_core::{ErrorKind, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store error: domain rejections keep their message, anything
  /// else is a storage failure.
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.rejection() {
      Some(rejection) => Self::from(rejection),
      None => {
        tracing::error!(error = %err, "store failure");
        Self::Store(Box::new(err))
      }
    }
  }
}

impl From<&registrar_core::Error> for ApiError {
  fn from(err: &registrar_core::Error) -> Self {
    let message = err.to_string();
    match err.kind() {
      ErrorKind::Validation => Self::BadRequest(message),
      ErrorKind::NotFound => Self::NotFound(message),
      ErrorKind::Conflict => Self::Conflict(message),
    }
  }
}

impl From<registrar_core::Error> for ApiError {
  fn from(err: registrar_core::Error) -> Self { Self::from(&err) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
