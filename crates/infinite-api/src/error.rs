//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::headers::{CORS_HEADERS, JSON_CONTENT_TYPE};

/// An error returned by an API handler.
///
/// Every variant renders as the same generic `500`; the detail only reaches
/// the log.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("malformed record: {0}")]
  Record(#[from] infinite_core::Error),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "request failed");
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      CORS_HEADERS,
      [JSON_CONTENT_TYPE],
      Json(json!({ "error": "Internal Server Error" })),
    )
      .into_response()
  }
}
