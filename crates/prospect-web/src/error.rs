//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// Anything that can fail while serving a request.
///
/// None of these is recovered: each becomes a plain-text
/// `500 Internal Server Error` with no retry.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] prospect_core::Error),
  #[error("sheet error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
  }
}
