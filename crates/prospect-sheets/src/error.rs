//! Error type for `prospect-sheets`.

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Credentials are missing, unreadable, malformed, or were rejected.
  #[error("authentication failed: {0}")]
  Auth(String),

  /// The named spreadsheet (or a worksheet in it) does not exist.
  #[error("spreadsheet not found: {0}")]
  NotFound(String),

  /// The request or its response body failed in transport: DNS, connect,
  /// TLS, timeout, or a body cut off mid-read.
  #[error("transient transport error: {0}")]
  Transient(#[from] reqwest::Error),

  /// The service answered with a non-success status other than auth or
  /// not-found.
  #[error("spreadsheet service returned {status}: {message}")]
  Service { status: u16, message: String },

  /// The service answered with success but a body that is not the expected
  /// JSON.
  #[error("unexpected response body: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  /// Whether retrying the same call might succeed.
  pub fn is_transient(&self) -> bool {
    matches!(self, Self::Transient(_) | Self::Service { .. })
  }

  /// Map a non-success HTTP status from the service to an error.
  pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
    match status.as_u16() {
      401 | 403 => Self::Auth(message),
      404 => Self::NotFound(message),
      code => Self::Service { status: code, message },
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read a successful response body as JSON.
pub(crate) async fn json_body<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let bytes = resp.bytes().await?;
  Ok(serde_json::from_slice(&bytes)?)
}
