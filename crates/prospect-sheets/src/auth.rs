//! Service-account authentication.
//!
//! Each call reads the JSON key file, signs a short-lived RS256 assertion,
//! and trades it at the key's `token_uri` for a bearer token. Nothing is
//! cached between calls.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::json_body};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Scopes requested for every token.
pub const SCOPES: [&str; 2] = [
  "https://spreadsheets.google.com/feeds",
  "https://www.googleapis.com/auth/drive",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

// ─── Key file ────────────────────────────────────────────────────────────────

/// The fields of a service-account JSON key that the token exchange uses.
/// Other fields in the file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
  pub client_email: String,
  pub private_key:  String,
  #[serde(default = "default_token_uri")]
  pub token_uri:    String,
}

fn default_token_uri() -> String { DEFAULT_TOKEN_URI.to_string() }

#[derive(Debug, Serialize)]
struct Claims<'a> {
  iss:   &'a str,
  scope: String,
  aud:   &'a str,
  iat:   i64,
  exp:   i64,
}

impl ServiceAccountKey {
  /// Read and parse a key file. Any failure is an [`Error::Auth`].
  pub async fn from_file(path: &Path) -> Result<Self> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
      Error::Auth(format!("cannot read credentials {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
      Error::Auth(format!("malformed credentials {}: {e}", path.display()))
    })
  }

  /// A signed JWT asserting this account's identity, valid for one hour
  /// from `now`.
  pub fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
    let iat = now.timestamp();
    let claims = Claims {
      iss:   &self.client_email,
      scope: SCOPES.join(" "),
      aud:   &self.token_uri,
      iat,
      exp:   (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
    };
    let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
      .map_err(|e| Error::Auth(format!("invalid private key: {e}")))?;
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
      .map_err(|e| Error::Auth(format!("cannot sign assertion: {e}")))
  }
}

// ─── Token exchange ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
  access_token: String,
}

/// Read the key at `path` and exchange it for a bearer token.
///
/// A 4xx from the token endpoint means the assertion was refused and maps to
/// [`Error::Auth`]; anything else non-successful is a service error.
pub async fn access_token(client: &Client, path: &Path) -> Result<String> {
  let key = ServiceAccountKey::from_file(path).await?;
  let assertion = key.assertion(Utc::now())?;

  let resp = client
    .post(&key.token_uri)
    .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
    .send()
    .await?;

  let status = resp.status();
  if status.is_client_error() {
    let body = resp.text().await.unwrap_or_default();
    return Err(Error::Auth(format!("token request refused ({status}): {body}")));
  }
  if !status.is_success() {
    let body = resp.text().await.unwrap_or_default();
    return Err(Error::from_status(status, body));
  }

  let token: TokenResponse = json_body(resp).await?;
  tracing::debug!(account = %key.client_email, "obtained access token");
  Ok(token.access_token)
}
