//! Connection settings for [`GoogleSheet`](crate::GoogleSheet).

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

pub const DEFAULT_SHEET_NAME: &str = "Prospects2";
pub const DEFAULT_CREDENTIALS_PATH: &str = "gsheet_creds.json";
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Which spreadsheet to open and how to authenticate.
///
/// Every field has a default, so an empty config section opens
/// `Prospects2` with the key file `gsheet_creds.json` in the working
/// directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
  /// Spreadsheet title, looked up through Drive.
  pub sheet_name:           String,
  /// Service-account JSON key file. Read on every call.
  pub credentials_path:     PathBuf,
  /// If set, the spreadsheet is opened by ID and `sheet_name` is not
  /// looked up.
  pub spreadsheet_id:       Option<String>,
  /// Per-request timeout. `None` leaves it to the transport.
  pub request_timeout_secs: Option<u64>,
  pub sheets_base_url:      String,
  pub drive_base_url:       String,
}

impl Default for SheetConfig {
  fn default() -> Self {
    Self {
      sheet_name:           DEFAULT_SHEET_NAME.to_string(),
      credentials_path:     PathBuf::from(DEFAULT_CREDENTIALS_PATH),
      spreadsheet_id:       None,
      request_timeout_secs: None,
      sheets_base_url:      DEFAULT_SHEETS_BASE_URL.to_string(),
      drive_base_url:       DEFAULT_DRIVE_BASE_URL.to_string(),
    }
  }
}

impl SheetConfig {
  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }
}
