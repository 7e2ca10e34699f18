//! [`GoogleSheet`], the Google Sheets implementation of [`SheetStore`].

use std::sync::Arc;

use prospect_core::{Table, store::SheetStore};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  Error, Result, auth,
  config::SheetConfig,
  error::json_body,
  grid::{self, Grid},
};

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FileList {
  #[serde(default)]
  files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
  id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
  #[serde(default)]
  sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
  properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
  title: String,
  #[serde(default)]
  index: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
  #[serde(default)]
  value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
  #[serde(default)]
  values: Vec<Vec<Value>>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An authorised handle on the first worksheet, valid for one call.
struct Worksheet {
  token:          String,
  spreadsheet_id: String,
  title:          String,
}

impl Worksheet {
  /// A1 range covering the whole worksheet.
  fn range(&self) -> String { format!("'{}'", self.title.replace('\'', "''")) }
}

/// The spreadsheet named in [`SheetConfig`], accessed over the Sheets and
/// Drive REST APIs with a service account.
///
/// Every [`load`](SheetStore::load) and [`save`](SheetStore::save)
/// re-reads the key file, fetches a fresh token, and re-opens the sheet by
/// name. Failures are returned as-is; nothing is retried.
///
/// Cloning is cheap; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GoogleSheet {
  client: Client,
  config: Arc<SheetConfig>,
}

impl GoogleSheet {
  pub fn new(config: SheetConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
      builder = builder.timeout(timeout);
    }
    let client = builder.build()?;
    Ok(Self { client, config: Arc::new(config) })
  }

  fn sheets_url(&self, spreadsheet_id: &str, suffix: &str) -> String {
    format!(
      "{}/spreadsheets/{spreadsheet_id}{suffix}",
      self.config.sheets_base_url.trim_end_matches('/'),
    )
  }

  /// Authorise and resolve the first worksheet of the configured
  /// spreadsheet.
  async fn open(&self) -> Result<Worksheet> {
    let token = auth::access_token(&self.client, &self.config.credentials_path).await?;

    let spreadsheet_id = match &self.config.spreadsheet_id {
      Some(id) => id.clone(),
      None => self.find_by_name(&token).await?,
    };

    let resp = send(
      self
        .client
        .get(self.sheets_url(&spreadsheet_id, ""))
        .query(&[("fields", "sheets.properties(title,index)")]),
      &token,
    )
    .await?;
    let meta: SpreadsheetMeta = json_body(resp).await?;

    let title = meta
      .sheets
      .into_iter()
      .map(|s| s.properties)
      .min_by_key(|p| p.index)
      .map(|p| p.title)
      .ok_or_else(|| {
        Error::NotFound(format!("spreadsheet {spreadsheet_id} has no worksheets"))
      })?;

    Ok(Worksheet { token, spreadsheet_id, title })
  }

  /// Look up the spreadsheet ID for `sheet_name` through Drive.
  async fn find_by_name(&self, token: &str) -> Result<String> {
    let name = &self.config.sheet_name;
    let q = format!(
      "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
      name.replace('\\', "\\\\").replace('\'', "\\'"),
    );
    let url = format!("{}/files", self.config.drive_base_url.trim_end_matches('/'));

    let resp = send(
      self.client.get(url).query(&[
        ("q", q.as_str()),
        ("fields", "files(id)"),
        ("pageSize", "1"),
      ]),
      token,
    )
    .await?;
    let list: FileList = json_body(resp).await?;

    list
      .files
      .into_iter()
      .next()
      .map(|f| f.id)
      .ok_or_else(|| Error::NotFound(format!("no spreadsheet named {name:?}")))
  }

  async fn read(&self, ws: &Worksheet) -> Result<Grid> {
    let range = ws.range();
    let resp = send(
      self
        .client
        .get(self.sheets_url(&ws.spreadsheet_id, "/values:batchGet"))
        .query(&[
          ("ranges", range.as_str()),
          ("majorDimension", "ROWS"),
          ("valueRenderOption", "FORMATTED_VALUE"),
        ]),
      &ws.token,
    )
    .await?;
    let resp: BatchGetResponse = json_body(resp).await?;

    Ok(
      resp
        .value_ranges
        .into_iter()
        .next()
        .map(|vr| {
          vr.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
        })
        .unwrap_or_default(),
    )
  }

  async fn clear(&self, ws: &Worksheet) -> Result<()> {
    send(
      self
        .client
        .post(self.sheets_url(&ws.spreadsheet_id, "/values:batchClear"))
        .json(&json!({ "ranges": [ws.range()] })),
      &ws.token,
    )
    .await?;
    Ok(())
  }

  async fn write(&self, ws: &Worksheet, grid: &Grid) -> Result<()> {
    send(
      self
        .client
        .post(self.sheets_url(&ws.spreadsheet_id, "/values:batchUpdate"))
        .json(&json!({
          "valueInputOption": "RAW",
          "data": [{
            "range":          format!("{}!A1", ws.range()),
            "majorDimension": "ROWS",
            "values":         grid,
          }],
        })),
      &ws.token,
    )
    .await?;
    Ok(())
  }
}

impl SheetStore for GoogleSheet {
  type Error = Error;

  async fn load(&self) -> Result<Table> {
    let ws = self.open().await?;
    let grid = self.read(&ws).await?;
    let table = grid::decode(&grid);
    tracing::debug!(
      spreadsheet = %ws.spreadsheet_id,
      worksheet = %ws.title,
      records = table.len(),
      "loaded sheet"
    );
    Ok(table)
  }

  async fn save(&self, table: &Table) -> Result<()> {
    let ws = self.open().await?;
    let grid = grid::encode(table);
    self.clear(&ws).await?;
    self.write(&ws, &grid).await.inspect_err(|e| {
      tracing::error!(
        spreadsheet = %ws.spreadsheet_id,
        transient = e.is_transient(),
        error = %e,
        "write failed after clear; sheet is empty"
      );
    })?;
    tracing::info!(
      spreadsheet = %ws.spreadsheet_id,
      worksheet = %ws.title,
      records = table.len(),
      "saved sheet"
    );
    Ok(())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attach the bearer token, send, and turn a non-success status into an
/// error.
async fn send(req: RequestBuilder, token: &str) -> Result<Response> {
  let resp = req.bearer_auth(token).send().await?;
  let status = resp.status();
  if status.is_success() {
    Ok(resp)
  } else {
    let body = resp.text().await.unwrap_or_default();
    Err(Error::from_status(status, body))
  }
}

/// Formatted values arrive as strings; anything else is stringified.
fn cell_to_string(cell: Value) -> String {
  match cell {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  }
}
