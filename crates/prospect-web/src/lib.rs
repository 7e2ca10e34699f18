//! Browser front-end for the prospect list.
//!
//! Exposes an axum [`Router`] serving the list/search/add page, the
//! dashboard, and delete-by-position, backed by any [`SheetStore`].

pub mod error;
pub mod handlers;
pub mod html;

pub use error::Error;

use std::sync::Arc;

use axum::{Router, routing::get};
use prospect_core::store::SheetStore;
use prospect_sheets::SheetConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{dashboard, delete, index};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5000 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `PROSPECTS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:  String,
  #[serde(default = "default_port")]
  pub port:  u16,
  #[serde(default)]
  pub sheet: SheetConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:  default_host(),
      port:  default_port(),
      sheet: SheetConfig::default(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. Read-only: the table
/// itself is never held here.
#[derive(Clone)]
pub struct AppState<S: SheetStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the prospect front-end.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SheetStore + Clone + 'static,
{
  Router::new()
    .route("/",                   get(index::list::<S>).post(index::add::<S>))
    .route("/dashboard",          get(dashboard::handler::<S>))
    .route("/delete/{position}",  get(delete::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use prospect_core::{Field, Record, Table};
  use prospect_sheets::MemorySheet;
  use tower::ServiceExt as _;

  fn make_state(store: MemorySheet) -> AppState<MemorySheet> {
    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig::default()),
    }
  }

  async fn oneshot_raw<S>(
    state:   AppState<S>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> axum::response::Response
  where
    S: SheetStore + Clone + 'static,
  {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn names(table: &Table) -> Vec<String> {
    table.iter().map(|r| r.get(Field::Name).to_owned()).collect()
  }

  fn three() -> Table {
    vec![
      Record::new().with(Field::Name, "Ann").with(Field::City, "Boston"),
      Record::new().with(Field::Name, "Bob").with(Field::City, "Denver"),
      Record::new().with(Field::Name, "Cleo").with(Field::Notes, "BOSTON office"),
    ]
    .into()
  }

  // ── List / search ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_renders_all_records() {
    let state = make_state(MemorySheet::from_table(&three()));
    let resp  = oneshot_raw(state, "GET", "/", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");

    let html = body_string(resp).await;
    for name in ["Ann", "Bob", "Cleo"] {
      assert!(html.contains(&format!("<td>{name}</td>")), "missing {name}");
    }
    assert!(html.contains("<th>Last Contacted</th>"));
  }

  #[tokio::test]
  async fn list_of_empty_sheet_renders() {
    let state = make_state(MemorySheet::new());
    let resp  = oneshot_raw(state, "GET", "/", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_string(resp).await.contains("/delete/"));
  }

  #[tokio::test]
  async fn search_filters_and_keeps_positions() {
    let state = make_state(MemorySheet::from_table(&three()));
    let resp  = oneshot_raw(state, "GET", "/?q=boston", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("<td>Ann</td>"));
    assert!(html.contains("<td>Cleo</td>"));
    assert!(!html.contains("<td>Bob</td>"));
    assert!(html.contains("href=\"/delete/2\""));
    assert!(!html.contains("href=\"/delete/1\""));
  }

  // ── Add ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_adds_record_and_redirects() {
    let store = MemorySheet::new();
    let state = make_state(store.clone());
    let resp  = oneshot_raw(
      state,
      "POST",
      "/",
      vec![(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
      "name=Ann&phone=555&next_step=Call+back&notes=likes+%3Ctea%3E",
    ).await;
    assert!(resp.status().is_redirection(), "status: {}", resp.status());
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let table = store.load().await.unwrap();
    assert_eq!(table.len(), 1);
    let r = table.get(0).unwrap();
    assert_eq!(r.get(Field::Name), "Ann");
    assert_eq!(r.get(Field::Phone), "555");
    assert_eq!(r.get(Field::NextStep), "Call back");
    assert_eq!(r.get(Field::Notes), "likes <tea>");
    assert_eq!(r.get(Field::Status), "");
    assert_eq!(store.grid().await[0], Field::header());
  }

  #[tokio::test]
  async fn added_values_are_escaped_in_the_list() {
    let store = MemorySheet::new();
    oneshot_raw(
      make_state(store.clone()),
      "POST",
      "/",
      vec![(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
      "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
    ).await;

    let html = body_string(oneshot_raw(make_state(store), "GET", "/", vec![], "").await).await;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert"));
  }

  // ── Dashboard ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_counts_statuses() {
    let table: Table = ["Closed", "closed", "Open", "", "New"]
      .into_iter()
      .map(|s| Record::new().with(Field::Status, s))
      .collect();
    let state = make_state(MemorySheet::from_table(&table));
    let resp  = oneshot_raw(state, "GET", "/dashboard", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("<dd id=\"total\">5</dd>"), "{html}");
    assert!(html.contains("<dd id=\"closed\">2</dd>"));
    assert!(html.contains("<dd id=\"open\">3</dd>"));
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_removes_record_and_redirects() {
    let store = MemorySheet::from_table(&three());
    let resp  = oneshot_raw(make_state(store.clone()), "GET", "/delete/1", vec![], "").await;
    assert!(resp.status().is_redirection(), "status: {}", resp.status());
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let table = store.load().await.unwrap();
    assert_eq!(names(&table), ["Ann", "Cleo"]);
  }

  #[tokio::test]
  async fn delete_out_of_range_is_server_error() {
    let store  = MemorySheet::from_table(&three());
    let before = store.grid().await;
    let resp   = oneshot_raw(make_state(store.clone()), "GET", "/delete/3", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).await.contains("out of range"));
    assert_eq!(store.grid().await, before);
  }

  #[tokio::test]
  async fn delete_non_integer_position_is_rejected() {
    let state = make_state(MemorySheet::from_table(&three()));
    let resp  = oneshot_raw(state, "GET", "/delete/first", vec![], "").await;
    assert!(resp.status().is_client_error(), "status: {}", resp.status());
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[derive(Clone)]
  struct MissingSheet;

  impl SheetStore for MissingSheet {
    type Error = prospect_sheets::Error;

    async fn load(&self) -> Result<Table, Self::Error> {
      Err(prospect_sheets::Error::NotFound("no spreadsheet named \"Prospects2\"".into()))
    }

    async fn save(&self, _table: &Table) -> Result<(), Self::Error> {
      Err(prospect_sheets::Error::NotFound("no spreadsheet named \"Prospects2\"".into()))
    }
  }

  #[tokio::test]
  async fn store_failures_surface_as_server_errors() {
    for (method, uri) in [("GET", "/"), ("GET", "/dashboard"), ("GET", "/delete/0")] {
      let state = AppState {
        store:  Arc::new(MissingSheet),
        config: Arc::new(ServerConfig::default()),
      };
      let resp = oneshot_raw(state, method, uri, vec![], "").await;
      assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    }
  }
}
