//! Dashboard handler: open/closed counts.

use axum::{extract::State, response::Html};
use prospect_core::{store::SheetStore, summary::summarize};

use crate::{AppState, error::Error, html};

/// `GET /dashboard`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: SheetStore + Clone + 'static,
{
  let table = state
    .store
    .load()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let summary = summarize(&table);
  tracing::debug!(?summary, "summarised prospects");

  Ok(Html(html::dashboard_page(&state.config.sheet.sheet_name, &summary)))
}
