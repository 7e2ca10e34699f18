//! List, search, and add.

use std::collections::HashMap;

use axum::{
  Form,
  extract::{Query, State},
  response::{Html, Redirect},
};
use prospect_core::{Field, Record, Table, store::SheetStore};
use serde::Deserialize;

use crate::{AppState, error::Error, html};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Case-insensitive substring filter. Empty shows every record.
  #[serde(default)]
  pub q: String,
}

/// `GET /[?q=<query>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Html<String>, Error>
where
  S: SheetStore + Clone + 'static,
{
  let table = state
    .store
    .load()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  Ok(Html(html::index_page(
    &state.config.sheet.sheet_name,
    &table,
    &params.q,
  )))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// `POST /`: form body keyed by input name; redirects to the list.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, Error>
where
  S: SheetStore + Clone + 'static,
{
  add_prospect(state.store.as_ref(), record_from_form(&form)).await?;
  Ok(Redirect::to("/"))
}

/// Build a record from submitted form values. Missing inputs are empty;
/// inputs that name no field are ignored.
pub fn record_from_form(form: &HashMap<String, String>) -> Record {
  Field::ALL
    .into_iter()
    .map(|f| (f, form.get(f.input_name()).cloned().unwrap_or_default()))
    .collect()
}

/// Load the table, append `record`, and save the result.
pub async fn add_prospect<S: SheetStore>(
  store: &S,
  record: Record,
) -> Result<Table, Error> {
  let table = store.load().await.map_err(|e| Error::Store(Box::new(e)))?;
  let table = table.appended(record);
  store.save(&table).await.map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(records = table.len(), "added prospect");
  Ok(table)
}
