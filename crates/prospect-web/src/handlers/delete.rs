//! Delete handler: remove a record by position.
//!
//! Position is the only identity a record has, so a position taken from a
//! page rendered before another write may now point at a different record.

use axum::{
  extract::{Path, State},
  response::Redirect,
};
use prospect_core::{Table, store::SheetStore};

use crate::{AppState, error::Error};

/// `GET /delete/{position}`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(position): Path<usize>,
) -> Result<Redirect, Error>
where
  S: SheetStore + Clone + 'static,
{
  delete_prospect(state.store.as_ref(), position).await?;
  Ok(Redirect::to("/"))
}

/// Load the table, remove the record at `position`, and save the result.
///
/// An out-of-range position fails before anything is written.
pub async fn delete_prospect<S: SheetStore>(
  store: &S,
  position: usize,
) -> Result<Table, Error> {
  let table = store.load().await.map_err(|e| Error::Store(Box::new(e)))?;
  let table = table.without(position)?;
  store.save(&table).await.map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(position, remaining = table.len(), "deleted prospect");
  Ok(table)
}
