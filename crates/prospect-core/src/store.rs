//! The `SheetStore` trait.
//!
//! The trait is implemented by sheet backends (e.g. `prospect-sheets`).
//! The web front-end depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::record::Table;

/// Whole-table access to the backing spreadsheet.
///
/// There is no partial read or write: every call moves the entire table.
/// Nothing guards a `load` → `save` cycle, so two interleaved cycles lose
/// the first writer's change.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SheetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every row. The first row is the header; each following row is one
  /// record.
  fn load(&self) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  /// Replace the sheet contents with the header row followed by one row per
  /// record, in column order.
  ///
  /// Not atomic: the sheet is cleared before it is written, so a failure in
  /// between leaves it empty.
  fn save<'a>(
    &'a self,
    table: &'a Table,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
