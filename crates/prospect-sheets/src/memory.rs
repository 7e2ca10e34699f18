//! [`MemorySheet`], an in-process stand-in for the spreadsheet.

use std::{convert::Infallible, sync::Arc};

use prospect_core::{Table, store::SheetStore};
use tokio::sync::Mutex;

use crate::grid::{self, Grid};

/// A sheet held in process memory.
///
/// Stores the raw grid and runs the same codec as the Google backend, so a
/// table goes through the header/row encoding on every save and load. Like
/// the real sheet it offers no transaction: `load` and `save` are separate
/// calls and interleaved writers overwrite each other.
///
/// Cloning is cheap: clones share the same grid.
#[derive(Clone, Default)]
pub struct MemorySheet {
  grid: Arc<Mutex<Grid>>,
}

impl MemorySheet {
  /// An empty sheet: no header, no rows.
  pub fn new() -> Self { Self::default() }

  /// A sheet seeded with a raw grid, e.g. one with a non-canonical header.
  pub fn from_grid(grid: Grid) -> Self {
    Self { grid: Arc::new(Mutex::new(grid)) }
  }

  /// A sheet seeded with an encoded table.
  pub fn from_table(table: &Table) -> Self { Self::from_grid(grid::encode(table)) }

  /// A copy of the raw grid as last saved.
  pub async fn grid(&self) -> Grid { self.grid.lock().await.clone() }
}

impl SheetStore for MemorySheet {
  type Error = Infallible;

  async fn load(&self) -> Result<Table, Self::Error> {
    Ok(grid::decode(&self.grid.lock().await))
  }

  async fn save(&self, table: &Table) -> Result<(), Self::Error> {
    let encoded = grid::encode(table);
    let mut grid = self.grid.lock().await;
    *grid = encoded;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use prospect_core::{Field, Record};

  use super::*;

  fn table(names: &[&str]) -> Table {
    names
      .iter()
      .map(|n| Record::new().with(Field::Name, *n).with(Field::City, "Lyon"))
      .collect()
  }

  #[tokio::test]
  async fn new_sheet_loads_empty() {
    let sheet = MemorySheet::new();
    assert!(sheet.load().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn save_then_load_round_trips() {
    let sheet = MemorySheet::new();
    let t = table(&["Ann", "Bob", "Cleo"]);
    sheet.save(&t).await.unwrap();
    assert_eq!(sheet.load().await.unwrap(), t);
  }

  #[tokio::test]
  async fn save_writes_canonical_header() {
    let sheet = MemorySheet::from_grid(vec![
      vec!["Name".into(), "Extra".into()],
      vec!["Ann".into(), "x".into()],
    ]);
    let t = sheet.load().await.unwrap();
    sheet.save(&t).await.unwrap();
    let grid = sheet.grid().await;
    assert_eq!(grid[0], Field::header());
    assert_eq!(grid.len(), 2);
  }

  #[tokio::test]
  async fn interleaved_writers_lose_the_first_update() {
    let sheet = MemorySheet::from_table(&table(&["Ann"]));

    let first = sheet.load().await.unwrap();
    let second = sheet.load().await.unwrap();

    let first = first.appended(Record::new().with(Field::Name, "From first"));
    let second = second.appended(Record::new().with(Field::Name, "From second"));

    sheet.save(&first).await.unwrap();
    sheet.save(&second).await.unwrap();

    let names: Vec<String> = sheet
      .load()
      .await
      .unwrap()
      .iter()
      .map(|r| r.get(Field::Name).to_owned())
      .collect();
    assert_eq!(names, ["Ann", "From second"]);
  }
}
