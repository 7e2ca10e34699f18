//! Conversion between a [`Table`] and the sheet's 2-D grid of strings.

use prospect_core::{Field, Record, Table};

/// A worksheet as rows of cells. Rows may be ragged.
pub type Grid = Vec<Vec<String>>;

/// Header row followed by one row per record, values in column order.
///
/// A record whose values are all empty encodes as a row of empty cells. The
/// hosted values API does not return trailing rows like that, so such a
/// record at the end of the table is gone after the next load.
pub fn encode(table: &Table) -> Grid {
  let mut grid = Vec::with_capacity(table.len() + 1);
  grid.push(Field::header());
  grid.extend(
    table
      .iter()
      .map(|r| r.values().map(str::to_owned).collect::<Vec<_>>()),
  );
  grid
}

/// Interpret row 0 as the header and each following row as a record.
///
/// Columns are matched to fields by header label. Unknown columns are
/// ignored; fields with no column, and cells past the end of a short row,
/// read as empty. A missing column is logged, never an error, so a sheet
/// with no `Status` column counts every record as open.
///
/// The grid is taken as the service returns it, so trailing all-empty rows
/// have already been dropped.
pub fn decode(grid: &[Vec<String>]) -> Table {
  let Some((header, rows)) = grid.split_first() else {
    return Table::new();
  };

  let columns: Vec<Option<Field>> =
    header.iter().map(|h| Field::from_label(h)).collect();

  let missing: Vec<&str> = Field::ALL
    .iter()
    .filter(|f| !columns.contains(&Some(**f)))
    .map(|f| f.label())
    .collect();
  if !missing.is_empty() {
    tracing::warn!(?missing, "sheet header lacks columns; reading them as empty");
  }

  rows
    .iter()
    .map(|row| {
      columns
        .iter()
        .zip(row)
        .filter_map(|(col, cell)| col.map(|f| (f, cell.as_str())))
        .collect::<Record>()
    })
    .collect()
}
