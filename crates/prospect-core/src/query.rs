//! Case-insensitive substring search across all fields of a record.
//!
//! A linear scan; there is no index.

use crate::record::{Record, Table};

/// Whether `record` matches an already-lowercased `needle`.
fn matches_lowered(record: &Record, needle: &str) -> bool {
  record.concatenated().to_lowercase().contains(needle)
}

/// Whether `record` contains `query`, ignoring case, anywhere in the
/// concatenation of its values. The empty query matches everything.
pub fn matches(record: &Record, query: &str) -> bool {
  matches_lowered(record, &query.to_lowercase())
}

/// Records matching `query`, each paired with its position in `table`.
///
/// Positions are those of the unfiltered table, so they remain valid
/// arguments for a delete.
pub fn matching<'a>(
  table: &'a Table,
  query: &str,
) -> impl Iterator<Item = (usize, &'a Record)> + use<'a> {
  let needle = query.to_lowercase();
  table
    .iter()
    .enumerate()
    .filter(move |(_, r)| needle.is_empty() || matches_lowered(r, &needle))
}

/// The sub-table of records matching `query`. An empty query returns the
/// table unchanged.
pub fn filter(table: &Table, query: &str) -> Table {
  if query.is_empty() {
    return table.clone();
  }
  matching(table, query).map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::field::Field;

  fn table() -> Table {
    vec![
      Record::new()
        .with(Field::Name, "Ann Lee")
        .with(Field::City, "Boston")
        .with(Field::Status, "Open"),
      Record::new()
        .with(Field::Name, "Bob Stone")
        .with(Field::Email, "BOB@EXAMPLE.COM")
        .with(Field::Status, "Closed"),
      Record::new().with(Field::Name, "Cleo").with(Field::Notes, "met in boston"),
    ]
    .into()
  }

  #[test]
  fn empty_query_is_identity() {
    let t = table();
    assert_eq!(filter(&t, ""), t);
    assert_eq!(filter(&Table::new(), ""), Table::new());
  }

  #[test]
  fn query_is_case_insensitive() {
    let t = table();
    let hits = filter(&t, "BOSTON");
    let names: Vec<_> = hits.iter().map(|r| r.get(Field::Name)).collect();
    assert_eq!(names, ["Ann Lee", "Cleo"]);

    let hits = filter(&t, "bob@example");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.get(0).unwrap().get(Field::Name), "Bob Stone");
  }

  #[test]
  fn retained_and_dropped_partition_the_table() {
    let t = table();
    for q in ["o", "closed", "Lee", "zzz", "n l"] {
      let lowered = q.to_lowercase();
      let kept = filter(&t, q);
      for r in &kept {
        assert!(r.concatenated().to_lowercase().contains(&lowered));
      }
      for r in t.iter().filter(|r| !kept.records().contains(r)) {
        assert!(!r.concatenated().to_lowercase().contains(&lowered));
      }
    }
  }

  #[test]
  fn query_may_span_adjacent_fields() {
    let t: Table = vec![
      Record::new().with(Field::Name, "Ann").with(Field::Phone, "555"),
    ]
    .into();
    assert_eq!(filter(&t, "ann555").len(), 1);
  }

  #[test]
  fn matching_keeps_original_positions() {
    let t = table();
    let positions: Vec<_> = matching(&t, "boston").map(|(i, _)| i).collect();
    assert_eq!(positions, [0, 2]);
    assert!(matches(t.get(1).unwrap(), "STONE"));
  }
}
