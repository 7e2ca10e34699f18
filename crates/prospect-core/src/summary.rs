//! Open/closed counts for the dashboard.

use serde::Serialize;

use crate::{field::Field, record::Table};

/// Status value, compared case-insensitively, that marks a prospect closed.
pub const CLOSED: &str = "closed";

/// Record counts by status. Anything not exactly `closed` (ignoring case) is
/// open, including an empty status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub total:  usize,
  pub closed: usize,
  pub open:   usize,
}

/// Two-slice chart data: `labels[i]` has count `values[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
  pub labels: [&'static str; 2],
  pub values: [usize; 2],
}

impl Summary {
  pub fn breakdown(&self) -> Breakdown {
    Breakdown {
      labels: ["Closed", "Open"],
      values: [self.closed, self.open],
    }
  }
}

pub fn is_closed(status: &str) -> bool { status.to_lowercase() == CLOSED }

pub fn summarize(table: &Table) -> Summary {
  let total = table.len();
  let closed = table
    .iter()
    .filter(|r| is_closed(r.get(Field::Status)))
    .count();
  Summary { total, closed, open: total - closed }
}
