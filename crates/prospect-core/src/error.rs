//! Error types for `prospect-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A record position outside `0..len` was addressed.
  #[error("record position {position} is out of range for a table of {len}")]
  PositionOutOfRange { position: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
