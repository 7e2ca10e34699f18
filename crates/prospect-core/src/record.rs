//! Records and the table that holds them.
//!
//! A [`Table`] is rebuilt from the sheet on every request and never outlives
//! it. Position in the table is the only identity a record has.

use std::ops::Index;

use crate::{Error, Result, field::Field};

// ─── Record ──────────────────────────────────────────────────────────────────

/// One prospect: exactly one string value per [`Field`].
///
/// Values are free text. None is required to be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
  values: [String; Field::COUNT],
}

impl Record {
  /// A record with every field empty.
  pub fn new() -> Self { Self::default() }

  /// Builder-style setter.
  pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
    self.set(field, value);
    self
  }

  pub fn get(&self, field: Field) -> &str { &self.values[field.index()] }

  pub fn set(&mut self, field: Field, value: impl Into<String>) {
    self.values[field.index()] = value.into();
  }

  /// Values in column order.
  pub fn values(&self) -> impl Iterator<Item = &str> {
    self.values.iter().map(String::as_str)
  }

  /// All values joined in column order, with no separator.
  pub fn concatenated(&self) -> String { self.values.concat() }
}

impl Index<Field> for Record {
  type Output = str;

  fn index(&self, field: Field) -> &str { self.get(field) }
}

impl<V: Into<String>> FromIterator<(Field, V)> for Record {
  fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
    let mut record = Record::new();
    for (field, value) in iter {
      record.set(field, value);
    }
    record
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// The whole managed dataset: records in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  records: Vec<Record>,
}

impl Table {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn get(&self, position: usize) -> Option<&Record> {
    self.records.get(position)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Record> { self.records.iter() }

  pub fn records(&self) -> &[Record] { &self.records }

  /// This table with `record` added at the end.
  pub fn appended(mut self, record: Record) -> Table {
    self.records.push(record);
    self
  }

  /// This table with the record at `position` removed. Later records move
  /// down by one.
  pub fn without(mut self, position: usize) -> Result<Table> {
    let len = self.records.len();
    if position >= len {
      return Err(Error::PositionOutOfRange { position, len });
    }
    self.records.remove(position);
    Ok(self)
  }
}

impl From<Vec<Record>> for Table {
  fn from(records: Vec<Record>) -> Self { Self { records } }
}

impl FromIterator<Record> for Table {
  fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
    Self { records: iter.into_iter().collect() }
  }
}

impl<'a> IntoIterator for &'a Table {
  type Item = &'a Record;
  type IntoIter = std::slice::Iter<'a, Record>;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
