//! The fixed set of prospect columns.
//!
//! The sheet header, the HTML table columns, and the add form all use the
//! same twelve fields in the same order. Each field carries two static
//! names: the display label written to the sheet header, and the form input
//! identifier submitted by the browser.

use std::fmt;

/// One of the twelve recognised prospect columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
  Name,
  Phone,
  Email,
  Address,
  City,
  State,
  Zip,
  Country,
  LastContacted,
  NextStep,
  Status,
  Notes,
}

/// `(field, display label, form input identifier)`, in column order.
const NAMES: [(Field, &str, &str); Field::COUNT] = [
  (Field::Name,          "Name",           "name"),
  (Field::Phone,         "Phone",          "phone"),
  (Field::Email,         "Email",          "email"),
  (Field::Address,       "Address",        "address"),
  (Field::City,          "City",           "city"),
  (Field::State,         "State",          "state"),
  (Field::Zip,           "Zip",            "zip"),
  (Field::Country,       "Country",        "country"),
  (Field::LastContacted, "Last Contacted", "last_contacted"),
  (Field::NextStep,      "Next Step",      "next_step"),
  (Field::Status,        "Status",         "status"),
  (Field::Notes,         "Notes",          "notes"),
];

impl Field {
  pub const COUNT: usize = 12;

  /// Every field in column order.
  pub const ALL: [Field; Field::COUNT] = [
    Field::Name,
    Field::Phone,
    Field::Email,
    Field::Address,
    Field::City,
    Field::State,
    Field::Zip,
    Field::Country,
    Field::LastContacted,
    Field::NextStep,
    Field::Status,
    Field::Notes,
  ];

  /// Zero-based column index of this field.
  pub fn index(self) -> usize { self as usize }

  /// Header label as it appears in the sheet, e.g. `"Last Contacted"`.
  pub fn label(self) -> &'static str { NAMES[self.index()].1 }

  /// Form input identifier, e.g. `"last_contacted"`.
  pub fn input_name(self) -> &'static str { NAMES[self.index()].2 }

  /// Look up a field by its exact sheet header label.
  pub fn from_label(label: &str) -> Option<Field> {
    NAMES.iter().find(|(_, l, _)| *l == label).map(|(f, _, _)| *f)
  }

  /// The header row written on every save.
  pub fn header() -> Vec<String> {
    Field::ALL.iter().map(|f| f.label().to_owned()).collect()
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_table_matches_column_order() {
    for (i, field) in Field::ALL.iter().enumerate() {
      assert_eq!(field.index(), i);
      assert_eq!(NAMES[i].0, *field);
    }
  }

  #[test]
  fn input_names_are_lowercased_underscored_labels() {
    for field in Field::ALL {
      assert_eq!(
        field.input_name(),
        field.label().to_lowercase().replace(' ', "_")
      );
    }
  }

  #[test]
  fn label_lookup_is_exact() {
    for field in Field::ALL {
      assert_eq!(Field::from_label(field.label()), Some(field));
    }
    assert_eq!(Field::from_label("last contacted"), None);
    assert_eq!(Field::from_label("last_contacted"), None);
  }

  #[test]
  fn header_is_fields_in_order() {
    assert_eq!(
      Field::header(),
      vec![
        "Name", "Phone", "Email", "Address", "City", "State", "Zip",
        "Country", "Last Contacted", "Next Step", "Status", "Notes",
      ]
    );
  }
}
