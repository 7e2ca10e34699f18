//! Spreadsheet backends for the prospect list.
//!
//! [`GoogleSheet`] talks to Google Sheets with a service account;
//! [`MemorySheet`] keeps the grid in process. Both run the same header/row
//! codec in [`grid`].

mod google;
mod memory;

pub mod auth;
pub mod config;
pub mod error;
pub mod grid;

pub use config::SheetConfig;
pub use error::{Error, Result};
pub use google::GoogleSheet;
pub use memory::MemorySheet;
