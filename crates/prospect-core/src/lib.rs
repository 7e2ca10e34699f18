//! Core types and trait definitions for the prospect list.
//!
//! This crate is deliberately free of HTTP and network dependencies.
//! The sheet backends and the web front-end depend on it; it depends on
//! nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
pub use field::Field;
pub use record::{Record, Table};
