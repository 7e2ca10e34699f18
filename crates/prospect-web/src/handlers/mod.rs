//! Request handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Optional `?q=` substring filter |
//! | `POST` | `/` | Form fields named by [`Field::input_name`](prospect_core::Field::input_name); redirects to `/` |
//! | `GET`  | `/dashboard` | Open/closed counts |
//! | `GET`  | `/delete/{position}` | Redirects to `/` |
//!
//! Every handler loads the whole table; mutations save it back in full.

pub mod dashboard;
pub mod delete;
pub mod index;
