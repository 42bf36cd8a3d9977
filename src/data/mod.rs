//! Tabular data loaded from CSV.
//!
//! A [`Dataset`] is a header list plus rows of plain text fields. It is built
//! once by a load and never mutated afterwards; row positions
//! ([`RowIndex`]) are the identity every other part of the crate keys on.

mod ids;
pub mod io_csv;
mod model;
mod parse;

pub use ids::RowIndex;
pub use model::{Dataset, Field, Row};
pub use parse::{parse_line, scan_document, ScanOutcome};
