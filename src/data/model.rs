//! Core tabular dataset produced by a CSV load.

use serde::{Deserialize, Serialize};

use super::ids::RowIndex;

/// A single text value. No type coercion is ever applied.
pub type Field = String;

/// One data line of the file, split into fields.
///
/// Rows may be shorter (or longer) than the header list; consumers must not
/// assume `row.len() == headers.len()`.
pub type Row = Vec<Field>;

/// Headers plus rows, in file order.
///
/// Row order defines [`RowIndex`]. A completely empty input yields a dataset
/// with no headers and no rows, which is a valid result and not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names taken from the first non-blank line.
    pub headers: Vec<Field>,

    /// Every subsequent non-blank line.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset from headers and rows.
    pub fn new(headers: Vec<Field>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, as declared by the header line.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when nothing at all was loaded.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Returns the row at `index`, if present.
    pub fn row(&self, index: RowIndex) -> Option<&Row> {
        self.rows.get(index.as_usize())
    }

    /// Number of rows with fewer fields than there are headers.
    pub fn ragged_row_count(&self) -> usize {
        let width = self.headers.len();
        self.rows.iter().filter(|row| row.len() < width).count()
    }
}
