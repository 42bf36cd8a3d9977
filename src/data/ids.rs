//! Row identity for datasets and annotation stores.
//!
//! A [`RowIndex`] is the zero-based position of a data row inside a
//! [`Dataset`](super::Dataset). It is the stable key annotations hang off:
//! sort and filter projections reorder *views*, never the row indices
//! themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position of a data row in its dataset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowIndex(pub usize);

impl RowIndex {
    /// Creates a new RowIndex.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying position.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }

    /// Returns true if this row exists in a dataset of `row_count` rows.
    #[inline]
    pub fn is_within(&self, row_count: usize) -> bool {
        self.0 < row_count
    }
}

impl From<usize> for RowIndex {
    fn from(index: usize) -> Self {
        RowIndex::new(index)
    }
}

impl fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowIndex({})", self.0)
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
