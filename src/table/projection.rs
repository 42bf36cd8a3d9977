//! Sort and filter views over a [`TabularModel`].
//!
//! A projection never copies or reorders the dataset. It is a list of
//! source [`RowIndex`] values in view order, so annotations (keyed by
//! source row) stay attached to the right row however the view is sorted.

use std::cmp::Ordering;

use super::events::ModelEvent;
use super::model::TabularModel;
use crate::data::RowIndex;

/// Direction of a column sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Column and direction to sort by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub order: SortOrder,
}

/// How to derive a view from the model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectionSpec {
    /// Case-insensitive substring matched against every column.
    pub filter: Option<String>,

    /// Optional sort. Ties keep source order.
    pub sort: Option<SortKey>,
}

impl ProjectionSpec {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sort(mut self, column: usize, order: SortOrder) -> Self {
        self.sort = Some(SortKey { column, order });
        self
    }
}

/// View order of the model's rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    rows: Vec<RowIndex>,
}

impl Projection {
    /// Every row in source order.
    pub fn identity(model: &TabularModel) -> Self {
        Self {
            rows: (0..model.row_count()).map(RowIndex::new).collect(),
        }
    }

    /// Applies `spec` to the model's current dataset.
    ///
    /// A sort column outside the table leaves rows in source order.
    pub fn build(model: &TabularModel, spec: &ProjectionSpec) -> Self {
        let needle = spec
            .filter
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<RowIndex> = (0..model.row_count())
            .map(RowIndex::new)
            .filter(|row| match &needle {
                Some(needle) => row_matches(model, *row, needle),
                None => true,
            })
            .collect();

        if let Some(key) = spec.sort.filter(|key| key.column < model.column_count()) {
            // sort_by is stable, so equal cells keep source order in both directions.
            rows.sort_by(|a, b| {
                let ordering = compare_cells(model, *a, *b, key.column);
                match key.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source rows in view order.
    pub fn rows(&self) -> &[RowIndex] {
        &self.rows
    }

    /// Maps a view position back to its source row.
    pub fn source_row(&self, view_row: usize) -> Option<RowIndex> {
        self.rows.get(view_row).copied()
    }

    /// Maps a source row to its view position, if it is visible.
    pub fn view_row(&self, source: RowIndex) -> Option<usize> {
        self.rows.iter().position(|row| *row == source)
    }

    /// True if `event` invalidates this projection.
    ///
    /// Annotation changes only touch display attributes, which neither the
    /// filter nor the sort look at.
    pub fn needs_rebuild(event: &ModelEvent) -> bool {
        event.is_structural()
    }
}

fn row_matches(model: &TabularModel, row: RowIndex, needle: &str) -> bool {
    (0..model.column_count()).any(|col| {
        model
            .cell_value(row, col)
            .is_some_and(|cell| cell.to_lowercase().contains(needle))
    })
}

fn compare_cells(model: &TabularModel, a: RowIndex, b: RowIndex, column: usize) -> Ordering {
    let left = model.cell_value(a, column).unwrap_or("");
    let right = model.cell_value(b, column).unwrap_or("");
    left.cmp(right)
}
