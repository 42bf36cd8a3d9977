//! The tabular model: one dataset plus its row annotations.

use std::borrow::Cow;
use std::sync::Arc;

use super::annotation::{Annotation, AnnotationStore, RowDisplay};
use super::events::{Listeners, ModelEvent, SubscriptionId};
use crate::data::{Dataset, RowIndex};

/// Owns a [`Dataset`] and the annotations made against it.
///
/// Annotations are only meaningful for the dataset they were made on, so
/// installing a new dataset always discards them. Every mutation happens
/// through `&mut self`, so a reader can never observe a half-swapped
/// dataset or a half-updated store; readers on other threads can hold a
/// [`snapshot`](Self::snapshot) of the dataset instead.
#[derive(Debug, Default)]
pub struct TabularModel {
    dataset: Arc<Dataset>,
    annotations: AnnotationStore,
    listeners: Listeners,
}

impl TabularModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model holding `dataset` with no annotations.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            ..Self::default()
        }
    }

    /// Replaces the dataset and clears every annotation.
    ///
    /// Listeners receive [`ModelEvent::Reset`].
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Arc::new(dataset);
        self.annotations.clear();
        self.listeners.emit(ModelEvent::Reset);
    }

    /// The current dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// A shared handle to the current dataset that outlives later swaps.
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    pub fn row_count(&self) -> usize {
        self.dataset.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.dataset.column_count()
    }

    /// Column title for `section`, or its 1-based number when the section
    /// has no header.
    pub fn header(&self, section: usize) -> Cow<'_, str> {
        match self.dataset.headers.get(section) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned((section + 1).to_string()),
        }
    }

    /// Text of one cell.
    ///
    /// Returns `None` when the row or column is outside the table, and
    /// `Some("")` for a column the (ragged) row simply does not reach.
    pub fn cell_value(&self, row: impl Into<RowIndex>, col: usize) -> Option<&str> {
        if col >= self.column_count() {
            return None;
        }
        let fields = self.dataset.row(row.into())?;
        Some(fields.get(col).map(String::as_str).unwrap_or(""))
    }

    pub fn has_annotation(&self, row: impl Into<RowIndex>) -> bool {
        self.annotations.contains(row.into())
    }

    pub fn annotation(&self, row: impl Into<RowIndex>) -> Option<&Annotation> {
        self.annotations.get(row.into())
    }

    /// All annotations on the current dataset.
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Sets or overwrites the annotation on `row`.
    ///
    /// Does nothing and returns `false` if the row does not exist.
    /// Otherwise listeners receive [`ModelEvent::RowDisplayChanged`].
    pub fn set_annotation(&mut self, row: impl Into<RowIndex>, annotation: Annotation) -> bool {
        let row = row.into();
        if !row.is_within(self.row_count()) {
            return false;
        }
        self.annotations.insert(row, annotation);
        self.listeners.emit(ModelEvent::RowDisplayChanged { row });
        true
    }

    /// Removes the annotation on `row`, returning it if there was one.
    ///
    /// Listeners are only notified when something was removed.
    pub fn clear_annotation(&mut self, row: impl Into<RowIndex>) -> Option<Annotation> {
        let row = row.into();
        let removed = self.annotations.remove(row)?;
        self.listeners.emit(ModelEvent::RowDisplayChanged { row });
        Some(removed)
    }

    /// Installs a whole annotation store, e.g. one just decoded from disk.
    ///
    /// Entries outside the current dataset are dropped. Listeners receive
    /// [`ModelEvent::Reset`]. Returns the number of annotations kept.
    pub fn replace_annotations(&mut self, mut store: AnnotationStore) -> usize {
        store.retain_within(self.row_count());
        self.annotations = store;
        self.listeners.emit(ModelEvent::Reset);
        self.annotations.len()
    }

    /// Emphasis and hover text for `row`.
    pub fn row_display(&self, row: impl Into<RowIndex>) -> RowDisplay {
        RowDisplay::for_annotation(self.annotation(row))
    }

    /// Registers a listener for model changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&ModelEvent) + Send + Sync + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
