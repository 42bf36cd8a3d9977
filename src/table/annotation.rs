//! Row annotations and the display policy derived from them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::RowIndex;

/// Severity label used when none is given.
pub const DEFAULT_SEVERITY: &str = "Info";

/// A free-text note plus a severity label attached to one row.
///
/// Severity is stored as text so that labels outside the conventional
/// Info/Warn/Critical set survive a load/save cycle untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Reviewer's note.
    pub note: String,

    /// Severity label, conventionally one of `Info`, `Warn`, `Critical`.
    pub severity: String,
}

impl Annotation {
    /// Creates an annotation with the given note and severity.
    pub fn new(note: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            severity: severity.into(),
        }
    }

    /// Creates an `Info` annotation.
    pub fn info(note: impl Into<String>) -> Self {
        Self::new(note, DEFAULT_SEVERITY)
    }

    /// Returns the conventional severity this label matches, if any.
    pub fn level(&self) -> Option<Severity> {
        Severity::from_label(&self.severity)
    }

    /// Visual emphasis for the annotated row.
    pub fn emphasis(&self) -> Emphasis {
        match self.level() {
            Some(Severity::Critical) => Emphasis::Strong,
            Some(Severity::Warn) => Emphasis::Mild,
            _ => Emphasis::Neutral,
        }
    }

    /// Hover text for the annotated row, e.g. `[Warn] needs review`.
    pub fn hover_text(&self) -> String {
        format!("[{}] {}", self.severity, self.note)
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::info("")
    }
}

/// The conventional severity labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Critical,
}

impl Severity {
    /// Matches a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("info") {
            Some(Severity::Info)
        } else if label.eq_ignore_ascii_case("warn") {
            Some(Severity::Warn)
        } else if label.eq_ignore_ascii_case("critical") {
            Some(Severity::Critical)
        } else {
            None
        }
    }

    /// Canonical label text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly a row should stand out in a table view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emphasis {
    /// Not annotated.
    None,
    /// Annotated with `Info` or a custom label.
    Neutral,
    /// Annotated with `Warn`.
    Mild,
    /// Annotated with `Critical`.
    Strong,
}

impl Emphasis {
    /// Suggested background colour as RGB, or `None` for no emphasis.
    pub fn background_rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Emphasis::None => None,
            Emphasis::Neutral => Some((235, 245, 255)),
            Emphasis::Mild => Some((255, 245, 220)),
            Emphasis::Strong => Some((255, 230, 230)),
        }
    }
}

/// Display attributes a view needs for one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowDisplay {
    pub emphasis: Emphasis,
    pub hover_text: Option<String>,
}

impl RowDisplay {
    /// Attributes for a row with the given annotation, if any.
    pub fn for_annotation(annotation: Option<&Annotation>) -> Self {
        match annotation {
            Some(a) => Self {
                emphasis: a.emphasis(),
                hover_text: Some(a.hover_text()),
            },
            None => Self {
                emphasis: Emphasis::None,
                hover_text: None,
            },
        }
    }
}

/// Annotations keyed by row, with constant-time lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    entries: HashMap<RowIndex, Annotation>,
}

impl AnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, row: RowIndex) -> bool {
        self.entries.contains_key(&row)
    }

    pub fn get(&self, row: RowIndex) -> Option<&Annotation> {
        self.entries.get(&row)
    }

    /// Inserts or overwrites, returning the previous annotation.
    pub fn insert(&mut self, row: RowIndex, annotation: Annotation) -> Option<Annotation> {
        self.entries.insert(row, annotation)
    }

    pub fn remove(&mut self, row: RowIndex) -> Option<Annotation> {
        self.entries.remove(&row)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry whose row is not below `row_count`.
    pub fn retain_within(&mut self, row_count: usize) {
        self.entries.retain(|row, _| row.is_within(row_count));
    }

    /// Entries in ascending row order.
    pub fn sorted(&self) -> Vec<(RowIndex, &Annotation)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(row, a)| (*row, a)).collect();
        entries.sort_by_key(|(row, _)| *row);
        entries
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (RowIndex, &Annotation)> {
        self.entries.iter().map(|(row, a)| (*row, a))
    }
}

impl FromIterator<(RowIndex, Annotation)> for AnnotationStore {
    fn from_iter<I: IntoIterator<Item = (RowIndex, Annotation)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_matching_ignores_case() {
        assert_eq!(Severity::from_label("critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_label("WARN"), Some(Severity::Warn));
        assert_eq!(Severity::from_label("Info"), Some(Severity::Info));
        assert_eq!(Severity::from_label("blocker"), None);
    }

    #[test]
    fn test_emphasis_policy() {
        assert_eq!(Annotation::new("x", "Critical").emphasis(), Emphasis::Strong);
        assert_eq!(Annotation::new("x", "warn").emphasis(), Emphasis::Mild);
        assert_eq!(Annotation::new("x", "Info").emphasis(), Emphasis::Neutral);
        assert_eq!(Annotation::new("x", "custom").emphasis(), Emphasis::Neutral);
        assert_eq!(Annotation::new("x", "").emphasis(), Emphasis::Neutral);
    }

    #[test]
    fn test_row_display() {
        let a = Annotation::new("needs review", "Warn");
        let shown = RowDisplay::for_annotation(Some(&a));
        assert_eq!(shown.emphasis, Emphasis::Mild);
        assert_eq!(shown.hover_text.as_deref(), Some("[Warn] needs review"));

        let none = RowDisplay::for_annotation(None);
        assert_eq!(none.emphasis, Emphasis::None);
        assert!(none.hover_text.is_none());
        assert!(none.emphasis.background_rgb().is_none());
    }

    #[test]
    fn test_store_sorted_and_retain() {
        let mut store: AnnotationStore = [
            (RowIndex(5), Annotation::info("e")),
            (RowIndex(1), Annotation::info("a")),
            (RowIndex(3), Annotation::info("c")),
        ]
        .into_iter()
        .collect();

        let rows: Vec<_> = store.sorted().into_iter().map(|(r, _)| r.as_usize()).collect();
        assert_eq!(rows, vec![1, 3, 5]);

        store.retain_within(4);
        assert_eq!(store.len(), 2);
        assert!(!store.contains(RowIndex(5)));
    }

    #[test]
    fn test_store_insert_overwrites() {
        let mut store = AnnotationStore::new();
        assert!(store.insert(RowIndex(0), Annotation::info("old")).is_none());
        let previous = store.insert(RowIndex(0), Annotation::new("new", "Critical"));

        assert_eq!(previous, Some(Annotation::info("old")));
        assert_eq!(store.get(RowIndex(0)).unwrap().note, "new");
        assert_eq!(store.len(), 1);
    }
}
