//! Conversion between an [`AnnotationStore`] and the persisted document.
//!
//! # Document shape
//!
//! ```json
//! { "annotations": [ { "row": 1, "note": "needs review", "severity": "Warn" } ] }
//! ```
//!
//! # Decoding rules
//!
//! A document may have been saved against a shorter version of the dataset:
//! - a missing or non-array `annotations` field decodes to an empty store;
//! - a record that is not an object, has no integral `row`, or whose row is
//!   outside `0..bound` is skipped on its own;
//! - a missing or non-text `note` becomes empty text, a missing or non-text
//!   `severity` becomes `Info`;
//! - if two records name the same row, the later one wins.
//!
//! The decoded store always replaces the destination; it is never merged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::data::RowIndex;
use crate::table::{Annotation, AnnotationStore, DEFAULT_SEVERITY};

/// The persisted annotation document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub annotations: Vec<AnnotationRecord>,
}

/// One persisted annotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub row: usize,
    pub note: String,
    pub severity: String,
}

/// Encodes a store as a document with records in ascending row order.
pub fn encode(store: &AnnotationStore) -> AnnotationDocument {
    let annotations = store
        .sorted()
        .into_iter()
        .map(|(row, annotation)| AnnotationRecord {
            row: row.as_usize(),
            note: annotation.note.clone(),
            severity: annotation.severity.clone(),
        })
        .collect();

    AnnotationDocument { annotations }
}

/// Decodes a parsed document against a dataset of `bound` rows.
///
/// Never fails; see the module docs for what gets skipped.
pub fn decode(document: &Value, bound: usize) -> AnnotationStore {
    let Some(records) = document.get("annotations").and_then(Value::as_array) else {
        debug!("annotation document has no `annotations` array; nothing restored");
        return AnnotationStore::new();
    };

    let mut store = AnnotationStore::new();
    for (index, record) in records.iter().enumerate() {
        match decode_record(record, bound) {
            Ok((row, annotation)) => {
                store.insert(row, annotation);
            }
            Err(reason) => debug!(index, %reason, "skipping annotation record"),
        }
    }
    store
}

/// Decodes an already typed document against a dataset of `bound` rows.
pub fn decode_document(document: &AnnotationDocument, bound: usize) -> AnnotationStore {
    document
        .annotations
        .iter()
        .filter(|record| record.row < bound)
        .map(|record| {
            (
                RowIndex::new(record.row),
                Annotation::new(record.note.clone(), record.severity.clone()),
            )
        })
        .collect()
}

/// Why a record was left out of the decoded store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SkipReason {
    NotAnObject,
    MissingRow,
    OutOfRange { row: i64, bound: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "record is not an object"),
            SkipReason::MissingRow => write!(f, "record has no integral `row`"),
            SkipReason::OutOfRange { row, bound } => {
                write!(f, "row {} is outside 0..{}", row, bound)
            }
        }
    }
}

fn decode_record(record: &Value, bound: usize) -> Result<(RowIndex, Annotation), SkipReason> {
    let fields = record.as_object().ok_or(SkipReason::NotAnObject)?;
    let row = fields
        .get("row")
        .and_then(integral)
        .ok_or(SkipReason::MissingRow)?;

    let index = usize::try_from(row)
        .ok()
        .filter(|index| *index < bound)
        .ok_or(SkipReason::OutOfRange { row, bound })?;

    let note = fields.get("note").and_then(Value::as_str).unwrap_or("");
    let severity = fields
        .get("severity")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_SEVERITY);

    Ok((RowIndex::new(index), Annotation::new(note, severity)))
}

/// Reads a JSON number as an integer, accepting `3.0` but not `3.5`.
fn integral(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.as_u64().is_some() {
        // Larger than any real row count.
        return Some(i64::MAX);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}
