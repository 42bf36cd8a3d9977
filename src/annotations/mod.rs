//! Annotation persistence.
//!
//! The codec ([`encode`]/[`decode`]) maps an [`AnnotationStore`] to and from
//! the `{ "annotations": [ { row, note, severity } ] }` document. The `io_*`
//! modules put that document on disk as JSON or YAML, and
//! [`io_csv_report`] exports a flat review sheet.

mod codec;
pub mod io_csv_report;
pub mod io_json;
pub mod io_yaml;

use std::fmt;
use std::path::Path;

pub use codec::{decode, decode_document, encode, AnnotationDocument, AnnotationRecord};

use crate::error::CsvnoteError;
use crate::table::AnnotationStore;

/// On-disk encodings of the annotation document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnnotationFormat {
    #[default]
    Json,
    Yaml,
}

impl AnnotationFormat {
    /// Parses a user-facing format name.
    ///
    /// # Errors
    /// Returns [`CsvnoteError::UnsupportedFormat`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self, CsvnoteError> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(AnnotationFormat::Json),
            "yaml" | "yml" => Ok(AnnotationFormat::Yaml),
            other => Err(CsvnoteError::UnsupportedFormat(format!(
                "'{}' (supported: json, yaml)",
                other
            ))),
        }
    }

    /// Picks a format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                AnnotationFormat::Yaml
            }
            _ => AnnotationFormat::Json,
        }
    }
}

impl fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationFormat::Json => write!(f, "json"),
            AnnotationFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Reads an annotation file in `format`, keeping only rows below `bound`.
pub fn read_annotations(
    path: &Path,
    format: AnnotationFormat,
    bound: usize,
) -> Result<AnnotationStore, CsvnoteError> {
    match format {
        AnnotationFormat::Json => io_json::read_annotations_json(path, bound),
        AnnotationFormat::Yaml => io_yaml::read_annotations_yaml(path, bound),
    }
}

/// Writes an annotation file in `format`.
pub fn write_annotations(
    path: &Path,
    format: AnnotationFormat,
    store: &AnnotationStore,
) -> Result<(), CsvnoteError> {
    match format {
        AnnotationFormat::Json => io_json::write_annotations_json(path, store),
        AnnotationFormat::Yaml => io_yaml::write_annotations_yaml(path, store),
    }
}
