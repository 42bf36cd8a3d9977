use std::path::PathBuf;
use thiserror::Error;

/// The main error type for csvnote operations.
#[derive(Debug, Error)]
pub enum CsvnoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open CSV file {path}: {source}")]
    CsvOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write annotation JSON to {path}: {source}")]
    AnnotationJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation YAML to {path}: {source}")]
    AnnotationYamlWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write JSON summary for {path}: {source}")]
    SummaryJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write review CSV to {path}: {source}")]
    ReportCsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Background load failed: {0}")]
    LoadTask(String),

    #[error("Row {row} is out of range (dataset has {row_count} row(s))")]
    RowOutOfRange { row: usize, row_count: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
