//! JSON persistence for annotation documents.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use super::codec::{decode, encode};
use crate::error::CsvnoteError;
use crate::table::AnnotationStore;

/// Reads annotations from a JSON file, keeping only rows below `bound`.
///
/// # Errors
/// Returns an error only if the file cannot be opened. A file that is not
/// JSON, or JSON of the wrong shape, restores nothing.
pub fn read_annotations_json(path: &Path, bound: usize) -> Result<AnnotationStore, CsvnoteError> {
    let file = File::open(path).map_err(CsvnoteError::Io)?;
    let reader = BufReader::new(file);

    match serde_json::from_reader::<_, Value>(reader) {
        Ok(value) => Ok(decode(&value, bound)),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "annotation file is not valid JSON; nothing restored"
            );
            Ok(AnnotationStore::new())
        }
    }
}

/// Writes annotations to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_annotations_json(path: &Path, store: &AnnotationStore) -> Result<(), CsvnoteError> {
    let file = File::create(path).map_err(CsvnoteError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &encode(store)).map_err(|source| {
        CsvnoteError::AnnotationJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads annotations from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str, bound: usize) -> Result<AnnotationStore, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(decode(&value, bound))
}

/// Writes annotations to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(store: &AnnotationStore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&encode(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RowIndex;
    use crate::table::Annotation;

    fn sample_store() -> AnnotationStore {
        [
            (RowIndex(0), Annotation::new("first row", "Info")),
            (RowIndex(2), Annotation::new("looks wrong, check", "Critical")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_json_roundtrip() {
        let json = to_json_string(&sample_store()).expect("serialization failed");
        let restored = from_json_str(&json, 3).expect("deserialization failed");
        assert_eq!(restored, sample_store());
    }

    #[test]
    fn test_json_format() {
        let json = to_json_string(&sample_store()).expect("serialization failed");

        assert!(json.contains("\"annotations\""));
        assert!(json.contains("\"row\": 2"));
        assert!(json.contains("\"severity\": \"Critical\""));
        assert!(json.find("first row").unwrap() < json.find("looks wrong").unwrap());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");

        write_annotations_json(&path, &sample_store()).unwrap();
        let restored = read_annotations_json(&path, 3).unwrap();
        assert_eq!(restored, sample_store());

        // A shorter dataset keeps only what still fits.
        let shorter = read_annotations_json(&path, 1).unwrap();
        assert_eq!(shorter.len(), 1);
    }

    #[test]
    fn test_invalid_json_restores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");

        for text in ["{ not json", "{ \"annotations\": [ { \"row\": 1", ""] {
            std::fs::write(&path, text).unwrap();
            let store = read_annotations_json(&path, 3).unwrap();
            assert!(store.is_empty(), "expected empty store for {:?}", text);
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_annotations_json(&dir.path().join("absent.json"), 3).unwrap_err();
        assert!(matches!(err, CsvnoteError::Io(_)));
    }

    #[test]
    fn test_wrong_shape_restores_nothing() {
        let store = from_json_str(r#"{"notes": [1, 2, 3]}"#, 3).unwrap();
        assert!(store.is_empty());
    }
}
