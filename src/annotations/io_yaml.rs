//! YAML persistence for annotation documents.
//!
//! Same document shape and decoding rules as the JSON form.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use super::codec::{decode, encode};
use crate::error::CsvnoteError;
use crate::table::AnnotationStore;

/// Reads annotations from a YAML file, keeping only rows below `bound`.
///
/// # Errors
/// Returns an error only if the file cannot be opened. Invalid YAML, or YAML
/// with non-string mapping keys, restores nothing.
pub fn read_annotations_yaml(path: &Path, bound: usize) -> Result<AnnotationStore, CsvnoteError> {
    let file = File::open(path).map_err(CsvnoteError::Io)?;
    let reader = BufReader::new(file);

    match serde_yaml::from_reader::<_, Value>(reader) {
        Ok(value) => Ok(decode(&value, bound)),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "annotation file is not valid YAML; nothing restored"
            );
            Ok(AnnotationStore::new())
        }
    }
}

/// Writes annotations to a YAML file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_annotations_yaml(path: &Path, store: &AnnotationStore) -> Result<(), CsvnoteError> {
    let file = File::create(path).map_err(CsvnoteError::Io)?;
    let writer = BufWriter::new(file);

    serde_yaml::to_writer(writer, &encode(store)).map_err(|source| {
        CsvnoteError::AnnotationYamlWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads annotations from a YAML string.
pub fn from_yaml_str(yaml: &str, bound: usize) -> Result<AnnotationStore, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(yaml)?;
    Ok(decode(&value, bound))
}

/// Writes annotations to a YAML string.
pub fn to_yaml_string(store: &AnnotationStore) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&encode(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RowIndex;
    use crate::table::Annotation;

    #[test]
    fn test_yaml_roundtrip() {
        let store: AnnotationStore = [
            (RowIndex(1), Annotation::new("needs review", "Warn")),
            (RowIndex(4), Annotation::new("multi\nline", "custom")),
        ]
        .into_iter()
        .collect();

        let yaml = to_yaml_string(&store).unwrap();
        assert_eq!(from_yaml_str(&yaml, 5).unwrap(), store);
    }

    #[test]
    fn test_yaml_hand_written() {
        let yaml = "annotations:\n  - row: 0\n    note: typo in name\n  - row: 9\n    note: gone\n";
        let store = from_yaml_str(yaml, 2).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(RowIndex(0)).unwrap().severity, "Info");
    }

    #[test]
    fn test_invalid_yaml_file_restores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "annotations: [ { row: 1\n").unwrap();

        let store = read_annotations_yaml(&path, 3).unwrap();
        assert!(store.is_empty());
    }
}
