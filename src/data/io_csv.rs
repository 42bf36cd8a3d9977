//! Synchronous CSV loading.
//!
//! These helpers run the scanner on the calling thread with no way to
//! cancel. Interactive callers should go through
//! [`LoadJob`](crate::load::LoadJob) instead so file IO stays off their
//! context.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use super::model::Dataset;
use super::parse::scan_document;
use crate::error::CsvnoteError;

/// Opens a CSV file for scanning and reports its size in bytes.
///
/// # Errors
/// Returns [`CsvnoteError::CsvOpen`] if the file cannot be opened or its
/// metadata cannot be read.
pub fn open_csv(path: &Path) -> Result<(BufReader<File>, u64), CsvnoteError> {
    let open_err = |source| CsvnoteError::CsvOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let total = file.metadata().map_err(open_err)?.len();

    Ok((BufReader::new(file), total))
}

/// Reads a dataset from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be opened or read. Malformed quoting
/// never fails.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use csvnote::data::io_csv::read_csv;
///
/// let dataset = read_csv(Path::new("measurements.csv"))?;
/// # Ok::<(), csvnote::CsvnoteError>(())
/// ```
pub fn read_csv(path: &Path) -> Result<Dataset, CsvnoteError> {
    let (reader, _) = open_csv(path)?;
    let outcome = scan_document(reader, &AtomicBool::new(false))?;
    Ok(outcome.dataset)
}

/// Reads a dataset from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_csv_str(text: &str) -> Dataset {
    scan_bytes(text.as_bytes())
}

/// Fuzz-only entrypoint for scanning raw CSV bytes.
///
/// Invalid UTF-8 is replaced rather than rejected.
#[cfg(feature = "fuzzing")]
pub fn from_csv_slice(bytes: &[u8]) -> Dataset {
    scan_bytes(bytes)
}

fn scan_bytes(bytes: &[u8]) -> Dataset {
    // Reading from a slice cannot fail.
    scan_document(bytes, &AtomicBool::new(false))
        .map(|outcome| outcome.dataset)
        .unwrap_or_default()
}
