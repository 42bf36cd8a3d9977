//! CSV review report of annotated rows.
//!
//! The report is export-only: one line per annotation in ascending row
//! order, with columns `row,severity,note` followed by the dataset's own
//! columns so a reviewer can read it without the source CSV.

use std::io::Write;
use std::path::Path;

use crate::error::CsvnoteError;
use crate::table::TabularModel;

/// Writes the review report for `model` to a file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_review_csv(path: &Path, model: &TabularModel) -> Result<(), CsvnoteError> {
    let mut csv_writer =
        csv::Writer::from_path(path).map_err(|source| CsvnoteError::ReportCsvWrite {
            path: path.to_path_buf(),
            source,
        })?;

    write_records(&mut csv_writer, model).map_err(|source| CsvnoteError::ReportCsvWrite {
        path: path.to_path_buf(),
        source,
    })?;

    csv_writer.flush().map_err(CsvnoteError::Io)?;
    Ok(())
}

/// Renders the review report to a string.
pub fn to_review_csv_string(model: &TabularModel) -> Result<String, CsvnoteError> {
    let dummy_path = Path::new("<string>");
    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    write_records(&mut csv_writer, model).map_err(|source| CsvnoteError::ReportCsvWrite {
        path: dummy_path.to_path_buf(),
        source,
    })?;

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| CsvnoteError::Io(e.into_error()))?;

    // Every field came from a &str.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_records<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    model: &TabularModel,
) -> Result<(), csv::Error> {
    let mut header = vec!["row".to_string(), "severity".to_string(), "note".to_string()];
    header.extend((0..model.column_count()).map(|col| model.header(col).into_owned()));
    csv_writer.write_record(&header)?;

    for (row, annotation) in model.annotations().sorted() {
        let mut record = vec![
            row.to_string(),
            annotation.severity.clone(),
            annotation.note.clone(),
        ];
        record.extend(
            (0..model.column_count())
                .map(|col| model.cell_value(row, col).unwrap_or("").to_string()),
        );
        csv_writer.write_record(&record)?;
    }
    Ok(())
}
