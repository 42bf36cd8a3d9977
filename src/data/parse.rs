//! Line-oriented CSV scanning.
//!
//! The scanner is intentionally simpler than RFC 4180: a double quote only
//! toggles "inside quotes" state and is never kept as content, so a field
//! written as `say ""hi""` comes out as `say hi`. Malformed quoting can't
//! fail; it only changes where field boundaries fall.
//!
//! The delimiter is always `,` and the quote character is always `"`.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use super::model::{Dataset, Field};

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Splits one line into trimmed fields.
///
/// Every line yields at least one field, so an empty line gives `[""]`.
/// Empty fields between delimiters are kept as empty strings.
///
/// # Example
/// ```
/// use csvnote::data::parse_line;
///
/// let fields = parse_line(r#"1, 2 ,3,"hello, world""#);
/// assert_eq!(fields, vec!["1", "2", "3", "hello, world"]);
/// ```
pub fn parse_line(line: &str) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Result of scanning a whole document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Headers and rows gathered before the scan stopped.
    pub dataset: Dataset,

    /// Bytes consumed from the reader, line endings included.
    pub bytes_read: u64,

    /// True when the scan stopped because cancellation was requested.
    pub cancelled: bool,
}

/// Scans a document line by line into a [`Dataset`].
///
/// `cancel` is polled once before each line is read; once it is set the
/// scan stops and returns what has been gathered so far with
/// [`ScanOutcome::cancelled`] set. Blank lines are skipped entirely. Bytes
/// that are not valid UTF-8 are replaced rather than rejected.
///
/// # Errors
/// Only errors raised by the underlying reader are returned.
pub fn scan_document<R: BufRead>(
    mut reader: R,
    cancel: &AtomicBool,
) -> std::io::Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    let mut headers_seen = false;
    let mut buf = Vec::new();

    loop {
        if reader.fill_buf()?.is_empty() {
            break;
        }
        if cancel.load(Ordering::Relaxed) {
            outcome.cancelled = true;
            break;
        }

        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        outcome.bytes_read += n as u64;

        let line = strip_line_ending(&buf);
        if line.is_empty() {
            continue;
        }

        let fields = parse_line(&String::from_utf8_lossy(line));
        if headers_seen {
            outcome.dataset.rows.push(fields);
        } else {
            outcome.dataset.headers = fields;
            headers_seen = true;
        }
    }

    Ok(outcome)
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> ScanOutcome {
        scan_document(text.as_bytes(), &AtomicBool::new(false)).expect("scan failed")
    }

    #[test]
    fn test_plain_split_trims_fields() {
        assert_eq!(parse_line(" a ,b,  c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        let fields = parse_line(r#"1,2,3,"hello, world""#);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[3], "hello, world");
    }

    #[test]
    fn test_empty_fields_are_kept() {
        assert_eq!(parse_line("a,,b"), vec!["a", "", "b"]);
        assert_eq!(parse_line(",8,9,\"\""), vec!["", "8", "9", ""]);
        assert_eq!(parse_line(","), vec!["", ""]);
    }

    #[test]
    fn test_empty_line_yields_one_field() {
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn test_doubled_quotes_are_dropped() {
        assert_eq!(parse_line(r#"x,"say ""hi""""#), vec!["x", "say hi"]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(parse_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_whitespace_inside_quotes_is_trimmed() {
        // Trimming happens on the finished field, quotes or not.
        assert_eq!(parse_line(r#"" padded ""#), vec!["padded"]);
    }

    #[test]
    fn test_scan_reference_document() {
        let outcome = scan("A,B,C,Notes\n1,2,3,\"hello, world\"\n4,5,6,plain\n,8,9,\"\"\n");
        let dataset = outcome.dataset;

        assert_eq!(dataset.headers, vec!["A", "B", "C", "Notes"]);
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.rows[0], vec!["1", "2", "3", "hello, world"]);
        assert_eq!(dataset.rows[2][0], "");
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_scan_skips_blank_lines() {
        let outcome = scan("\n\nh1,h2\n\n1,2\r\n\r\n3,4\n\n");
        assert_eq!(outcome.dataset.headers, vec!["h1", "h2"]);
        assert_eq!(outcome.dataset.rows.len(), 2);
        assert_eq!(outcome.dataset.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_scan_counts_every_byte() {
        let text = "a,b\r\n\n1,2";
        assert_eq!(scan(text).bytes_read, text.len() as u64);
    }

    #[test]
    fn test_scan_empty_document() {
        let outcome = scan("");
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.bytes_read, 0);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_scan_whitespace_only_line_is_not_blank() {
        let outcome = scan("a,b\n   \n");
        assert_eq!(outcome.dataset.rows, vec![vec![String::new()]]);
    }

    #[test]
    fn test_scan_cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        let outcome = scan_document("a,b\n1,2\n".as_bytes(), &cancel).unwrap();

        assert!(outcome.cancelled);
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.bytes_read, 0);
    }

    #[test]
    fn test_scan_invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"name\n\xffabc\n";
        let outcome = scan_document(bytes, &AtomicBool::new(false)).unwrap();
        assert_eq!(outcome.dataset.rows[0][0], "\u{fffd}abc");
    }
}
