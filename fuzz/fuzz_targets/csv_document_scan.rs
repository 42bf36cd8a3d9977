//! Fuzz target for CSV document scanning.
//!
//! This fuzzer feeds arbitrary byte sequences to the scanner, checking for
//! panics, crashes, or hangs. Every non-blank line must produce a header
//! or a row.

#![no_main]

use libfuzzer_sys::fuzz_target;
use csvnote::data::io_csv::from_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let dataset = from_csv_slice(data);
    assert!(dataset.rows.is_empty() || !dataset.headers.is_empty());
});
