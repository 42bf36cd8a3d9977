//! Fuzz target for annotation document decoding.
//!
//! Decoding must never panic, and must never keep a row at or past the
//! bound it was given.

#![no_main]

use libfuzzer_sys::fuzz_target;
use csvnote::annotations::io_json::from_json_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(store) = from_json_str(text, 16) {
        assert!(store.iter().all(|(row, _)| row.as_usize() < 16));
    }
});
