#![allow(dead_code)]

use std::collections::BTreeMap;

use csvnote::data::RowIndex;
use csvnote::table::{Annotation, AnnotationStore};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A field with no delimiter, quote or line break in it.
pub fn arb_plain_field() -> impl Strategy<Value = String> {
    "[^,\"\r\n]{0,8}"
}

/// A non-blank plain line of 1..=6 fields.
pub fn arb_plain_line() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9 ]{0,5}", 1..=6)
        .prop_map(|fields| fields.join(","))
        .prop_filter("line must not be blank", |line| !line.is_empty())
}

pub fn arb_severity() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Info".to_string()),
        Just("Warn".to_string()),
        Just("Critical".to_string()),
        "[A-Za-z]{0,6}",
    ]
}

/// Stores whose rows all fall below `max_row`.
pub fn arb_store_with(max_row: usize, note: &'static str) -> BoxedStrategy<AnnotationStore> {
    prop::collection::btree_map(0..max_row, (note, arb_severity()), 0..20)
        .prop_map(store_from_map)
        .boxed()
}

pub fn arb_store(max_row: usize) -> BoxedStrategy<AnnotationStore> {
    arb_store_with(max_row, ".{0,12}")
}

fn store_from_map(map: BTreeMap<usize, (String, String)>) -> AnnotationStore {
    map.into_iter()
        .map(|(row, (note, severity))| (RowIndex::new(row), Annotation::new(note, severity)))
        .collect()
}

/// Row keys of a store in ascending order.
pub fn keys(store: &AnnotationStore) -> Vec<usize> {
    store.sorted().into_iter().map(|(row, _)| row.as_usize()).collect()
}
