//! Criterion microbenches for csvnote scanning and annotation encoding.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Single-line scanning (parse_line)
//! - Whole-document scanning (from_csv_str)
//! - Annotation encoding and decoding (to_json_string, from_json_str)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use csvnote::annotations::io_json::{from_json_str, to_json_string};
use csvnote::data::io_csv::from_csv_str;
use csvnote::data::{parse_line, RowIndex};
use csvnote::table::{Annotation, AnnotationStore};

const LINE: &str = r#"1042, 2024-03-01 ,"Oslo, Norway",17.5,"said ""hi"" twice",,ok"#;

fn csv_document(rows: usize) -> String {
    let mut text = String::from("id,date,place,value,comment,empty,status\n");
    for i in 0..rows {
        text.push_str(&format!("{},2024-03-01,\"City {}, Region\",{}.5,plain,,ok\n", i, i % 17, i));
    }
    text
}

fn annotation_store(rows: usize) -> AnnotationStore {
    (0..rows)
        .step_by(3)
        .map(|row| {
            let severity = ["Info", "Warn", "Critical"][(row / 3) % 3];
            (RowIndex::new(row), Annotation::new(format!("note for row {}", row), severity))
        })
        .collect()
}

/// Benchmark scanning one line.
fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(LINE.len() as u64));

    group.bench_function("parse_line", |b| {
        b.iter(|| black_box(parse_line(black_box(LINE))))
    });

    group.finish();
}

/// Benchmark scanning a whole document held in memory.
fn bench_scan_document(c: &mut Criterion) {
    let text = csv_document(5_000);
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("from_csv_str", |b| {
        b.iter(|| black_box(from_csv_str(black_box(&text))))
    });

    group.finish();
}

/// Benchmark annotation encoding.
fn bench_encode(c: &mut Criterion) {
    let store = annotation_store(5_000);
    let mut group = c.benchmark_group("annotations");
    group.throughput(Throughput::Elements(store.len() as u64));

    group.bench_function("to_json_string", |b| {
        b.iter(|| black_box(to_json_string(black_box(&store)).unwrap()))
    });

    group.finish();
}

/// Benchmark annotation decoding (for comparison).
fn bench_decode(c: &mut Criterion) {
    let store = annotation_store(5_000);
    let json = to_json_string(&store).expect("Failed to encode annotations");
    let mut group = c.benchmark_group("annotations");
    group.throughput(Throughput::Elements(store.len() as u64));

    group.bench_function("from_json_str", |b| {
        b.iter(|| black_box(from_json_str(black_box(&json), 5_000).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_line,
    bench_scan_document,
    bench_encode,
    bench_decode
);
criterion_main!(benches);
