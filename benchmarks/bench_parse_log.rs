use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use ssca1_times::parser::{elapsed_seconds_from_line, LogParser};
use ssca1_times::{format_records, LogRecord};

fn ssca1_log(filler_lines: usize) -> String {
    let mut log = String::from("Running with OpenMP, thread count: 16\n");
    log.push_str("\n\tElapsed time: 0 hour(s), 0 minute(s), 4 second(s), 112 milliseconds,  9 micro second(s).\n");
    for i in 0..filler_lines {
        log.push_str(&format!("  alignment {} score {} at offset {}\n", i, i * 7, i * 13));
    }
    log.push_str("\n\tElapsed time: 0 hour(s), 2 minute(s), 31 second(s), 604 milliseconds,  17 micro second(s).\n");
    log
}

fn bench_elapsed_line(c: &mut Criterion) {
    let line = "\tElapsed time: 1 hour(s), 2 minute(s), 3 second(s), 600 milliseconds,  45 micro second(s).";
    c.bench_function("elapsed_line", |b| {
        b.iter(|| black_box(elapsed_seconds_from_line(black_box(line))));
    });
}

fn bench_parse_small_log(c: &mut Criterion) {
    let parser = LogParser::default();
    let log = ssca1_log(10);
    c.bench_function("parse_small_log", |b| {
        b.iter(|| black_box(parser.parse_str(black_box(&log))));
    });
}

fn bench_parse_large_log(c: &mut Criterion) {
    let parser = LogParser::default();
    let log = ssca1_log(50_000);
    c.bench_function("parse_large_log", |b| {
        b.iter(|| black_box(parser.parse_str(black_box(&log))));
    });
}

fn bench_format_records(c: &mut Criterion) {
    let records: Vec<LogRecord> = (1..=256).map(|t| LogRecord::new(t, 10_000 / t as u64)).collect();
    c.bench_function("format_records", |b| {
        b.iter(|| black_box(format_records(black_box(&records))));
    });
}

criterion_group!(
    benches,
    bench_elapsed_line,
    bench_parse_small_log,
    bench_parse_large_log,
    bench_format_records
);
criterion_main!(benches);
