//! Performance benchmarks for stats projections and snapshot encoding.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Mood histogram and per-date frequency at various journal sizes
//! - Snapshot encode/decode at various journal sizes

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use moodlog::journal_core::stats::{entry_frequency_by_date, mood_histogram};
use moodlog::journal_core::{format_entry_date, JournalEntry, Mood};
use moodlog::store::StoreSnapshot;

/// Builds `count` entries spread over a year, cycling through the catalogue.
fn sample_entries(count: usize) -> Vec<JournalEntry> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid start date");
    (0..count)
        .map(|i| {
            let date = start + Duration::days((i % 365) as i64);
            let mood = Mood::CATALOGUE[i % Mood::CATALOGUE.len()].clone();
            JournalEntry::new(i.to_string(), format_entry_date(date), "benchmark entry", mood)
        })
        .collect()
}

const SIZES: [(&str, usize); 3] = [("100", 100), ("1K", 1_000), ("10K", 10_000)];

fn bench_mood_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("mood_histogram");

    for (name, size) in SIZES {
        let entries = sample_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &entries, |b, entries| {
            b.iter(|| black_box(mood_histogram(black_box(entries))));
        });
    }

    group.finish();
}

fn bench_entry_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_frequency_by_date");

    for (name, size) in SIZES {
        let entries = sample_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &entries, |b, entries| {
            b.iter(|| black_box(entry_frequency_by_date(black_box(entries))));
        });
    }

    group.finish();
}

/// Every mutation re-encodes the whole store, so this bounds mutation latency.
fn bench_snapshot_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_round_trip");

    for (name, size) in SIZES {
        let snapshot = StoreSnapshot::new(Some("bench".to_string()), sample_entries(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &snapshot, |b, snapshot| {
            b.iter(|| {
                let bytes = snapshot.encode().expect("encoding failed");
                let decoded = StoreSnapshot::decode("root", &bytes).expect("decoding failed");
                black_box(decoded);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mood_histogram,
    bench_entry_frequency,
    bench_snapshot_round_trip
);
criterion_main!(benches);
