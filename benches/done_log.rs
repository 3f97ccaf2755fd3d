//! Benchmarks for reading the ledger files.
//!
//! Benchmark targets:
//! - Parsing a done log of a few thousand records: <10ms
//! - Scanning a large pending file: <5ms

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memolog::storage::parse_records;
use memolog::{ArticleSlug, ArticleTitle, DoneRecord, MemoEntry, MemoStore, PendingStore};
use std::hint::black_box;
use tempfile::TempDir;

fn build_done_log(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
            + chrono::Duration::minutes(i64::try_from(i).unwrap_or(0));
        let memo = MemoEntry::parse(&format!("memo {i}\n- outline point\n- another point"));
        let (Ok(title), Ok(slug), Ok(memo)) = (
            ArticleTitle::new(&format!("記事 {i}")),
            ArticleSlug::new(&format!("benchmark-article-{i:06}")),
            memo,
        ) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&DoneRecord::new(at, title, slug, &memo).render());
    }
    out
}

fn bench_parse_done_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("done_log_parse");

    for count in [10_usize, 100, 1_000, 5_000] {
        let text = build_done_log(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| parse_records(black_box(text)));
        });
    }

    group.finish();
}

fn bench_pending_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("pending_entries");

    for count in [10_usize, 100, 1_000] {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let text = (0..count)
            .map(|i| format!("idea {i}\n- detail a\n- detail b\n"))
            .collect::<Vec<_>>()
            .join("\n");
        let path = dir.path().join("pending.txt");
        if std::fs::write(&path, &text).is_err() {
            return;
        }
        let store = PendingStore::new(path);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &store, |b, store| {
            b.iter(|| black_box(store.entries()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_done_log, bench_pending_entries);
criterion_main!(benches);
