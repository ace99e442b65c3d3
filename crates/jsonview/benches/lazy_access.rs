//! Benchmark: lazy view access against an eager `serde_json::Value` parse.
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonview::{ReadOptions, Value};

/// Deterministically build an array of `n` small records.
fn make_records(n: usize) -> String {
    let mut s = String::with_capacity(n * 48);
    s.push('[');
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(
            r#"{{"id":{i},"name":"item{i}","score":{}.5,"tags":["a","b"]}}"#,
            i % 100
        ));
    }
    s.push(']');
    s
}

fn lazy_single_lookup(payload: &str) -> i64 {
    let doc = jsonview::parse(payload, ReadOptions::default()).unwrap();
    let last = doc.len().unwrap();
    let record = doc.lookup(last).unwrap();
    record
        .as_object()
        .unwrap()
        .lookup("id")
        .unwrap()
        .as_i64()
        .unwrap()
}

fn lazy_full_walk(payload: &str) -> f64 {
    jsonview::parse_with(payload, ReadOptions::default(), |doc| {
        let mut total = 0.0;
        for record in doc.values()? {
            if let Value::Object(o) = record? {
                total += o.lookup("score")?.as_f64().unwrap_or_default();
            }
        }
        Ok(total)
    })
    .unwrap()
}

fn eager_single_lookup(payload: &str) -> i64 {
    let value: serde_json::Value = serde_json::from_str(payload).unwrap();
    let records = value.as_array().unwrap();
    records[records.len() - 1]["id"].as_i64().unwrap()
}

fn bench_lazy_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazy_access");
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(3));

    for &n in &[100usize, 1_000, 10_000] {
        let payload = make_records(n);
        group.bench_with_input(BenchmarkId::new("lazy_single_lookup", n), &payload, |b, p| {
            b.iter(|| black_box(lazy_single_lookup(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("lazy_full_walk", n), &payload, |b, p| {
            b.iter(|| black_box(lazy_full_walk(black_box(p))));
        });
        group.bench_with_input(
            BenchmarkId::new("serde_value_single_lookup", n),
            &payload,
            |b, p| {
                b.iter(|| black_box(eager_single_lookup(black_box(p))));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_lazy_access);
criterion_main!(benches);
