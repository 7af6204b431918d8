//! Triple set benchmarks.
//!
//! Lookups run once per snmpd request, finalize once per population cycle.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pass_persist::{OidKey, Triple, TripleSet, TripleSetBuilder, ValueType};

const BASE: &str = "1.3.6.1.4.1.8072.9999";

/// A table-shaped set: `rows` rows of 5 columns under BASE.
fn table_oids(rows: usize) -> Vec<String> {
    let mut oids = Vec::with_capacity(rows * 5);
    for column in 1..=5 {
        for row in 1..=rows {
            oids.push(format!("{}.1.{}.{}", BASE, column, row));
        }
    }
    oids
}

fn build_set(oids: &[String]) -> TripleSet {
    let mut builder = TripleSetBuilder::new();
    for oid in oids {
        builder
            .push(Triple::typed(oid.as_str(), ValueType::Gauge, 42))
            .unwrap();
    }
    builder.finalize()
}

/// Benchmark exact lookups across set sizes
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("triple_set_get");

    for rows in [10, 100, 1000, 10000] {
        let oids = table_oids(rows);
        let set = build_set(&oids);
        let probe = OidKey::new(oids[oids.len() / 2].as_str());

        group.bench_with_input(BenchmarkId::new("hit", rows * 5), &probe, |b, probe| {
            b.iter(|| black_box(set.get(probe)))
        });

        let miss = OidKey::new(format!("{}.1.3.{}", BASE, rows + 7));
        group.bench_with_input(BenchmarkId::new("miss", rows * 5), &miss, |b, miss| {
            b.iter(|| black_box(set.get(miss)))
        });
    }

    group.finish();
}

/// Benchmark successor lookups, the hot path of an snmpwalk
fn bench_get_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("triple_set_get_next");

    for rows in [10, 100, 1000, 10000] {
        let oids = table_oids(rows);
        let set = build_set(&oids);
        let probe = OidKey::new(oids[oids.len() / 2].as_str());

        group.bench_with_input(BenchmarkId::new("member", rows * 5), &probe, |b, probe| {
            b.iter(|| black_box(set.get_next(probe)))
        });
    }

    // Full walk over a mid-sized table
    let set = build_set(&table_oids(1000));
    group.bench_function("walk_5000", |b| {
        b.iter(|| {
            let mut cursor = OidKey::new(BASE);
            let mut n = 0usize;
            while let Some(t) = set.get_next(&cursor) {
                cursor = t.oid().clone();
                n += 1;
            }
            black_box(n)
        })
    });

    group.finish();
}

/// Benchmark a population cycle: key derivation, sort and dedup
fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("triple_set_finalize");

    for rows in [10, 100, 1000] {
        let oids = table_oids(rows);

        group.bench_with_input(BenchmarkId::new("build", rows * 5), &oids, |b, oids| {
            b.iter(|| black_box(build_set(oids)))
        });
    }

    group.finish();
}

/// Benchmark comparable-form derivation for OIDs of various lengths
fn bench_oid_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("oid_key_new");

    for len in [4, 8, 16, 32] {
        let text = (0..len)
            .map(|i| (i * 37 % 1000).to_string())
            .collect::<Vec<_>>()
            .join(".");

        group.bench_with_input(BenchmarkId::new("new", len), &text, |b, text| {
            b.iter(|| black_box(OidKey::new(text.as_str())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get,
    bench_get_next,
    bench_finalize,
    bench_oid_key
);
criterion_main!(benches);
