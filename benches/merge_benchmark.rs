//! Performance benchmarks for merging SBOMs.
//!
//! Run with: cargo bench --bench merge_benchmark
//!
//! Component membership is a linear scan through the identity comparator, so
//! these track how the fold scales with document size and overlap.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sbom_combiner::identity::IdentityStrategy;
use sbom_combiner::model::{Component, Dependency, Document, Metadata, Tool};
use sbom_combiner::{to_json_string, MergeEngine};
use std::hint::black_box;

/// Generate a document whose components overlap with `prefix`-less ones.
fn generate_document(prefix: &str, count: usize, shared: usize) -> Document {
    let mut doc = Document::default();
    doc.metadata = Some(Metadata::with_tools(vec![Tool::new(
        Some("CycloneDX"),
        Some("cyclonedx-maven-plugin"),
        Some("2.7.9"),
    )]));

    for i in 0..count {
        let name = if i < shared {
            format!("shared-{i}")
        } else {
            format!("{prefix}-component-{i}")
        };
        let version = format!("1.{}.{}", i % 10, i % 100);
        let purl = format!("pkg:npm/{name}@{version}");
        doc.components.push(
            Component::new(name.clone())
                .with_group("bench")
                .with_version(version)
                .with_purl(purl.clone())
                .with_bom_ref(purl.clone()),
        );
        let mut dep = Dependency::new(purl);
        if i > 0 {
            dep = dep.depends_on(format!("pkg:npm/shared-{}@1.0.0", i - 1));
        }
        doc.dependencies.push(dep);
    }

    doc
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [100, 500, 1000] {
        let docs: Vec<Document> = (0..4)
            .map(|n| generate_document(&format!("doc{n}"), size, size / 2))
            .collect();
        group.throughput(Throughput::Elements((size * 4) as u64));

        group.bench_with_input(BenchmarkId::new("name_group_version", size), &docs, |b, docs| {
            let engine = MergeEngine::new();
            b.iter(|| engine.merge(black_box(docs.clone())));
        });

        group.bench_with_input(BenchmarkId::new("purl", size), &docs, |b, docs| {
            let engine = MergeEngine::new().with_strategy(IdentityStrategy::Purl);
            b.iter(|| engine.merge(black_box(docs.clone())));
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let docs: Vec<Document> = (0..4)
        .map(|n| generate_document(&format!("doc{n}"), 1000, 200))
        .collect();
    let combined = MergeEngine::new().merge(docs).expect("merge");

    c.bench_function("serialize_combined_pretty", |b| {
        b.iter(|| to_json_string(black_box(&combined), true));
    });
}

criterion_group!(benches, bench_merge, bench_serialize);
criterion_main!(benches);
