//! Extraction benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use varseq::*;

fn reference(len: usize) -> InMemoryReference {
    let seq: Vec<u8> = b"ACGT".iter().copied().cycle().take(len).collect();
    InMemoryReference::new().with_chrom("chr1", seq)
}

/// One SNV, deletion or insertion every 25 bases.
fn variants(start: i64, end: i64) -> Vec<Variant> {
    (start..end)
        .step_by(25)
        .enumerate()
        .map(|(i, pos)| match i % 3 {
            0 => Variant::new("chr1", pos + 1, "A", "C"),
            1 => Variant::new("chr1", pos + 1, "ACG", "A"),
            _ => Variant::new("chr1", pos + 1, "A", "AGG"),
        })
        .collect()
}

fn benchmark_extract(c: &mut Criterion) {
    let extractor = VariantSeqExtractor::new(reference(100_000));
    let interval = Interval::new("chr1", 40_000, 41_000).unwrap();
    let variants = variants(40_000, 41_000);

    c.bench_function("extract_fixed_1kb", |b| {
        b.iter(|| {
            black_box(
                extractor
                    .extract(&interval, black_box(&variants), 40_500, true)
                    .unwrap(),
            );
        });
    });

    c.bench_function("extract_variable_1kb", |b| {
        b.iter(|| {
            black_box(
                extractor
                    .extract(&interval, black_box(&variants), 40_500, false)
                    .unwrap(),
            );
        });
    });
}

criterion_group!(benches, benchmark_extract);
criterion_main!(benches);
