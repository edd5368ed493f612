#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use varseq::genomics::GenotypeCall::{Het, HomAlt, HomRef, Unknown};
use varseq::{InMemoryReference, InMemoryVariantSource, Interval, Variant};

pub const REFERENCE: &str = "ACGTACGT";

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("VARSEQ_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set VARSEQ_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// `chr1 = ACGTACGT`.
pub fn reference() -> InMemoryReference {
    InMemoryReference::new().with_chrom("chr1", REFERENCE)
}

/// `chr1:2-6`, bases `GTAC`.
pub fn interval() -> Interval {
    Interval::new("chr1", 2, 6).expect("valid interval")
}

/// Three samples over a handful of SNVs and indels on `chr1` and `chr2`.
pub fn cohort() -> InMemoryVariantSource {
    InMemoryVariantSource::new(["NA001", "NA002", "NA003"])
        .with_variant(Variant::new("chr1", 3, "G", "C").with_genotypes(vec![Het, HomRef, HomAlt]))
        .with_variant(Variant::new("chr1", 5, "A", "T").with_genotypes(vec![HomRef, Het, Unknown]))
        .with_variant(Variant::new("chr1", 12, "CT", "C").with_genotypes(vec![HomAlt, HomAlt, HomRef]))
        .with_variant(Variant::new("chr1", 30, "G", "GAA").with_genotypes(vec![Unknown, HomRef, Het]))
        .with_variant(Variant::new("chr2", 7, "T", "A").with_genotypes(vec![Het, Het, Het]))
}
