//! Collaborator interfaces for reference bases and variant calls.
//!
//! The extractor and query layer only see the [`ReferenceStore`] and
//! [`VariantSource`] traits. In-memory implementations back tests and small
//! embedded references; the htslib implementations read indexed FASTA and
//! indexed VCF/BCF files.

mod htslib;
mod memory;

pub use htslib::{BcfVariantSource, FaidxReference};
pub use memory::{InMemoryReference, InMemoryVariantSource};

use std::sync::Arc;

use thiserror::Error;

use crate::genomics::{GenotypeCall, Interval, Variant};

/// Errors surfaced by reference and variant stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The chromosome is not present in the store.
    #[error("unknown chromosome '{0}'")]
    UnknownChromosome(String),

    /// Requested range is invalid or runs past the chromosome end.
    #[error("region {chrom}:{start}-{end} is out of bounds")]
    OutOfBounds {
        /// Chromosome name.
        chrom: String,
        /// Requested 0-based start.
        start: i64,
        /// Requested 0-based exclusive end.
        end: i64,
    },

    /// A previous panic poisoned the reader lock.
    #[error("variant reader lock poisoned")]
    LockPoisoned,

    /// Error reported by htslib.
    #[error("htslib error: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),
}

/// Source of reference bases.
pub trait ReferenceStore {
    /// Bases of `chrom` over 0-based half-open `[start, end)`.
    ///
    /// Implementations must return exactly `end - start` bases or fail.
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<String, StoreError>;
}

impl<R: ReferenceStore + ?Sized> ReferenceStore for &R {
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<String, StoreError> {
        (**self).fetch(chrom, start, end)
    }
}

impl<R: ReferenceStore + ?Sized> ReferenceStore for Arc<R> {
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<String, StoreError> {
        (**self).fetch(chrom, start, end)
    }
}

/// Source of variant records with per-sample genotype calls.
pub trait VariantSource {
    /// Sample names, in genotype column order.
    fn samples(&self) -> &[String];

    /// Records overlapping `region`, in file (position) order.
    ///
    /// See [`overlaps_region`] for the overlap rule.
    fn fetch(&self, region: &Interval) -> Result<Vec<Variant>, StoreError>;

    /// Genotype call of the sample in column `sample_index`.
    ///
    /// Records without a call for that column report [`GenotypeCall::Unknown`].
    fn genotype(&self, variant: &Variant, sample_index: usize) -> GenotypeCall {
        variant
            .genotypes()
            .get(sample_index)
            .copied()
            .unwrap_or(GenotypeCall::Unknown)
    }
}

impl<S: VariantSource + ?Sized> VariantSource for &S {
    fn samples(&self) -> &[String] {
        (**self).samples()
    }

    fn fetch(&self, region: &Interval) -> Result<Vec<Variant>, StoreError> {
        (**self).fetch(region)
    }

    fn genotype(&self, variant: &Variant, sample_index: usize) -> GenotypeCall {
        (**self).genotype(variant, sample_index)
    }
}

/// Inclusive 0-based query span used against variant indices.
///
/// Empty regions still query the single base at `start`.
pub(crate) fn query_span(region: &Interval) -> (i64, i64) {
    (region.start(), (region.end() - 1).max(region.start()))
}

/// Whether a record starting at 0-based `start` with a REF of `ref_len` bases
/// overlaps `region`. Records with an empty REF occupy one base.
pub fn overlaps_region(region: &Interval, start: i64, ref_len: usize) -> bool {
    let (query_start, query_end) = query_span(region);
    let span = (ref_len as i64).max(1);
    start <= query_end && start + span > query_start
}
