//! Variant-aware sequence extraction.
//!
//! [`VariantSeqExtractor::extract`] applies a set of variants to a reference
//! interval and returns the mutated sequence:
//!
//! 1. pair each variant with its replacement allele ([`pairs`]);
//! 2. split pairs straddling the anchor (and, in variable-length mode, the
//!    interval bounds);
//! 3. partition into upstream/downstream and order each side outward from the
//!    anchor ([`assemble`]);
//! 4. in fixed-length mode, grow the fetch window by the net deletions;
//! 5. build one segment list per side, fetch a single reference window and
//!    resolve both lists against it;
//! 6. concatenate, clip to the interval length when fixed, and
//!    reverse-complement minus-strand intervals.

pub mod assemble;
pub mod pairs;

use thiserror::Error;
use tracing::{debug, trace};

use crate::genomics::{reverse_complement, ComplementError, Interval, Variant, VariantId};
use crate::sequence::{ReferenceWindow, SequenceError};
use crate::store::{ReferenceStore, StoreError};

use assemble::{cut_to_fixed_len, downstream_builder, extended_bounds, partition, upstream_builder};
use pairs::{split_overlapping, variants_to_pairs, SplitSide};

/// Errors that can occur during extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The reference store failed; propagated unchanged.
    #[error("reference fetch failed: {0}")]
    Store(#[from] StoreError),

    /// A variant belongs to a different chromosome than the interval.
    #[error("variant {variant} is not on chromosome '{chrom}'")]
    ChromosomeMismatch {
        /// Offending variant.
        variant: VariantId,
        /// Chromosome of the requested interval.
        chrom: String,
    },

    /// The reference store returned a window of the wrong size.
    #[error("reference window for {chrom}:{start}-{end} has {actual} bases")]
    WindowLength {
        /// Chromosome name.
        chrom: String,
        /// Window start.
        start: i64,
        /// Window end.
        end: i64,
        /// Number of bases returned.
        actual: usize,
    },

    /// Segment resolution failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Reverse-complementing the output failed.
    #[error(transparent)]
    Complement(#[from] ComplementError),

    /// The assembled bytes are not valid UTF-8 (non-ASCII allele text).
    #[error("assembled sequence is not valid UTF-8")]
    InvalidUtf8,
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Reverse-complement output for minus-strand intervals.
    pub use_strand: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { use_strand: true }
    }
}

impl ExtractorConfig {
    /// Enable or disable strand-aware output.
    pub fn with_strand(mut self, enabled: bool) -> Self {
        self.use_strand = enabled;
        self
    }
}

/// Applies variants to reference intervals fetched from a [`ReferenceStore`].
///
/// Extraction keeps no state between calls, so one extractor can serve
/// concurrent callers if the store itself allows concurrent reads.
#[derive(Debug, Clone)]
pub struct VariantSeqExtractor<R> {
    reference: R,
    config: ExtractorConfig,
}

impl<R: ReferenceStore> VariantSeqExtractor<R> {
    /// Extractor with default configuration.
    pub fn new(reference: R) -> Self {
        Self::with_config(reference, ExtractorConfig::default())
    }

    /// Extractor with explicit configuration.
    pub fn with_config(reference: R, config: ExtractorConfig) -> Self {
        Self { reference, config }
    }

    /// Underlying reference store.
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// Active configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Sequence of `interval` with `variants` applied.
    ///
    /// * `anchor`: 0-based coordinate from which assembly walks outward;
    ///   clamped into `[interval.start, interval.end]`.
    /// * `fixed_len`: when true the result has exactly `interval.len()` bases:
    ///   deletions pull in extra reference and insertion surplus is clipped
    ///   away from the anchor. When false the result is the interval with all
    ///   overlapping variant material applied, so its length varies.
    pub fn extract(
        &self,
        interval: &Interval,
        variants: &[Variant],
        anchor: i64,
        fixed_len: bool,
    ) -> Result<String, ExtractError> {
        let anchor = interval.clamp(anchor);
        debug!(
            interval = %interval,
            anchor,
            fixed_len,
            variants = variants.len(),
            "extracting variant sequence"
        );

        if let Some(stray) = variants.iter().find(|v| v.chrom() != interval.chrom()) {
            return Err(ExtractError::ChromosomeMismatch {
                variant: stray.id(),
                chrom: interval.chrom().to_string(),
            });
        }

        let mut pairs = split_overlapping(variants_to_pairs(variants), anchor, SplitSide::Both);
        if !fixed_len {
            pairs = split_overlapping(pairs, interval.start(), SplitSide::Right);
            pairs = split_overlapping(pairs, interval.end(), SplitSide::Left);
        }

        let sides = partition(pairs, anchor);
        let (istart, iend) = if fixed_len {
            extended_bounds(interval, &sides)
        } else {
            (interval.start(), interval.end())
        };
        trace!(istart, iend, "reference window");

        let down = downstream_builder(&sides.downstream, anchor, istart);
        let up = upstream_builder(&sides.upstream, anchor, iend);

        let window = self.fetch_window(interval.chrom(), istart, iend)?;
        let mut down_seq = down.resolve(&window)?.concat();
        let mut up_seq = up.resolve(&window)?.concat();

        if fixed_len {
            (down_seq, up_seq) = cut_to_fixed_len(down_seq, up_seq, interval, anchor);
        }

        let mut seq = down_seq;
        seq.extend_from_slice(&up_seq);

        if self.config.use_strand && interval.strand().is_reverse() {
            seq = reverse_complement(&seq)?;
        }

        String::from_utf8(seq).map_err(|_| ExtractError::InvalidUtf8)
    }

    fn fetch_window(&self, chrom: &str, start: i64, end: i64) -> Result<ReferenceWindow, ExtractError> {
        let bases = self.reference.fetch(chrom, start, end)?;
        if bases.len() as i64 != end - start {
            return Err(ExtractError::WindowLength {
                chrom: chrom.to_string(),
                start,
                end,
                actual: bases.len(),
            });
        }
        Ok(ReferenceWindow::new(start, bases.into_bytes()))
    }
}
