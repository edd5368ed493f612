//! # Variant-aware sequence extraction
//!
//! Applies VCF-style variants to a reference interval and returns the mutated
//! sequence, in either fixed-length mode (the result always spans the interval
//! length) or variable-length mode (the result reflects every insertion and
//! deletion inside the interval).
//!
//! ## Pipeline
//!
//! 1. **Normalize**: each variant becomes a 0-based (reference, replacement)
//!    pair
//! 2. **Split**: pairs straddling the anchor are cut in two
//! 3. **Assemble**: pairs are walked outward from the anchor into two segment
//!    lists over one extended reference window
//! 4. **Resolve**: the window is fetched once, both lists are resolved and
//!    concatenated, trimmed and reverse-complemented as needed
//!
//! ## Usage Example
//!
//! ```
//! use varseq::{InMemoryReference, Interval, Variant, VariantSeqExtractor};
//!
//! let reference = InMemoryReference::new().with_chrom("chr1", "ACGTACGT");
//! let extractor = VariantSeqExtractor::new(reference);
//!
//! let interval = Interval::new("chr1", 2, 6)?;
//! let deletion = Variant::new("chr1", 3, "GT", "G");
//!
//! assert_eq!(extractor.extract(&interval, &[deletion.clone()], 2, true)?, "GACG");
//! assert_eq!(extractor.extract(&interval, &[deletion], 2, false)?, "GAC");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod extractor; // Variant pairing, splitting and directional assembly
pub mod genomics; // Intervals, variants, complements and VCF text
pub mod query; // Region, identity and sample queries
pub mod sequence; // Segment lists and their resolution
pub mod store; // Reference and variant sources
pub mod vcf_extract; // Extraction over variants fetched from a source

/// Python bindings for the extractor.
#[cfg(feature = "python-bindings")]
pub mod python_bindings;

// Re-exports for convenience
pub use extractor::{ExtractError, ExtractorConfig, VariantSeqExtractor};
pub use genomics::{GenotypeCall, Interval, Strand, Variant, VariantId};
pub use query::{QueryError, VariantCatalog, VariantQuery, VariantQueryable};
pub use sequence::{ResolvedSequence, SequenceBuilder};
pub use store::{
    BcfVariantSource, FaidxReference, InMemoryReference, InMemoryVariantSource, ReferenceStore,
    StoreError, VariantSource,
};
pub use vcf_extract::{VcfExtractError, VcfSeqExtractor};
