//! Genomic primitives shared by the extractor, the collaborator stores and the
//! query layer: intervals, variants, genotype calls, variant identities,
//! nucleotide complementing and VCF rendering.

mod complement;
mod interval;
mod variant;
mod vcf;

pub use complement::{complement_base, reverse_complement, ComplementError};
pub use interval::{Interval, IntervalError, Strand};
pub use variant::{
    to_one_based, to_zero_based, GenotypeCall, Variant, VariantId, VariantIdError,
};
pub use vcf::{record_line, render_vcf, write_vcf};
