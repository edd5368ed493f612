//! Extraction driven by variants pulled from a [`VariantSource`].

use thiserror::Error;
use tracing::debug;

use crate::extractor::{ExtractError, ExtractorConfig, VariantSeqExtractor};
use crate::genomics::Interval;
use crate::query::{QueryError, VariantCatalog};
use crate::store::{ReferenceStore, VariantSource};

/// Errors from VCF-driven extraction.
#[derive(Debug, Error)]
pub enum VcfExtractError {
    /// Variant lookup failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Sequence assembly failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Pairs a [`VariantSeqExtractor`] with a [`VariantCatalog`] so variants are
/// fetched for the interval instead of being supplied by the caller.
#[derive(Debug)]
pub struct VcfSeqExtractor<R, S> {
    extractor: VariantSeqExtractor<R>,
    catalog: VariantCatalog<S>,
}

impl<R: ReferenceStore, S: VariantSource> VcfSeqExtractor<R, S> {
    /// Extractor with default configuration.
    pub fn new(reference: R, source: S) -> Self {
        Self::with_config(reference, source, ExtractorConfig::default())
    }

    /// Extractor with explicit configuration.
    pub fn with_config(reference: R, source: S, config: ExtractorConfig) -> Self {
        Self {
            extractor: VariantSeqExtractor::with_config(reference, config),
            catalog: VariantCatalog::new(source),
        }
    }

    /// Sequence extractor.
    pub fn extractor(&self) -> &VariantSeqExtractor<R> {
        &self.extractor
    }

    /// Variant catalog.
    pub fn catalog(&self) -> &VariantCatalog<S> {
        &self.catalog
    }

    /// One sequence per overlapping variant, each with only that variant
    /// applied. Restricted to variants carried by `sample` when given.
    pub fn extract_per_variant(
        &self,
        interval: &Interval,
        anchor: i64,
        sample: Option<&str>,
        fixed_len: bool,
    ) -> Result<Vec<String>, VcfExtractError> {
        let variants = self.catalog.fetch_variants(interval, sample)?;
        debug!(interval = %interval, variants = variants.len(), "per-variant extraction");
        variants
            .iter()
            .map(|variant| {
                self.extractor
                    .extract(interval, std::slice::from_ref(variant), anchor, fixed_len)
                    .map_err(VcfExtractError::from)
            })
            .collect()
    }

    /// One sequence with every overlapping variant applied. Restricted to
    /// variants carried by `sample` when given.
    pub fn extract_combined(
        &self,
        interval: &Interval,
        anchor: i64,
        sample: Option<&str>,
        fixed_len: bool,
    ) -> Result<String, VcfExtractError> {
        let variants = self.catalog.fetch_variants(interval, sample)?;
        Ok(self.extractor.extract(interval, &variants, anchor, fixed_len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::GenotypeCall::{Het, HomAlt, HomRef};
    use crate::genomics::Variant;
    use crate::store::{InMemoryReference, InMemoryVariantSource};

    fn extractor() -> VcfSeqExtractor<InMemoryReference, InMemoryVariantSource> {
        let reference = InMemoryReference::new().with_chrom("chr1", "ACGTACGT");
        let source = InMemoryVariantSource::new(["alice", "bob"])
            .with_variant(Variant::new("chr1", 3, "G", "C").with_genotypes(vec![Het, HomRef]))
            .with_variant(Variant::new("chr1", 5, "A", "T").with_genotypes(vec![HomRef, HomAlt]));
        VcfSeqExtractor::new(reference, source)
    }

    fn interval() -> Interval {
        Interval::new("chr1", 2, 6).unwrap()
    }

    #[test]
    fn per_variant_applies_one_variant_at_a_time() {
        let seqs = extractor().extract_per_variant(&interval(), 2, None, true).unwrap();
        assert_eq!(seqs, vec!["CTAC".to_string(), "GTTC".to_string()]);
    }

    #[test]
    fn combined_applies_everything_carried_by_the_sample() {
        let extractor = extractor();
        assert_eq!(extractor.extract_combined(&interval(), 2, None, true).unwrap(), "CTTC");
        assert_eq!(
            extractor.extract_combined(&interval(), 2, Some("alice"), true).unwrap(),
            "CTAC"
        );
        assert_eq!(
            extractor.extract_combined(&interval(), 2, Some("bob"), true).unwrap(),
            "GTTC"
        );
    }

    #[test]
    fn unknown_sample_fails_before_extraction() {
        let err = extractor()
            .extract_combined(&interval(), 2, Some("carol"), true)
            .unwrap_err();
        assert!(matches!(err, VcfExtractError::Query(ref q) if q.is_not_found()));
    }
}
