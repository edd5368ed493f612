//! Query layer over a [`VariantSource`].
//!
//! [`VariantCatalog`] answers point lookups (by region, by identity, by
//! sample) and builds lazy [`VariantQueryable`] / [`SampleQueryable`] streams
//! for interval batches.

mod predicate;
mod queryable;

pub use predicate::{MaskFn, VariantQuery};
pub use queryable::{SampleGroup, SampleQueryable, VariantGroup, VariantQueryable};

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::genomics::{
    to_zero_based, GenotypeCall, Interval, IntervalError, Variant, VariantId, VariantIdError,
};
use crate::store::{StoreError, VariantSource};

/// Sample name to the variants it carries, each with its genotype call.
pub type SampleVariants = BTreeMap<String, Vec<(Variant, GenotypeCall)>>;

/// Errors returned by catalog queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Variant identity string could not be parsed.
    #[error(transparent)]
    MalformedVariantId(#[from] VariantIdError),

    /// Sample name is not a column of the source.
    #[error("sample '{0}' not found")]
    SampleNotFound(String),

    /// No record matches the requested identity.
    #[error("variant {0} not found")]
    VariantNotFound(String),

    /// Query region could not be built.
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// The variant source failed.
    #[error("variant source failed: {0}")]
    Store(#[from] StoreError),
}

impl QueryError {
    /// True for lookups that found nothing (unknown sample or variant).
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::SampleNotFound(_) | QueryError::VariantNotFound(_))
    }
}

/// Region, identity and sample queries over a multi-sample variant source.
#[derive(Debug)]
pub struct VariantCatalog<S> {
    source: S,
    sample_index: HashMap<String, usize>,
}

impl<S: VariantSource> VariantCatalog<S> {
    /// Wrap a source, indexing its sample columns by name.
    pub fn new(source: S) -> Self {
        let sample_index = source
            .samples()
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self {
            source,
            sample_index,
        }
    }

    /// Underlying variant source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sample names in column order.
    pub fn samples(&self) -> &[String] {
        self.source.samples()
    }

    /// Column index of `sample`.
    pub fn sample_index(&self, sample: &str) -> Result<usize, QueryError> {
        self.sample_index
            .get(sample)
            .copied()
            .ok_or_else(|| QueryError::SampleNotFound(sample.to_string()))
    }

    /// Whether `sample` carries `variant` (het or hom-alt).
    pub fn has_variant(&self, variant: &Variant, sample: &str) -> Result<bool, QueryError> {
        let idx = self.sample_index(sample)?;
        Ok(self.source.genotype(variant, idx).has_variant())
    }

    /// Records overlapping `interval`, optionally restricted to those carried
    /// by `sample`.
    pub fn fetch_variants(
        &self,
        interval: &Interval,
        sample: Option<&str>,
    ) -> Result<Vec<Variant>, QueryError> {
        let sample_idx = sample.map(|s| self.sample_index(s)).transpose()?;
        let mut variants = self.source.fetch(interval)?;
        if let Some(idx) = sample_idx {
            variants.retain(|v| self.source.genotype(v, idx).has_variant());
        }
        debug!(interval = %interval, sample, hits = variants.len(), "fetched variants");
        Ok(variants)
    }

    /// Lazy per-interval stream of [`fetch_variants`](Self::fetch_variants)
    /// results.
    pub fn query_variants<'a, I>(&'a self, intervals: I, sample: Option<&str>) -> VariantQueryable<'a>
    where
        I: IntoIterator<Item = Interval>,
        I::IntoIter: 'a,
    {
        let sample = sample.map(str::to_string);
        let groups = intervals.into_iter().map(move |interval| -> Result<_, QueryError> {
            let variants = self.fetch_variants(&interval, sample.as_deref())?;
            Ok(VariantGroup { variants, interval })
        });
        VariantQueryable::new(self.samples().to_vec(), groups)
    }

    /// Record matching an identity string `chrom:pos:ref:['alt']`.
    pub fn get_variant_by_id(&self, id: &str) -> Result<Variant, QueryError> {
        let id: VariantId = id.parse()?;
        let start = to_zero_based(id.pos);
        let region = Interval::new(id.chrom.as_str(), start, start + 1)?;
        self.source
            .fetch(&region)?
            .into_iter()
            .find(|v| {
                v.pos() == id.pos && v.ref_allele() == id.ref_allele && v.alt_allele() == id.alt_allele
            })
            .ok_or_else(|| QueryError::VariantNotFound(id.to_string()))
    }

    /// Samples carrying `variant`, in column order, with their calls.
    pub fn get_samples(&self, variant: &Variant) -> Vec<(String, GenotypeCall)> {
        self.samples()
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                let call = self.source.genotype(variant, idx);
                call.has_variant().then(|| (name.clone(), call))
            })
            .collect()
    }

    /// Variants carried by each sample across `intervals`.
    ///
    /// A variant reached through several overlapping intervals is listed once
    /// per sample.
    pub fn fetch_samples_with_variants<'i, I>(&self, intervals: I) -> Result<SampleVariants, QueryError>
    where
        I: IntoIterator<Item = &'i Interval>,
    {
        let mut by_sample = SampleVariants::new();
        let mut seen: HashMap<String, HashSet<VariantId>> = HashMap::new();
        for interval in intervals {
            for variant in self.fetch_variants(interval, None)? {
                let id = variant.id();
                for (sample, call) in self.get_samples(&variant) {
                    if seen.entry(sample.clone()).or_default().insert(id.clone()) {
                        by_sample
                            .entry(sample)
                            .or_default()
                            .push((variant.clone(), call));
                    }
                }
            }
        }
        Ok(by_sample)
    }

    /// Lazy per-interval stream of
    /// [`fetch_samples_with_variants`](Self::fetch_samples_with_variants).
    pub fn query_samples<'a, I>(&'a self, intervals: I) -> SampleQueryable<'a>
    where
        I: IntoIterator<Item = Interval>,
        I::IntoIter: 'a,
    {
        let groups = intervals.into_iter().map(move |interval| -> Result<_, QueryError> {
            let samples = self.fetch_samples_with_variants([&interval])?;
            Ok(SampleGroup { samples, interval })
        });
        SampleQueryable::new(groups)
    }
}
