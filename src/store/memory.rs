use std::collections::HashMap;

use crate::genomics::{Interval, Variant};

use super::{overlaps_region, ReferenceStore, StoreError, VariantSource};

/// Reference genome held in memory, keyed by chromosome name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    chroms: HashMap<String, Vec<u8>>,
}

impl InMemoryReference {
    /// Empty reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_chrom(mut self, name: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        self.insert(name, seq);
        self
    }

    /// Add or replace a chromosome sequence.
    pub fn insert(&mut self, name: impl Into<String>, seq: impl Into<Vec<u8>>) {
        self.chroms.insert(name.into(), seq.into());
    }

    /// Length of a chromosome, if present.
    pub fn chrom_len(&self, name: &str) -> Option<usize> {
        self.chroms.get(name).map(Vec::len)
    }
}

impl ReferenceStore for InMemoryReference {
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<String, StoreError> {
        let seq = self
            .chroms
            .get(chrom)
            .ok_or_else(|| StoreError::UnknownChromosome(chrom.to_string()))?;
        if start < 0 || end < start || end > seq.len() as i64 {
            return Err(StoreError::OutOfBounds {
                chrom: chrom.to_string(),
                start,
                end,
            });
        }
        let bases = &seq[start as usize..end as usize];
        Ok(String::from_utf8_lossy(bases).into_owned())
    }
}

/// Variant calls held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVariantSource {
    samples: Vec<String>,
    variants: Vec<Variant>,
}

impl InMemoryVariantSource {
    /// Empty source for the given sample columns.
    pub fn new<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            samples: samples.into_iter().map(Into::into).collect(),
            variants: Vec::new(),
        }
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.push(variant);
        self
    }

    /// Add a record.
    pub fn push(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    /// All stored records in insertion order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

impl VariantSource for InMemoryVariantSource {
    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn fetch(&self, region: &Interval) -> Result<Vec<Variant>, StoreError> {
        let mut hits: Vec<Variant> = self
            .variants
            .iter()
            .filter(|v| v.chrom() == region.chrom())
            .filter(|v| overlaps_region(region, v.start(), v.ref_allele().len()))
            .cloned()
            .collect();
        hits.sort_by_key(Variant::start);
        Ok(hits)
    }
}
