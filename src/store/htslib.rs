use std::path::Path;
use std::sync::{Arc, Mutex};

use rust_htslib::bcf::{self, Read};
use rust_htslib::faidx;
use tracing::{debug, trace};

use crate::genomics::{to_one_based, GenotypeCall, Interval, Variant};

use super::{query_span, ReferenceStore, StoreError, VariantSource};

/// Reference store backed by an indexed FASTA (`.fai`, optionally bgzipped).
pub struct FaidxReference {
    reader: faidx::Reader,
}

impl std::fmt::Debug for FaidxReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaidxReference").finish_non_exhaustive()
    }
}

impl FaidxReference {
    /// Open a FASTA file; htslib builds the `.fai` index if it is missing.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        debug!(path = %path.as_ref().display(), "opening indexed fasta");
        let reader = faidx::Reader::from_path(path)?;
        Ok(Self { reader })
    }
}

impl ReferenceStore for FaidxReference {
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<String, StoreError> {
        let out_of_bounds = || StoreError::OutOfBounds {
            chrom: chrom.to_string(),
            start,
            end,
        };
        if start < 0 || end < start {
            return Err(out_of_bounds());
        }
        if start == end {
            return Ok(String::new());
        }

        // faidx takes an inclusive end coordinate.
        let seq = self
            .reader
            .fetch_seq_string(chrom, start as usize, (end - 1) as usize)?;
        if seq.len() as i64 != end - start {
            return Err(out_of_bounds());
        }
        trace!(chrom, start, end, "fetched reference bases");
        Ok(seq)
    }
}

/// Variant source backed by an indexed VCF/BCF (`.tbi` or `.csi`).
///
/// The htslib reader is stateful, so fetches are serialized behind a lock.
pub struct BcfVariantSource {
    reader: Mutex<bcf::IndexedReader>,
    samples: Vec<String>,
}

impl std::fmt::Debug for BcfVariantSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BcfVariantSource")
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

impl BcfVariantSource {
    /// Open an indexed VCF/BCF file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        debug!(path = %path.as_ref().display(), "opening indexed variant file");
        let reader = bcf::IndexedReader::from_path(path)?;
        let samples = reader
            .header()
            .samples()
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();
        Ok(Self {
            reader: Mutex::new(reader),
            samples,
        })
    }
}

fn record_to_variant(
    chrom: &Arc<str>,
    record: &bcf::Record,
    sample_count: usize,
) -> Result<Variant, StoreError> {
    let alleles = record.alleles();
    let ref_allele = alleles
        .first()
        .map(|allele| String::from_utf8_lossy(allele).into_owned())
        .unwrap_or_default();
    let alt_alleles = alleles
        .iter()
        .skip(1)
        .map(|allele| String::from_utf8_lossy(allele).into_owned())
        .collect();

    let genotypes = if sample_count == 0 {
        Vec::new()
    } else {
        let genotypes = record.genotypes()?;
        (0..sample_count)
            .map(|idx| GenotypeCall::from_alleles(genotypes.get(idx).iter().map(|a| a.index())))
            .collect()
    };

    Ok(
        Variant::with_alts(Arc::clone(chrom), to_one_based(record.pos()), ref_allele, alt_alleles)
            .with_genotypes(genotypes),
    )
}

impl VariantSource for BcfVariantSource {
    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn fetch(&self, region: &Interval) -> Result<Vec<Variant>, StoreError> {
        let mut reader = self.reader.lock().map_err(|_| StoreError::LockPoisoned)?;

        // A contig absent from the header simply has no records.
        let rid = match reader.header().name2rid(region.chrom().as_bytes()) {
            Ok(rid) => rid,
            Err(_) => {
                debug!(chrom = region.chrom(), "contig not in variant header");
                return Ok(Vec::new());
            }
        };

        let (start, end) = query_span(region);
        reader.fetch(rid, start as u64, Some(end as u64))?;

        let chrom = region.chrom_arc();
        let sample_count = self.samples.len();
        let mut variants = Vec::new();
        for result in reader.records() {
            let record = result?;
            variants.push(record_to_variant(&chrom, &record, sample_count)?);
        }
        trace!(region = %region, count = variants.len(), "fetched variants");
        Ok(variants)
    }
}
