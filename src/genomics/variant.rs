use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Convert a 1-based VCF position into a 0-based coordinate.
///
/// Together with [`to_one_based`] this is the only place where the two
/// coordinate systems meet; everything downstream works in 0-based half-open
/// coordinates.
pub fn to_zero_based(pos: i64) -> i64 {
    pos - 1
}

/// Convert a 0-based coordinate into a 1-based VCF position.
pub fn to_one_based(start: i64) -> i64 {
    start + 1
}

/// Per-sample genotype call, reduced to the four classes the query layer needs.
///
/// The numeric codes follow the convention of common VCF libraries:
/// `0 = hom-ref`, `1 = het`, `2 = unknown`, `3 = hom-alt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenotypeCall {
    /// Homozygous reference.
    HomRef,
    /// Heterozygous (or any mixed non-reference call).
    Het,
    /// Homozygous alternate.
    HomAlt,
    /// Missing or partially missing call.
    Unknown,
}

impl GenotypeCall {
    /// Map a numeric genotype code.
    ///
    /// Codes other than 0, 2 and 3 count as carrying the variant and map to
    /// [`GenotypeCall::Het`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => GenotypeCall::HomRef,
            2 => GenotypeCall::Unknown,
            3 => GenotypeCall::HomAlt,
            _ => GenotypeCall::Het,
        }
    }

    /// Numeric code of this call.
    pub fn code(self) -> i32 {
        match self {
            GenotypeCall::HomRef => 0,
            GenotypeCall::Het => 1,
            GenotypeCall::Unknown => 2,
            GenotypeCall::HomAlt => 3,
        }
    }

    /// Classify a call from its per-haplotype allele indices (`None` = missing).
    pub fn from_alleles<I>(alleles: I) -> Self
    where
        I: IntoIterator<Item = Option<u32>>,
    {
        let mut first = None;
        let mut mixed = false;
        for allele in alleles {
            let Some(index) = allele else {
                return GenotypeCall::Unknown;
            };
            match first {
                None => first = Some(index),
                Some(seen) if seen != index => mixed = true,
                Some(_) => {}
            }
        }
        match first {
            None => GenotypeCall::Unknown,
            Some(_) if mixed => GenotypeCall::Het,
            Some(0) => GenotypeCall::HomRef,
            Some(_) => GenotypeCall::HomAlt,
        }
    }

    /// A sample "has" a variant unless its call is hom-ref or unknown.
    pub fn has_variant(self) -> bool {
        !matches!(self, GenotypeCall::HomRef | GenotypeCall::Unknown)
    }

    /// VCF `GT` rendering (unphased).
    pub fn as_vcf_gt(self) -> &'static str {
        match self {
            GenotypeCall::HomRef => "0/0",
            GenotypeCall::Het => "0/1",
            GenotypeCall::HomAlt => "1/1",
            GenotypeCall::Unknown => "./.",
        }
    }
}

/// A VCF-style variant record.
///
/// `pos` is 1-based as in VCF. Only the first ALT allele takes part in
/// sequence extraction; multi-allelic records should be split beforehand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    chrom: Arc<str>,
    pos: i64,
    ref_allele: String,
    alt_alleles: Vec<String>,
    genotypes: Vec<GenotypeCall>,
}

impl Variant {
    /// Bi-allelic variant without genotype columns.
    pub fn new(
        chrom: impl Into<Arc<str>>,
        pos: i64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        Self::with_alts(chrom, pos, ref_allele, vec![alt_allele.into()])
    }

    /// Variant with an explicit ALT list (possibly empty).
    pub fn with_alts(
        chrom: impl Into<Arc<str>>,
        pos: i64,
        ref_allele: impl Into<String>,
        alt_alleles: Vec<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            ref_allele: ref_allele.into(),
            alt_alleles,
            genotypes: Vec::new(),
        }
    }

    /// Attach per-sample genotype calls, in the sample order of the source.
    pub fn with_genotypes(mut self, genotypes: Vec<GenotypeCall>) -> Self {
        self.genotypes = genotypes;
        self
    }

    /// Chromosome/contig name.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// 1-based position.
    pub fn pos(&self) -> i64 {
        self.pos
    }

    /// 0-based start of the REF allele.
    pub fn start(&self) -> i64 {
        to_zero_based(self.pos)
    }

    /// 0-based exclusive end of the REF allele.
    pub fn end(&self) -> i64 {
        self.start() + self.ref_allele.len() as i64
    }

    /// REF allele text.
    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    /// First ALT allele, or the empty string for records without ALT.
    pub fn alt_allele(&self) -> &str {
        self.alt_alleles.first().map(String::as_str).unwrap_or("")
    }

    /// All ALT alleles.
    pub fn alt_alleles(&self) -> &[String] {
        &self.alt_alleles
    }

    /// Per-sample genotype calls.
    pub fn genotypes(&self) -> &[GenotypeCall] {
        &self.genotypes
    }

    /// `len(alt) - len(ref)`: negative for deletions, positive for insertions.
    pub fn length_delta(&self) -> i64 {
        self.alt_allele().len() as i64 - self.ref_allele.len() as i64
    }

    /// Canonical identity of this variant.
    pub fn id(&self) -> VariantId {
        VariantId {
            chrom: self.chrom.to_string(),
            pos: self.pos,
            ref_allele: self.ref_allele.clone(),
            alt_allele: self.alt_allele().to_string(),
        }
    }
}

/// Error returned when a variant identity string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed variant id '{0}' (expected chrom:pos:ref:['alt'])")]
pub struct VariantIdError(pub String);

/// Canonical variant key `chrom:pos:ref:['alt']`, e.g. `chr1:5:T:['C']`.
///
/// Used to de-duplicate a variant seen through several intervals or samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantId {
    /// Chromosome/contig name.
    pub chrom: String,
    /// 1-based position.
    pub pos: i64,
    /// REF allele.
    pub ref_allele: String,
    /// First ALT allele.
    pub alt_allele: String,
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:['{}']",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }
}

impl FromStr for VariantId {
    type Err = VariantIdError;

    /// The ALT is cut off at the last `:['` so breakend alleles containing `:`
    /// survive; the rest is split from the right so contig names containing
    /// `:` survive too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VariantIdError(s.to_string());

        let (head, alt_allele) = s
            .strip_suffix("']")
            .and_then(|rest| rest.rsplit_once(":['"))
            .ok_or_else(malformed)?;

        let mut fields = head.rsplitn(3, ':');
        let ref_allele = fields.next().ok_or_else(malformed)?;
        let pos = fields.next().ok_or_else(malformed)?;
        let chrom = fields.next().ok_or_else(malformed)?;

        let pos = pos.parse::<i64>().map_err(|_| malformed())?;
        if chrom.is_empty() || pos < 1 {
            return Err(malformed());
        }

        Ok(VariantId {
            chrom: chrom.to_string(),
            pos,
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
        })
    }
}

impl From<&Variant> for VariantId {
    fn from(variant: &Variant) -> Self {
        variant.id()
    }
}
