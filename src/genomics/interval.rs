use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while constructing or parsing an [`Interval`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    /// End coordinate lies before the start coordinate.
    #[error("interval end {end} is before start {start}")]
    EndBeforeStart {
        /// Requested start (0-based).
        start: i64,
        /// Requested end (0-based, exclusive).
        end: i64,
    },

    /// Start coordinate is negative.
    #[error("interval start {0} is negative")]
    NegativeStart(i64),

    /// Strand symbol other than `+`, `-` or `.`.
    #[error("invalid strand '{0}' (expected '+', '-' or '.')")]
    InvalidStrand(String),

    /// Region string could not be parsed.
    #[error("malformed region '{0}' (expected chrom:start-end[:strand])")]
    MalformedRegion(String),
}

/// Strand of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    /// Forward (`+`) strand.
    Forward,
    /// Reverse (`-`) strand; extracted sequence is reverse-complemented.
    Reverse,
    /// No strand information (`.`).
    #[default]
    Unstranded,
}

impl Strand {
    /// Single-character symbol used in region strings and BED files.
    pub fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unstranded => '.',
        }
    }

    /// Whether output on this strand must be reverse-complemented.
    pub fn is_reverse(self) -> bool {
        self == Strand::Reverse
    }
}

impl FromStr for Strand {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." | "" => Ok(Strand::Unstranded),
            other => Err(IntervalError::InvalidStrand(other.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Genomic interval following the BED convention: 0-based, half-open `[start, end)`.
///
/// Zero-length intervals are allowed and denote an insertion point. Fields are
/// private so an interval cannot be mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    chrom: Arc<str>,
    start: i64,
    end: i64,
    strand: Strand,
}

impl Interval {
    /// Construct an unstranded interval.
    pub fn new(chrom: impl Into<Arc<str>>, start: i64, end: i64) -> Result<Self, IntervalError> {
        if start < 0 {
            return Err(IntervalError::NegativeStart(start));
        }
        if end < start {
            return Err(IntervalError::EndBeforeStart { start, end });
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            strand: Strand::Unstranded,
        })
    }

    /// Construct an interval on the given strand.
    pub fn stranded(
        chrom: impl Into<Arc<str>>,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Result<Self, IntervalError> {
        Ok(Self::new(chrom, start, end)?.with_strand(strand))
    }

    /// Copy of this interval on another strand.
    pub fn with_strand(&self, strand: Strand) -> Self {
        Self {
            chrom: Arc::clone(&self.chrom),
            start: self.start,
            end: self.end,
            strand,
        }
    }

    /// Chromosome/contig name.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Shared handle to the chromosome name.
    pub fn chrom_arc(&self) -> Arc<str> {
        Arc::clone(&self.chrom)
    }

    /// 0-based inclusive start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// 0-based exclusive end.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Strand of the interval.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Number of bases covered.
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    /// True for insertion-point intervals.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp a coordinate into `[start, end]`.
    pub fn clamp(&self, pos: i64) -> i64 {
        pos.clamp(self.start, self.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)?;
        if self.strand != Strand::Unstranded {
            write!(f, ":{}", self.strand)?;
        }
        Ok(())
    }
}

/// Parse `chrom:start-end` with an optional `:+`, `:-` or `:.` suffix.
///
/// Coordinates are 0-based half-open. The chromosome name may contain `:`.
impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IntervalError::MalformedRegion(s.to_string());

        let (body, strand) = match s.rsplit_once(':') {
            Some((head, tail)) if matches!(tail, "+" | "-" | ".") => (head, tail.parse()?),
            _ => (s, Strand::Unstranded),
        };

        let (chrom, range) = body.rsplit_once(':').ok_or_else(malformed)?;
        let (start, end) = range.split_once('-').ok_or_else(malformed)?;
        if chrom.is_empty() {
            return Err(malformed());
        }
        let start = start.trim().replace(',', "").parse::<i64>().map_err(|_| malformed())?;
        let end = end.trim().replace(',', "").parse::<i64>().map_err(|_| malformed())?;

        Interval::stranded(chrom, start, end, strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            Interval::new("chr1", 5, 4),
            Err(IntervalError::EndBeforeStart { start: 5, end: 4 })
        );
        assert_eq!(Interval::new("chr1", -1, 4), Err(IntervalError::NegativeStart(-1)));
    }

    #[test]
    fn zero_length_interval_is_valid() {
        let interval = Interval::new("chr1", 7, 7).unwrap();
        assert!(interval.is_empty());
        assert_eq!(interval.len(), 0);
    }

    #[test]
    fn clamp_stays_within_closed_bounds() {
        let interval = Interval::new("chr1", 10, 20).unwrap();
        assert_eq!(interval.clamp(3), 10);
        assert_eq!(interval.clamp(15), 15);
        assert_eq!(interval.clamp(20), 20);
        assert_eq!(interval.clamp(99), 20);
    }

    #[test]
    fn parses_region_strings() {
        let interval: Interval = "chr2:1,000-2,000:-".parse().unwrap();
        assert_eq!(interval.chrom(), "chr2");
        assert_eq!(interval.start(), 1000);
        assert_eq!(interval.end(), 2000);
        assert_eq!(interval.strand(), Strand::Reverse);

        let hla: Interval = "HLA-A*01:01:01:01:5-9".parse().unwrap();
        assert_eq!(hla.chrom(), "HLA-A*01:01:01:01");
        assert_eq!(hla.strand(), Strand::Unstranded);

        assert!("chr1".parse::<Interval>().is_err());
        assert!("chr1:9-x".parse::<Interval>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let interval = Interval::stranded("chrX", 3, 8, Strand::Forward).unwrap();
        assert_eq!(interval.to_string(), "chrX:3-8:+");
        assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
    }
}
