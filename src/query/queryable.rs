use std::fmt;
use std::io::Write;

use tracing::info;

use crate::genomics::{write_vcf, Interval, Variant};

use super::{QueryError, SampleVariants, VariantQuery};

/// Variants fetched for one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    /// Variants overlapping the interval, in source order.
    pub variants: Vec<Variant>,
    /// The queried interval.
    pub interval: Interval,
}

/// Per-sample variants fetched for one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGroup {
    /// Sample name to the variants (and calls) it carries.
    pub samples: SampleVariants,
    /// The queried interval.
    pub interval: Interval,
}

type GroupIter<'a, T> = Box<dyn Iterator<Item = Result<T, QueryError>> + 'a>;

fn log_progress<'a, T: 'a>(groups: GroupIter<'a, T>) -> GroupIter<'a, T> {
    Box::new(groups.enumerate().map(|(idx, group)| {
        info!(processed = idx + 1, "variant query progress");
        group
    }))
}

/// Lazy stream of [`VariantGroup`]s.
///
/// Nothing is fetched until the stream is iterated; filters rebuild each group
/// as it passes through.
pub struct VariantQueryable<'a> {
    groups: GroupIter<'a, VariantGroup>,
    samples: Vec<String>,
}

impl<'a> VariantQueryable<'a> {
    /// Wrap a stream of groups; `samples` names the genotype columns.
    pub fn new<I>(samples: Vec<String>, groups: I) -> Self
    where
        I: Iterator<Item = Result<VariantGroup, QueryError>> + 'a,
    {
        Self {
            groups: Box::new(groups),
            samples,
        }
    }

    /// Sample columns of the underlying source.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Log a progress event for every group pulled through the stream.
    pub fn with_progress(self) -> Self {
        Self {
            groups: log_progress(self.groups),
            samples: self.samples,
        }
    }

    /// Keep only variants whose flag in `query`'s mask is `true`.
    pub fn filter_all(self, query: VariantQuery) -> Self {
        let groups = self.groups.map(move |group| -> Result<_, QueryError> {
            let VariantGroup { variants, interval } = group?;
            let mask = query.evaluate(&variants, &interval);
            let variants = variants
                .into_iter()
                .zip(mask)
                .filter_map(|(variant, keep)| keep.then_some(variant))
                .collect();
            Ok(VariantGroup { variants, interval })
        });
        Self {
            groups: Box::new(groups),
            samples: self.samples,
        }
    }

    /// Keep groups holding between `min` and `max` variants (inclusive).
    ///
    /// ```
    /// use varseq::genomics::{Interval, Variant};
    /// use varseq::query::VariantCatalog;
    /// use varseq::store::InMemoryVariantSource;
    ///
    /// let source = InMemoryVariantSource::new(Vec::<String>::new())
    ///     .with_variant(Variant::new("chr1", 3, "A", "C"))
    ///     .with_variant(Variant::new("chr1", 4, "A", "C"))
    ///     .with_variant(Variant::new("chr1", 13, "A", "C"));
    /// let catalog = VariantCatalog::new(source);
    /// let intervals = vec![
    ///     Interval::new("chr1", 0, 10).unwrap(),
    ///     Interval::new("chr1", 10, 20).unwrap(),
    /// ];
    ///
    /// let single: Vec<Variant> = catalog
    ///     .query_variants(intervals, None)
    ///     .filter_by_num(Some(1), 0)
    ///     .variants()
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(single.len(), 1);
    /// assert_eq!(single[0].pos(), 13);
    /// ```
    pub fn filter_by_num(self, max: Option<usize>, min: usize) -> Self {
        self.filter_all(VariantQuery::count_range(min, max))
    }

    /// Flatten the groups into a stream of variants.
    pub fn variants(self) -> impl Iterator<Item = Result<Variant, QueryError>> + 'a {
        self.groups.flat_map(|group| match group {
            Ok(group) => group.variants.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(err) => vec![Err(err)],
        })
    }

    /// Drain the stream and write its variants as VCF.
    pub fn write_vcf<W: Write>(self, writer: &mut W) -> anyhow::Result<()> {
        let samples = self.samples.clone();
        let variants = self.variants().collect::<Result<Vec<_>, _>>()?;
        write_vcf(writer, &samples, &variants)
    }
}

impl Iterator for VariantQueryable<'_> {
    type Item = Result<VariantGroup, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.groups.next()
    }
}

impl fmt::Debug for VariantQueryable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantQueryable")
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

/// Lazy stream of [`SampleGroup`]s.
pub struct SampleQueryable<'a> {
    groups: GroupIter<'a, SampleGroup>,
}

impl<'a> SampleQueryable<'a> {
    /// Wrap a stream of per-sample groups.
    pub fn new<I>(groups: I) -> Self
    where
        I: Iterator<Item = Result<SampleGroup, QueryError>> + 'a,
    {
        Self {
            groups: Box::new(groups),
        }
    }

    /// Log a progress event for every group pulled through the stream.
    pub fn with_progress(self) -> Self {
        Self {
            groups: log_progress(self.groups),
        }
    }
}

impl Iterator for SampleQueryable<'_> {
    type Item = Result<SampleGroup, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.groups.next()
    }
}

impl fmt::Debug for SampleQueryable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleQueryable").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn group(start: i64, positions: &[i64]) -> VariantGroup {
        VariantGroup {
            variants: positions
                .iter()
                .map(|&pos| Variant::new("chr1", pos, "A", "C"))
                .collect(),
            interval: Interval::new("chr1", start, start + 10).unwrap(),
        }
    }

    #[test]
    fn filters_are_lazy() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let groups = (0..3).map(move |i| {
            counter.set(counter.get() + 1);
            Ok(group(i * 10, &[i * 10 + 1]))
        });

        let mut queryable =
            VariantQueryable::new(Vec::new(), groups).filter_all(VariantQuery::count_range(0, None));
        assert_eq!(pulled.get(), 0);
        assert!(queryable.next().is_some());
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn filter_all_rebuilds_each_group() {
        let groups = vec![Ok(group(0, &[1, 2, 3])), Ok(group(10, &[11]))];
        let query = VariantQuery::mask(|variants: &[Variant], _: &Interval| {
            variants.iter().map(|v| v.pos() % 2 == 1).collect()
        });
        let out: Vec<VariantGroup> = VariantQueryable::new(Vec::new(), groups.into_iter())
            .filter_all(query)
            .collect::<Result<_, _>>()
            .unwrap();

        let kept: Vec<Vec<i64>> = out
            .iter()
            .map(|g| g.variants.iter().map(Variant::pos).collect())
            .collect();
        assert_eq!(kept, vec![vec![1, 3], vec![11]]);
    }

    #[test]
    fn short_mask_drops_trailing_variants() {
        let groups = vec![Ok(group(0, &[1, 2, 3]))];
        let query = VariantQuery::mask(|_: &[Variant], _: &Interval| vec![true]);
        let variants: Vec<Variant> = VariantQueryable::new(Vec::new(), groups.into_iter())
            .filter_all(query)
            .variants()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn errors_surface_in_the_flattened_stream() {
        let groups = vec![
            Ok(group(0, &[1])),
            Err(QueryError::SampleNotFound("nobody".to_string())),
        ];
        let results: Vec<_> = VariantQueryable::new(Vec::new(), groups.into_iter())
            .variants()
            .collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(QueryError::SampleNotFound(s)) if s == "nobody"));
    }
}
