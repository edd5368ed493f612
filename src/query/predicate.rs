use std::fmt;
use std::sync::Arc;

use crate::genomics::{Interval, Variant};

/// Signature of a custom group predicate: one flag per variant in the group.
pub type MaskFn = dyn Fn(&[Variant], &Interval) -> Vec<bool> + Send + Sync;

/// Predicate over a whole `(variants, interval)` group.
///
/// Every query evaluates to a mask parallel to the group; variants whose flag
/// is `false` (or missing) are dropped.
#[derive(Clone)]
pub enum VariantQuery {
    /// Keep the whole group when `min <= count <= max` (no upper bound when
    /// `max` is `None`), drop it otherwise.
    CountRange {
        /// Minimum number of variants.
        min: usize,
        /// Maximum number of variants.
        max: Option<usize>,
    },
    /// Caller-supplied mask.
    Mask(Arc<MaskFn>),
}

impl VariantQuery {
    /// Count-range predicate.
    pub fn count_range(min: usize, max: Option<usize>) -> Self {
        VariantQuery::CountRange { min, max }
    }

    /// Predicate from a closure.
    pub fn mask<F>(f: F) -> Self
    where
        F: Fn(&[Variant], &Interval) -> Vec<bool> + Send + Sync + 'static,
    {
        VariantQuery::Mask(Arc::new(f))
    }

    /// Evaluate against one group.
    pub fn evaluate(&self, variants: &[Variant], interval: &Interval) -> Vec<bool> {
        match self {
            VariantQuery::CountRange { min, max } => {
                let count = variants.len();
                let keep = count >= *min && max.map_or(true, |max| count <= max);
                vec![keep; count]
            }
            VariantQuery::Mask(f) => f(variants, interval),
        }
    }
}

impl fmt::Debug for VariantQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantQuery::CountRange { min, max } => f
                .debug_struct("CountRange")
                .field("min", min)
                .field("max", max)
                .finish(),
            VariantQuery::Mask(_) => f.write_str("Mask(..)"),
        }
    }
}
