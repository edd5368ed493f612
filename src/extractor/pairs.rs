use crate::genomics::Variant;
use crate::sequence::SeqSlice;

/// A variant expressed as the reference span it replaces and its replacement.
///
/// Both sides start at the same 0-based coordinate. `ordinal` is the position
/// of the source variant in the caller's input and breaks ties between pairs
/// that share a start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPair {
    /// REF allele over `[start, start + len(ref))`.
    pub reference: SeqSlice,
    /// First ALT allele, starting at the same coordinate.
    pub alternate: SeqSlice,
    /// Index of the source variant in the input.
    pub ordinal: usize,
}

impl VariantPair {
    /// Pair for a single variant.
    pub fn from_variant(variant: &Variant, ordinal: usize) -> Self {
        let start = variant.start();
        Self {
            reference: SeqSlice::new(start, variant.ref_allele().as_bytes()),
            alternate: SeqSlice::new(start, variant.alt_allele().as_bytes()),
            ordinal,
        }
    }

    /// 0-based start of the replaced span.
    pub fn start(&self) -> i64 {
        self.reference.start()
    }

    /// 0-based exclusive end of the replaced span.
    pub fn end(&self) -> i64 {
        self.reference.end()
    }

    /// `len(alt) - len(ref)`.
    pub fn length_delta(&self) -> i64 {
        self.alternate.len() as i64 - self.reference.len() as i64
    }

    /// True when `point` lies strictly inside the replaced span.
    pub fn straddles(&self, point: i64) -> bool {
        self.start() < point && point < self.end()
    }

    /// Cut both sides at offset `mid` from the start.
    pub fn split_at(&self, mid: usize) -> (VariantPair, VariantPair) {
        let left = VariantPair {
            reference: self.reference.head(mid),
            alternate: self.alternate.head(mid),
            ordinal: self.ordinal,
        };
        let right = VariantPair {
            reference: self.reference.tail(mid),
            alternate: self.alternate.tail(mid),
            ordinal: self.ordinal,
        };
        (left, right)
    }
}

/// Which halves of a straddling pair survive a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    /// Keep material left of the split point.
    Left,
    /// Keep material right of the split point.
    Right,
    /// Keep both halves.
    Both,
}

impl SplitSide {
    fn keeps_left(self) -> bool {
        matches!(self, SplitSide::Left | SplitSide::Both)
    }

    fn keeps_right(self) -> bool {
        matches!(self, SplitSide::Right | SplitSide::Both)
    }
}

/// Pair every variant with its replacement, numbering them in input order.
pub fn variants_to_pairs<'a, I>(variants: I) -> Vec<VariantPair>
where
    I: IntoIterator<Item = &'a Variant>,
{
    variants
        .into_iter()
        .enumerate()
        .map(|(ordinal, variant)| VariantPair::from_variant(variant, ordinal))
        .collect()
}

/// Split pairs whose reference span strictly contains `point`.
///
/// Pairs not containing `point` pass through unchanged and in order.
pub fn split_overlapping(pairs: Vec<VariantPair>, point: i64, side: SplitSide) -> Vec<VariantPair> {
    let mut out = Vec::with_capacity(pairs.len());
    for pair in pairs {
        if !pair.straddles(point) {
            out.push(pair);
            continue;
        }
        let mid = (point - pair.start()) as usize;
        let (left, right) = pair.split_at(mid);
        if side.keeps_left() {
            out.push(left);
        }
        if side.keeps_right() {
            out.push(right);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(pos: i64, ref_allele: &str, alt: &str) -> VariantPair {
        VariantPair::from_variant(&Variant::new("chr1", pos, ref_allele, alt), 0)
    }

    #[test]
    fn empty_ref_gives_zero_length_span() {
        let insertion = pair(5, "", "TT");
        assert_eq!(insertion.start(), 4);
        assert_eq!(insertion.end(), 4);
        assert_eq!(insertion.length_delta(), 2);
        assert!(!insertion.straddles(4));
    }

    #[test]
    fn split_both_keeps_all_material() {
        // REF GTA over [2, 5), ALT G
        let deletion = pair(3, "GTA", "G");
        let out = split_overlapping(vec![deletion], 4, SplitSide::Both);
        assert_eq!(out.len(), 2);

        assert_eq!((out[0].start(), out[0].end()), (2, 4));
        assert_eq!(out[0].reference.as_bytes(), b"GT");
        assert_eq!(out[0].alternate.as_bytes(), b"G");

        assert_eq!((out[1].start(), out[1].end()), (4, 5));
        assert_eq!(out[1].reference.as_bytes(), b"A");
        assert!(out[1].alternate.is_empty());
    }

    #[test]
    fn split_left_and_right_drop_one_side() {
        let substitution = pair(3, "GTA", "CCC");
        let left = split_overlapping(vec![substitution.clone()], 3, SplitSide::Left);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].alternate.as_bytes(), b"C");

        let right = split_overlapping(vec![substitution], 3, SplitSide::Right);
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].start(), 3);
        assert_eq!(right[0].alternate.as_bytes(), b"CC");
    }

    #[test]
    fn halves_rejoin_to_the_unsplit_pair() {
        let insertion = pair(3, "GT", "GAAT");
        let (left, right) = insertion.split_at(1);
        let mut alt = left.alternate.as_bytes().to_vec();
        alt.extend_from_slice(right.alternate.as_bytes());
        assert_eq!(alt, b"GAAT".to_vec());
        assert_eq!(left.length_delta() + right.length_delta(), insertion.length_delta());
    }

    #[test]
    fn pairs_touching_the_point_pass_through() {
        let pairs = vec![pair(3, "GT", "G"), pair(5, "A", "C")];
        let out = split_overlapping(pairs.clone(), 2, SplitSide::Both);
        assert_eq!(out, pairs);
        let out = split_overlapping(pairs.clone(), 4, SplitSide::Both);
        assert_eq!(out, pairs);
    }

    #[test]
    fn ordinals_follow_input_order() {
        let variants = vec![
            Variant::new("chr1", 9, "A", "C"),
            Variant::new("chr1", 2, "A", "C"),
        ];
        let pairs = variants_to_pairs(&variants);
        assert_eq!(pairs[0].ordinal, 0);
        assert_eq!(pairs[1].ordinal, 1);
        assert_eq!(pairs[1].start(), 1);
    }
}
