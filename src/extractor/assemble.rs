use std::cmp::Reverse;

use crate::genomics::Interval;
use crate::sequence::SequenceBuilder;

use super::pairs::VariantPair;

/// Variant pairs on either side of the anchor, nearest-to-anchor first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Pairs with `start >= anchor`, ascending by start.
    pub upstream: Vec<VariantPair>,
    /// Pairs with `start < anchor`, descending by start.
    pub downstream: Vec<VariantPair>,
}

/// Split pairs around `anchor` and order each side outward from it.
///
/// Pairs sharing a start keep the caller's input order (ascending ordinal) on
/// both sides.
pub fn partition(pairs: Vec<VariantPair>, anchor: i64) -> Partition {
    let (mut upstream, mut downstream): (Vec<_>, Vec<_>) =
        pairs.into_iter().partition(|pair| pair.start() >= anchor);
    upstream.sort_by_key(|pair| (pair.start(), pair.ordinal));
    downstream.sort_by_key(|pair| (Reverse(pair.start()), pair.ordinal));
    Partition {
        upstream,
        downstream,
    }
}

/// Fetch bounds grown so that net deletions still leave enough bases to
/// fill the interval in fixed-length mode.
pub fn extended_bounds(interval: &Interval, partition: &Partition) -> (i64, i64) {
    let mut istart = interval.start();
    let mut iend = interval.end();
    for pair in &partition.upstream {
        let delta = pair.length_delta();
        if delta < 0 {
            iend -= delta;
        }
    }
    for pair in &partition.downstream {
        let delta = pair.length_delta();
        if delta < 0 {
            istart += delta;
        }
    }
    (istart, iend)
}

/// Walk from the anchor toward `istart`, interleaving reference gaps and
/// replacement alleles. The returned builder reads in ascending coordinate
/// order.
pub fn downstream_builder(downstream: &[VariantPair], anchor: i64, istart: i64) -> SequenceBuilder {
    let mut builder = SequenceBuilder::new();
    let mut prev = anchor;
    for pair in downstream {
        if pair.end() <= istart {
            break;
        }
        builder.push_reference(pair.end(), prev);
        builder.push_literal(pair.alternate.clone());
        prev = pair.start();
    }
    builder.push_reference(istart, prev);
    builder.reverse();
    builder
}

/// Walk from the anchor toward `iend`, interleaving reference gaps and
/// replacement alleles.
pub fn upstream_builder(upstream: &[VariantPair], anchor: i64, iend: i64) -> SequenceBuilder {
    let mut builder = SequenceBuilder::new();
    let mut prev = anchor;
    for pair in upstream {
        if pair.start() >= iend {
            break;
        }
        builder.push_reference(prev, pair.start());
        builder.push_literal(pair.alternate.clone());
        prev = pair.end();
    }
    builder.push_reference(prev, iend);
    builder
}

/// Clip assembled text back to the interval length around the anchor.
///
/// Keeps the last `anchor - interval.start` bases downstream and the first
/// `interval.end - anchor` bases upstream; a side shorter than its quota is
/// kept whole.
pub fn cut_to_fixed_len(
    mut down: Vec<u8>,
    mut up: Vec<u8>,
    interval: &Interval,
    anchor: i64,
) -> (Vec<u8>, Vec<u8>) {
    let down_len = (anchor - interval.start()).max(0) as usize;
    let up_len = (interval.end() - anchor).max(0) as usize;
    if down.len() > down_len {
        down.drain(..down.len() - down_len);
    }
    up.truncate(up_len);
    (down, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::pairs::variants_to_pairs;
    use crate::genomics::Variant;
    use crate::sequence::{ReferenceWindow, Segment};

    fn interval() -> Interval {
        Interval::new("chr1", 2, 6).unwrap()
    }

    #[test]
    fn partition_orders_outward_from_anchor() {
        let variants = vec![
            Variant::new("chr1", 2, "C", "A"),
            Variant::new("chr1", 6, "C", "A"),
            Variant::new("chr1", 4, "T", "A"),
            Variant::new("chr1", 5, "A", "G"),
            Variant::new("chr1", 1, "A", "G"),
        ];
        let split = partition(variants_to_pairs(&variants), 3);
        let up: Vec<i64> = split.upstream.iter().map(VariantPair::start).collect();
        let down: Vec<i64> = split.downstream.iter().map(VariantPair::start).collect();
        assert_eq!(up, vec![3, 4, 5]);
        assert_eq!(down, vec![1, 0]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let variants = vec![
            Variant::new("chr1", 5, "A", "AT"),
            Variant::new("chr1", 5, "A", "G"),
            Variant::new("chr1", 2, "C", "CC"),
            Variant::new("chr1", 2, "C", "T"),
        ];
        let split = partition(variants_to_pairs(&variants), 3);
        let up: Vec<usize> = split.upstream.iter().map(|p| p.ordinal).collect();
        let down: Vec<usize> = split.downstream.iter().map(|p| p.ordinal).collect();
        assert_eq!(up, vec![0, 1]);
        assert_eq!(down, vec![2, 3]);
    }

    #[test]
    fn deletions_extend_bounds_insertions_do_not() {
        let variants = vec![
            Variant::new("chr1", 3, "GT", "G"),
            Variant::new("chr1", 6, "C", "CAAA"),
            Variant::new("chr1", 1, "ACG", "A"),
        ];
        let split = partition(variants_to_pairs(&variants), 2);
        assert_eq!(extended_bounds(&interval(), &split), (0, 7));
    }

    #[test]
    fn upstream_walk_interleaves_gaps_and_alleles() {
        let variants = vec![Variant::new("chr1", 3, "GT", "G")];
        let split = partition(variants_to_pairs(&variants), 2);
        let builder = upstream_builder(&split.upstream, 2, 7);
        assert_eq!(
            builder.segments()[0],
            Segment::Reference { start: 2, end: 2 }
        );
        assert_eq!(
            builder.segments()[2],
            Segment::Reference { start: 4, end: 7 }
        );

        let window = ReferenceWindow::new(2, b"GTACG".to_vec());
        assert_eq!(builder.resolve(&window).unwrap().concat(), b"GACG".to_vec());
    }

    #[test]
    fn downstream_walk_reads_left_to_right() {
        // reference ACGTACGT, anchor 6, SNV at 0-based 3 (T>C)
        let variants = vec![Variant::new("chr1", 4, "T", "C")];
        let split = partition(variants_to_pairs(&variants), 6);
        let builder = downstream_builder(&split.downstream, 6, 2);
        let window = ReferenceWindow::new(2, b"GTAC".to_vec());
        assert_eq!(builder.resolve(&window).unwrap().concat(), b"GCAC".to_vec());
    }

    #[test]
    fn variants_beyond_the_window_are_dropped() {
        let variants = vec![
            Variant::new("chr1", 1, "A", "T"),
            Variant::new("chr1", 9, "A", "T"),
        ];
        let split = partition(variants_to_pairs(&variants), 4);
        let down = downstream_builder(&split.downstream, 4, 2);
        let up = upstream_builder(&split.upstream, 4, 6);
        assert!(down.segments().iter().all(Segment::is_placeholder));
        assert!(up.segments().iter().all(Segment::is_placeholder));
    }

    #[test]
    fn cut_keeps_anchor_adjacent_bases() {
        let (down, up) = cut_to_fixed_len(b"XXGT".to_vec(), b"ACYY".to_vec(), &interval(), 4);
        assert_eq!(down, b"GT".to_vec());
        assert_eq!(up, b"AC".to_vec());

        let (down, up) = cut_to_fixed_len(b"XX".to_vec(), b"GTACYY".to_vec(), &interval(), 2);
        assert!(down.is_empty());
        assert_eq!(up, b"GTAC".to_vec());

        let (down, up) = cut_to_fixed_len(b"G".to_vec(), Vec::new(), &interval(), 6);
        assert_eq!(down, b"G".to_vec());
        assert!(up.is_empty());
    }
}
