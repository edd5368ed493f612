/// A piece of literal sequence anchored at a genomic start coordinate.
///
/// Its end is always `start + len`, so the logical length of a literal equals
/// its payload length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqSlice {
    start: i64,
    seq: Vec<u8>,
}

impl SeqSlice {
    /// Wrap `seq` starting at 0-based coordinate `start`.
    pub fn new(start: i64, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            start,
            seq: seq.into(),
        }
    }

    /// 0-based start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// 0-based exclusive end.
    pub fn end(&self) -> i64 {
        self.start + self.seq.len() as i64
    }

    /// Payload length.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Raw payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// The first `mid` bases (all of them when shorter).
    pub fn head(&self, mid: usize) -> SeqSlice {
        let mid = mid.min(self.seq.len());
        SeqSlice::new(self.start, &self.seq[..mid])
    }

    /// Everything from offset `mid` on (empty when shorter).
    pub fn tail(&self, mid: usize) -> SeqSlice {
        let mid = mid.min(self.seq.len());
        SeqSlice::new(self.start + mid as i64, &self.seq[mid..])
    }
}

/// Element of a [`SequenceBuilder`](super::SequenceBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Known sequence, e.g. a variant's replacement allele.
    Literal(SeqSlice),
    /// Placeholder for reference bases `[start, end)` not fetched yet.
    ///
    /// `end` may lie before `start` when overlapping variants consumed the gap;
    /// such a placeholder has length zero.
    Reference {
        /// 0-based start.
        start: i64,
        /// 0-based exclusive end.
        end: i64,
    },
}

impl Segment {
    /// Logical length in bases.
    pub fn len(&self) -> usize {
        match self {
            Segment::Literal(slice) => slice.len(),
            Segment::Reference { start, end } => (end - start).max(0) as usize,
        }
    }

    /// True for zero-length segments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while the segment still needs reference bases.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Reference { .. })
    }
}
