use super::{Segment, SeqSlice, SequenceError};

/// Reference bases fetched for `[start, start + len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceWindow {
    start: i64,
    seq: Vec<u8>,
}

impl ReferenceWindow {
    /// Wrap fetched bases beginning at 0-based `start`.
    pub fn new(start: i64, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            start,
            seq: seq.into(),
        }
    }

    /// 0-based start of the window.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// 0-based exclusive end of the window.
    pub fn end(&self) -> i64 {
        self.start + self.seq.len() as i64
    }

    /// Bases `[start, end)` in absolute coordinates.
    ///
    /// Empty ranges resolve to an empty slice wherever they lie; non-empty
    /// ranges must be covered by the window.
    pub fn slice(&self, start: i64, end: i64) -> Result<&[u8], SequenceError> {
        if end <= start {
            return Ok(&[]);
        }
        if start < self.start || end > self.end() {
            return Err(SequenceError::SegmentOutsideWindow {
                start,
                end,
                window_start: self.start,
                window_end: self.end(),
            });
        }
        let offset = (start - self.start) as usize;
        let len = (end - start) as usize;
        Ok(&self.seq[offset..offset + len])
    }
}

/// Ordered list of segments that may still reference unfetched bases.
///
/// Concatenation is only defined after [`resolve`](Self::resolve), which turns
/// the builder into a [`ResolvedSequence`]:
///
/// ```compile_fail
/// use varseq::sequence::SequenceBuilder;
///
/// let builder = SequenceBuilder::new();
/// let _text = builder.concat();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceBuilder {
    segments: Vec<Segment>,
}

impl SequenceBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a placeholder for reference bases `[start, end)`.
    pub fn push_reference(&mut self, start: i64, end: i64) {
        self.segments.push(Segment::Reference { start, end });
    }

    /// Append literal sequence.
    pub fn push_literal(&mut self, slice: SeqSlice) {
        self.segments.push(Segment::Literal(slice));
    }

    /// Reverse segment order in place.
    pub fn reverse(&mut self) {
        self.segments.reverse();
    }

    /// Segments in their current order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if no segment was pushed.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Replace every placeholder with the matching bases of `window`.
    pub fn resolve(self, window: &ReferenceWindow) -> Result<ResolvedSequence, SequenceError> {
        let parts = self
            .segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(slice) => Ok(slice),
                Segment::Reference { start, end } => {
                    Ok(SeqSlice::new(start, window.slice(start, end)?))
                }
            })
            .collect::<Result<Vec<_>, SequenceError>>()?;
        Ok(ResolvedSequence { parts })
    }
}

/// Literal-only sequence produced by [`SequenceBuilder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSequence {
    parts: Vec<SeqSlice>,
}

impl ResolvedSequence {
    /// Resolved parts in order.
    pub fn parts(&self) -> &[SeqSlice] {
        &self.parts
    }

    /// Total number of bases.
    pub fn len(&self) -> usize {
        self.parts.iter().map(SeqSlice::len).sum()
    }

    /// True when no bases were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join all parts into one sequence.
    pub fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for part in &self.parts {
            out.extend_from_slice(part.as_bytes());
        }
        out
    }
}
