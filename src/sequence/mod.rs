//! Two-phase sequence assembly.
//!
//! A [`SequenceBuilder`] collects literal pieces and placeholders for reference
//! bases. Once the reference window is fetched it is resolved into a
//! [`ResolvedSequence`], the only type that can be concatenated.

mod builder;
mod segment;

pub use builder::{ReferenceWindow, ResolvedSequence, SequenceBuilder};
pub use segment::{Segment, SeqSlice};

use thiserror::Error;

/// Errors that can occur while resolving a builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// A non-empty placeholder is not covered by the fetched window.
    #[error("segment [{start}, {end}) lies outside reference window [{window_start}, {window_end})")]
    SegmentOutsideWindow {
        /// Placeholder start.
        start: i64,
        /// Placeholder end.
        end: i64,
        /// Window start.
        window_start: i64,
        /// Window end.
        window_end: i64,
    },
}
