//! Core interval types.
//!
//! Region files use 0-based, half-open coordinates (BED). Internally every
//! interval is stored closed: `[start, stop]` with `stop = end - 1`.

use std::cmp::Ordering;
use std::fmt;

/// Dense label identifier, assigned in first-seen order starting at 0.
pub type LabelId = usize;

/// A closed, 0-based genomic span `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u64,
    pub stop: u64,
}

impl Span {
    /// Create a closed span. Callers must ensure `start <= stop`.
    #[inline]
    pub fn new(start: u64, stop: u64) -> Self {
        debug_assert!(start <= stop);
        Self { start, stop }
    }

    /// Convert a BED half-open `[start, end)` pair.
    ///
    /// Returns `None` when the result would be empty or inverted
    /// (`end <= start`).
    #[inline]
    pub fn from_bed(start: u64, end: u64) -> Option<Self> {
        let stop = end.checked_sub(1)?;
        (start <= stop).then_some(Self { start, stop })
    }

    /// Number of bases covered (`stop - start + 1`, saturating).
    #[inline]
    pub fn len(&self) -> u64 {
        (self.stop - self.start).saturating_add(1)
    }

    /// Closed spans always cover at least one base.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when the two closed spans share at least one base.
    #[inline]
    pub fn overlaps(&self, start: u64, stop: u64) -> bool {
        self.start <= stop && start <= self.stop
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then(self.stop.cmp(&other.stop))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
