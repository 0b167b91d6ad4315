//! Per-chromosome interval indexing for labeled overlap queries.

use crate::interval::{LabelId, Span};
use crate::streaming::ActiveSet;

/// Storage and query capability the annotator needs for one chromosome.
///
/// Intervals are closed (`start <= stop`). `advance` is one-way: after
/// `advance(pos)` the index may discard any interval whose `stop < pos`, and
/// callers must not query spans that end before `pos` again.
pub trait IntervalIndex {
    /// Insert the closed interval `[start, stop]` under `label`.
    fn add_interval(&mut self, start: u64, stop: u64, label: LabelId);

    /// True when some interval stored under `label` shares a base with
    /// `[start, stop]`.
    fn has_overlap(&mut self, start: u64, stop: u64, label: LabelId) -> bool;

    /// Retire intervals lying wholly left of `pos`.
    fn advance(&mut self, pos: u64);
}

/// A stored span plus the running maximum of `stop` over every span at or
/// before it in start order.
#[derive(Debug, Clone, Copy)]
struct TrackEntry {
    span: Span,
    max_stop: u64,
}

/// Intervals of a single label on a single chromosome.
#[derive(Debug, Clone, Default)]
struct Track {
    sorted: ActiveSet<TrackEntry>,
    pending: Vec<Span>,
}

impl Track {
    /// Merge pending insertions into the sorted column.
    fn settle(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut spans: Vec<Span> = self.sorted.take_live().into_iter().map(|e| e.span).collect();
        spans.append(&mut self.pending);
        spans.sort_unstable();

        let mut max_stop = 0;
        self.sorted.extend(spans.into_iter().map(|span| {
            max_stop = max_stop.max(span.stop);
            TrackEntry { span, max_stop }
        }));
    }

    fn has_overlap(&mut self, start: u64, stop: u64) -> bool {
        self.settle();
        let live = self.sorted.as_slice();
        // max_stop is non-decreasing, so everything before this point ends
        // left of the query.
        let first = live.partition_point(|e| e.max_stop < start);
        live[first..]
            .iter()
            .take_while(|e| e.span.start <= stop)
            .any(|e| e.span.stop >= start)
    }

    fn advance(&mut self, pos: u64) -> usize {
        self.settle();
        self.sorted.advance_while(|e| e.max_stop < pos)
    }

    fn len(&self) -> usize {
        self.sorted.len() + self.pending.len()
    }
}

/// Default [`IntervalIndex`]: one start-sorted track per label.
///
/// Insertions are buffered and sorted lazily on the first query or advance,
/// so loading a whole region file costs one sort per label. Queries are a
/// binary search over the running max-stop column. Advancing retires the
/// prefix of each track whose running max-stop lies left of the watermark.
#[derive(Debug, Clone, Default)]
pub struct IntervalBuffer {
    tracks: Vec<Track>,
}

impl IntervalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of intervals currently held for `label` (retired ones excluded).
    pub fn live_len(&self, label: LabelId) -> usize {
        self.tracks.get(label).map_or(0, Track::len)
    }

    /// Number of intervals retired for `label` by `advance`.
    pub fn retired(&self, label: LabelId) -> usize {
        self.tracks.get(label).map_or(0, |t| t.sorted.retired())
    }

    /// Total number of intervals currently held across all labels.
    pub fn len(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntervalIndex for IntervalBuffer {
    fn add_interval(&mut self, start: u64, stop: u64, label: LabelId) {
        if self.tracks.len() <= label {
            self.tracks.resize_with(label + 1, Track::default);
        }
        self.tracks[label].pending.push(Span::new(start, stop));
    }

    fn has_overlap(&mut self, start: u64, stop: u64, label: LabelId) -> bool {
        match self.tracks.get_mut(label) {
            Some(track) => track.has_overlap(start, stop),
            None => false,
        }
    }

    fn advance(&mut self, pos: u64) {
        for track in &mut self.tracks {
            track.advance(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> IntervalBuffer {
        let mut index = IntervalBuffer::new();
        // Deliberately unsorted, with a long interval hiding short ones.
        index.add_interval(300, 399, 0);
        index.add_interval(100, 199, 0);
        index.add_interval(150, 249, 0);
        index.add_interval(10, 1000, 1);
        index.add_interval(20, 30, 1);
        index
    }

    #[test]
    fn test_has_overlap_by_label() {
        let mut index = sample_index();

        assert!(index.has_overlap(175, 225, 0));
        assert!(index.has_overlap(249, 249, 0));
        assert!(!index.has_overlap(250, 299, 0));
        assert!(index.has_overlap(250, 299, 1));
        assert!(!index.has_overlap(0, 99, 0));
    }

    #[test]
    fn test_unknown_label_never_overlaps() {
        let mut index = sample_index();
        assert!(!index.has_overlap(0, 10_000, 7));
    }

    #[test]
    fn test_nested_interval_found_after_short_ones_end() {
        let mut index = sample_index();
        // [20, 30] ended long ago but [10, 1000] still covers 500.
        assert!(index.has_overlap(500, 500, 1));
        assert!(!index.has_overlap(1001, 2000, 1));
    }

    #[test]
    fn test_advance_retires_left_intervals() {
        let mut index = sample_index();
        assert_eq!(index.live_len(0), 3);

        index.advance(250);
        assert_eq!(index.live_len(0), 1);
        assert_eq!(index.retired(0), 2);
        assert!(index.has_overlap(300, 300, 0));
        assert!(!index.has_overlap(250, 299, 0));

        // The covering interval keeps its whole prefix alive.
        assert_eq!(index.live_len(1), 2);
        assert!(index.has_overlap(500, 600, 1));
    }

    #[test]
    fn test_insert_after_advance() {
        let mut index = sample_index();
        index.advance(250);
        index.add_interval(260, 270, 0);

        assert!(index.has_overlap(265, 265, 0));
        assert_eq!(index.live_len(0), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut index = IntervalBuffer::new();
        index.add_interval(10, 19, 0);
        index.add_interval(10, 19, 0);

        assert_eq!(index.len(), 2);
        assert!(index.has_overlap(15, 15, 0));
        index.advance(20);
        assert!(index.is_empty());
    }
}
