//! Loaded region state: label table plus one interval index per chromosome.

use crate::index::{IntervalBuffer, IntervalIndex};
use crate::labels::LabelTable;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Named region sets ready for annotation.
///
/// The label table is immutable once loading finishes and is shared between
/// shards; the per-chromosome indexes are owned, because annotation advances
/// them destructively.
#[derive(Debug, Clone)]
pub struct RegionSet<I = IntervalBuffer> {
    labels: Arc<LabelTable>,
    chroms: FxHashMap<String, I>,
}

impl<I> RegionSet<I> {
    pub(crate) fn from_parts(labels: LabelTable, chroms: FxHashMap<String, I>) -> Self {
        Self {
            labels: Arc::new(labels),
            chroms,
        }
    }

    /// Total size in bases of every interval loaded under `name`, counting
    /// duplicates and sub-label contributions; 0 if `name` is unknown.
    pub fn region_size(&self, name: &str) -> u64 {
        self.labels.size(name)
    }

    /// True if a label called `name` was loaded.
    ///
    /// This also holds when the label's file was empty, which lets callers
    /// tell "no confident regions given" apart from "the confident region
    /// file is empty".
    pub fn has_regions(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Chromosomes with at least one interval.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chroms.keys().map(String::as_str)
    }

    pub fn index(&self, chrom: &str) -> Option<&I> {
        self.chroms.get(chrom)
    }

    /// Label table and the mutable index of `chrom`, borrowed together.
    pub(crate) fn split_mut(&mut self, chrom: &str) -> (&LabelTable, Option<&mut I>) {
        (&self.labels, self.chroms.get_mut(chrom))
    }

    /// An independent set holding only `chroms`, sharing this set's labels.
    ///
    /// Chromosomes without intervals are skipped.
    pub fn shard<'a>(&self, chroms: impl IntoIterator<Item = &'a str>) -> Self
    where
        I: Clone,
    {
        let chroms = chroms
            .into_iter()
            .filter_map(|c| self.chroms.get(c).map(|i| (c.to_string(), i.clone())))
            .collect();
        Self {
            labels: Arc::clone(&self.labels),
            chroms,
        }
    }
}

impl<I: IntervalIndex> RegionSet<I> {
    /// Start a sorted scan over this set.
    pub fn into_annotator(self) -> crate::annotate::RegionAnnotator<I> {
        crate::annotate::RegionAnnotator::new(self)
    }
}
