//! Streaming region annotation.
//!
//! Records must arrive sorted by position within each chromosome, and each
//! chromosome's records must be contiguous. The annotator advances the
//! interval index behind the scan, so a record that rewinds the scan is an
//! error rather than something to recover from.

use crate::error::Result;
use crate::index::{IntervalBuffer, IntervalIndex};
use crate::regions::RegionSet;
use crate::streaming::OrderGuard;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Name of the record field holding the annotation.
pub const REGIONS_KEY: &str = "Regions";

/// A record the annotator can read a position from and attach labels to.
pub trait RegionTarget {
    /// Chromosome name as it appears in the region files (after any
    /// normalization applied at load time).
    fn chrom(&self) -> &str;

    /// Closed, 0-based `[start, end]` span covered by the record.
    fn span(&self) -> (u64, u64);

    /// Set the `Regions` field to a comma-joined label list.
    fn set_regions(&mut self, regions: &str);

    /// Remove any `Regions` field.
    fn clear_regions(&mut self);
}

/// Counters for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationStats {
    /// Records accepted by the ordering checks
    pub records: usize,
    /// Records that received at least one label
    pub annotated: usize,
    /// Records on chromosomes without any region
    pub unindexed: usize,
}

impl fmt::Display for AnnotationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Annotated: {}, Without regions: {}",
            self.records, self.annotated, self.unindexed
        )
    }
}

/// Attaches region labels to a sorted stream of records.
///
/// Owns its [`RegionSet`]; every call may retire index state behind the
/// scan, so one annotator serves exactly one scan.
#[derive(Debug)]
pub struct RegionAnnotator<I = IntervalBuffer> {
    regions: RegionSet<I>,
    guard: OrderGuard,
    stats: AnnotationStats,
}

impl<I: IntervalIndex> RegionAnnotator<I> {
    pub fn new(regions: RegionSet<I>) -> Self {
        Self {
            regions,
            guard: OrderGuard::new(),
            stats: AnnotationStats::default(),
        }
    }

    /// Labels overlapping the closed span `[start, end]` on `chrom`,
    /// name-sorted and comma-joined; empty when nothing overlaps.
    ///
    /// Fails when `start` lies before the watermark of the active
    /// chromosome, or when a chromosome with regions is entered a second
    /// time.
    pub fn annotation_for(&mut self, chrom: &str, start: u64, end: u64) -> Result<String> {
        let (labels, index) = self.regions.split_mut(chrom);
        if !self.guard.is_current(chrom) {
            debug!("scanning {} ({})", chrom, if index.is_some() { "indexed" } else { "no regions" });
            self.guard.switch_to(chrom, index.is_some())?;
        }
        let Some(index) = index else {
            self.stats.records += 1;
            self.stats.unindexed += 1;
            return Ok(String::new());
        };

        self.guard.check(start)?;
        self.stats.records += 1;

        // BTreeSet keeps output ordered by name, independent of label ids.
        let found: BTreeSet<&str> = labels
            .names()
            .enumerate()
            .filter(|&(id, _)| index.has_overlap(start, end, id))
            .map(|(_, name)| name)
            .collect();

        if start > 1 {
            self.guard.raise(start - 1);
            index.advance(start - 1);
        }

        if !found.is_empty() {
            self.stats.annotated += 1;
        }
        Ok(found.into_iter().collect::<Vec<_>>().join(","))
    }

    /// Set or clear the `Regions` field of `record`.
    pub fn annotate<R: RegionTarget + ?Sized>(&mut self, record: &mut R) -> Result<()> {
        let (start, end) = record.span();
        let annotation = self.annotation_for(record.chrom(), start, end)?;
        if annotation.is_empty() {
            record.clear_regions();
        } else {
            record.set_regions(&annotation);
        }
        Ok(())
    }

    /// Accumulated size of a label, or 0 if unknown.
    pub fn region_size(&self, name: &str) -> u64 {
        self.regions.region_size(name)
    }

    pub fn has_regions(&self, name: &str) -> bool {
        self.regions.has_regions(name)
    }

    pub fn regions(&self) -> &RegionSet<I> {
        &self.regions
    }

    pub fn stats(&self) -> AnnotationStats {
        self.stats
    }

    /// Current watermark of the active chromosome, if any.
    pub fn watermark(&self) -> Option<u64> {
        self.guard.watermark()
    }
}
