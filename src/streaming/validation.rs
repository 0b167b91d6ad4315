//! Sort-order guard for the annotation scan.
//!
//! The annotator retires index state as it moves forward, so the scan must
//! see records sorted by position within a chromosome, with each
//! chromosome's records contiguous. The guard tracks:
//! 1. the active chromosome and its watermark (reset on every switch)
//! 2. chromosomes already left behind whose index state was consumed

use crate::error::{RegionError, Result};
use rustc_hash::FxHashSet;

/// Streaming cursor with ordering checks.
#[derive(Debug, Default, Clone)]
pub struct OrderGuard {
    chrom: Option<String>,
    guarded: bool,
    watermark: Option<u64>,
    left_behind: FxHashSet<String>,
}

impl OrderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `chrom` is the active chromosome.
    #[inline]
    pub fn is_current(&self, chrom: &str) -> bool {
        self.chrom.as_deref() == Some(chrom)
    }

    /// Make `chrom` the active chromosome and unset the watermark.
    ///
    /// `guarded` marks chromosomes that own index state; leaving one of those
    /// and coming back later is an ordering violation.
    pub fn switch_to(&mut self, chrom: &str, guarded: bool) -> Result<()> {
        if guarded && self.left_behind.contains(chrom) {
            return Err(RegionError::ChromosomeRevisited(chrom.to_string()));
        }
        if let Some(prev) = self.chrom.take() {
            if self.guarded {
                self.left_behind.insert(prev);
            }
        }
        self.chrom = Some(chrom.to_string());
        self.guarded = guarded;
        self.watermark = None;
        Ok(())
    }

    /// Check that a record starting at `start` does not rewind the scan.
    #[inline]
    pub fn check(&self, start: u64) -> Result<()> {
        match self.watermark {
            Some(watermark) if start < watermark => Err(RegionError::OutOfOrder {
                chrom: self.chrom.clone().unwrap_or_default(),
                start,
                watermark,
            }),
            _ => Ok(()),
        }
    }

    /// Move the watermark forward. Never moves it back.
    #[inline]
    pub fn raise(&mut self, pos: u64) {
        self.watermark = Some(self.watermark.map_or(pos, |w| w.max(pos)));
    }

    pub fn watermark(&self) -> Option<u64> {
        self.watermark
    }
}
