//! Parallel annotation across chromosomes using Rayon.
//!
//! Each chromosome gets its own annotator over a shard of the region set,
//! so shards share nothing mutable. Only the label table is shared.

use crate::annotate::RegionTarget;
use crate::error::{RegionError, Result};
use crate::index::IntervalIndex;
use crate::regions::RegionSet;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// Split records into runs of one chromosome each, keeping input order.
///
/// Each chromosome's records must be contiguous, as for a sequential scan;
/// a chromosome that reappears after another one is an ordering violation.
pub fn group_by_chromosome<R: RegionTarget>(records: Vec<R>) -> Result<Vec<(String, Vec<R>)>> {
    let mut groups: Vec<(String, Vec<R>)> = Vec::new();

    for record in records {
        if let Some((chrom, run)) = groups.last_mut() {
            if chrom.as_str() == record.chrom() {
                run.push(record);
                continue;
            }
        }
        let chrom = record.chrom().to_string();
        if groups.iter().any(|(seen, _)| *seen == chrom) {
            return Err(RegionError::ChromosomeRevisited(chrom));
        }
        groups.push((chrom, vec![record]));
    }

    Ok(groups)
}

/// Annotate per-chromosome record groups in parallel.
///
/// Every group must name a distinct chromosome, and each group must be
/// sorted by position. Groups come back in input order.
pub fn annotate_groups<I, R>(
    regions: &RegionSet<I>,
    groups: Vec<(String, Vec<R>)>,
) -> Result<Vec<(String, Vec<R>)>>
where
    I: IntervalIndex + Clone + Send + Sync,
    R: RegionTarget + Send,
{
    let mut seen = FxHashSet::default();
    for (chrom, _) in &groups {
        if !seen.insert(chrom.as_str()) {
            return Err(RegionError::ChromosomeRevisited(chrom.clone()));
        }
    }

    groups
        .into_par_iter()
        .map(|(chrom, mut records)| -> Result<(String, Vec<R>)> {
            let mut annotator = regions.shard([chrom.as_str()]).into_annotator();
            for record in records.iter_mut() {
                annotator.annotate(record)?;
            }
            Ok((chrom, records))
        })
        .collect()
}

/// Annotate records in parallel, one shard per chromosome.
///
/// Records come back in input order. Input a sequential scan would reject
/// is rejected here too.
pub fn annotate_parallel<I, R>(regions: &RegionSet<I>, records: Vec<R>) -> Result<Vec<R>>
where
    I: IntervalIndex + Clone + Send + Sync,
    R: RegionTarget + Send,
{
    let groups = annotate_groups(regions, group_by_chromosome(records)?)?;
    Ok(groups.into_iter().flat_map(|(_, records)| records).collect())
}
