// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]

//! Region Strata: region annotation for variant benchmarking
//!
//! Loads any number of named BED region sets (confidence regions, target
//! regions, user-defined strata) and labels a position-sorted stream of
//! variant records with the regions each record falls in.
//!
//! # Features
//!
//! - **Streaming**: region state behind the scan is discarded as records advance
//! - **Compound labels**: a BED name column splits a label into sub-labels
//! - **Parallel processing**: per-chromosome shards annotated with Rayon
//!
//! # Example
//!
//! ```rust,no_run
//! use region_strata::RegionSet;
//!
//! let loaded = RegionSet::load(&["CONF:conf.bed", "TS:targets.bed.gz"], false).unwrap();
//! println!("confident bases: {}", loaded.regions.region_size("CONF"));
//!
//! let mut annotator = loaded.into_regions().into_annotator();
//! let labels = annotator.annotation_for("chr1", 15, 15).unwrap();
//! ```

pub mod annotate;
pub mod bed;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod interval;
pub mod labels;
pub mod loader;
pub mod parallel;
pub mod regions;
pub mod spec_token;
pub mod streaming;
pub mod vcf;

// Re-export commonly used types
pub use annotate::{AnnotationStats, RegionAnnotator, RegionTarget};
pub use config::LoadOptions;
pub use error::{RegionError, Result};
pub use index::{IntervalBuffer, IntervalIndex};
pub use interval::Span;
pub use loader::{LoadedRegions, RegionLoader};
pub use regions::RegionSet;
pub use spec_token::RegionSpec;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annotate::{AnnotationStats, RegionAnnotator, RegionTarget};
    pub use crate::commands::{AnnotateCommand, SizesCommand};
    pub use crate::config::LoadOptions;
    pub use crate::error::{RegionError, Result};
    pub use crate::index::{IntervalBuffer, IntervalIndex};
    pub use crate::loader::{LoadedRegions, RegionLoader};
    pub use crate::parallel::annotate_parallel;
    pub use crate::regions::RegionSet;
    pub use crate::spec_token::RegionSpec;
    pub use crate::vcf::VcfRecord;
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_basic_workflow() {
        use crate::prelude::*;

        let mut conf = NamedTempFile::new().unwrap();
        write!(conf, "chr1\t10\t20\nchr1\t30\t40\n").unwrap();
        conf.flush().unwrap();

        let token = format!("CONF:{}", conf.path().display());
        let loaded = RegionSet::load(&[token], false).unwrap();
        assert!(loaded.warnings.is_empty());

        let mut annotator = loaded.into_regions().into_annotator();
        let mut record = VcfRecord::parse("chr1\t16\t.\tA\tG\t.\tPASS\t.", 1).unwrap();
        annotator.annotate(&mut record).unwrap();

        assert_eq!(record.regions(), Some("CONF"));
        assert_eq!(annotator.region_size("CONF"), 20);
    }
}
