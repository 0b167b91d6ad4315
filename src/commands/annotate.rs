//! Annotate command - stream a sorted VCF and add `Regions` to every record.
//!
//! REQUIREMENT: the VCF must be sorted by position within each chromosome,
//! with each chromosome's records contiguous.

use crate::annotate::{AnnotationStats, RegionAnnotator};
use crate::config::LoadOptions;
use crate::error::Result;
use crate::loader::{LoadedRegions, RegionLoader};
use crate::spec_token::RegionSpec;
use crate::streaming::LineWriter;
use crate::vcf::{declares_regions, VcfRecord, REGIONS_HEADER};
use std::io::{BufRead, Write};
use tracing::warn;

/// Annotate command configuration.
#[derive(Debug, Clone, Default)]
pub struct AnnotateCommand {
    /// Region files to load, in order
    pub specs: Vec<RegionSpec>,
    /// Load-time options
    pub options: LoadOptions,
}

impl AnnotateCommand {
    pub fn new(specs: Vec<RegionSpec>) -> Self {
        Self {
            specs,
            options: LoadOptions::default(),
        }
    }

    /// Set load options (builder pattern).
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Load the regions, then stream `input` to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<AnnotationStats> {
        let loaded: LoadedRegions = RegionLoader::new(self.options).load(&self.specs)?;
        if !loaded.warnings.is_empty() {
            warn!("{} region file lines were ignored", loaded.warnings.len());
        }
        let mut annotator = loaded.regions.into_annotator();
        self.annotate_stream(&mut annotator, input, output)?;
        Ok(annotator.stats())
    }

    /// Stream VCF text through an existing annotator.
    ///
    /// Header lines are copied, with the `Regions` INFO declaration added
    /// before `#CHROM` unless the input already has one.
    pub fn annotate_stream<R: BufRead, W: Write>(
        &self,
        annotator: &mut RegionAnnotator,
        mut input: R,
        output: &mut W,
    ) -> Result<()> {
        let mut writer = LineWriter::new(output);
        let mut declared = false;
        let mut line = String::with_capacity(1024);
        let mut line_number = 0;

        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            line_number += 1;
            let text = line.trim_end_matches(['\n', '\r']);

            if text.starts_with("##") {
                declared |= declares_regions(text);
                writer.write_line(text.as_bytes())?;
            } else if text.starts_with('#') {
                if !declared {
                    writer.write_line(REGIONS_HEADER.as_bytes())?;
                    declared = true;
                }
                writer.write_line(text.as_bytes())?;
            } else if !text.is_empty() {
                let mut record = VcfRecord::parse(text, line_number)?;
                annotator.annotate(&mut record)?;
                writer.write_line(record.line().as_bytes())?;
            }
        }

        writer.flush()
    }
}
