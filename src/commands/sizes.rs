//! Sizes command - report the total size of every loaded label.

use crate::config::LoadOptions;
use crate::error::Result;
use crate::loader::{LoadedRegions, RegionLoader};
use crate::spec_token::RegionSpec;
use crate::streaming::LineWriter;
use std::io::Write;

/// Sizes command configuration.
#[derive(Debug, Clone, Default)]
pub struct SizesCommand {
    pub specs: Vec<RegionSpec>,
    pub options: LoadOptions,
}

impl SizesCommand {
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

    /// Write `label<TAB>size` for every label, sorted by label name.
    pub fn run<W: Write>(&self, output: &mut W) -> Result<()> {
        let loaded: LoadedRegions = RegionLoader::new(self.options).load(&self.specs)?;
        let regions = loaded.regions;

        let mut names: Vec<&str> = regions.labels().names().collect();
        names.sort_unstable();

        let mut writer = LineWriter::new(output);
        for name in names {
            writer.write_pair(name, regions.region_size(name))?;
        }
        writer.flush()
    }
}
