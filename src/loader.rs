//! Region file loading.
//!
//! Reads every region spec in order, assigns label ids, fills one interval
//! index per chromosome and accumulates region sizes. Lines that cannot be
//! used are skipped and reported as [`LoadWarning`]s; a file that cannot be
//! read aborts the whole load.

use crate::bed::{parse_region_line, BedReader, LineIssue, RegionLine};
use crate::config::LoadOptions;
use crate::error::{RegionError, Result};
use crate::index::{IntervalBuffer, IntervalIndex};
use crate::interval::LabelId;
use crate::labels::LabelTable;
use crate::regions::RegionSet;
use crate::spec_token::RegionSpec;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// A skipped region file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
    pub issue: LineIssue,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ignoring line {} in {} ({}): {}",
            self.line_number,
            self.path.display(),
            self.issue,
            self.line
        )
    }
}

/// Per-file outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub label: String,
    /// Lines turned into intervals (a sub-labeled line counts once).
    pub intervals: usize,
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadedRegions<I = IntervalBuffer> {
    pub regions: RegionSet<I>,
    pub warnings: Vec<LoadWarning>,
    pub files: Vec<FileSummary>,
}

impl<I> LoadedRegions<I> {
    pub fn into_regions(self) -> RegionSet<I> {
        self.regions
    }
}

/// Region file loader.
#[derive(Debug, Clone, Default)]
pub struct RegionLoader {
    options: LoadOptions,
}

/// State built up across the files of one load.
struct LoadState<I> {
    labels: LabelTable,
    chroms: FxHashMap<String, I>,
    warnings: Vec<LoadWarning>,
}

impl<I: IntervalIndex + Default> LoadState<I> {
    fn insert(&mut self, region: RegionLine<'_>, label: LabelId) {
        self.chroms
            .entry(region.chrom.into_owned())
            .or_default()
            .add_interval(region.span.start, region.span.stop, label);
        self.labels.credit(label, region.span);
    }
}

impl RegionLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load all specs into a fresh region set.
    ///
    /// Label ids follow first appearance across all files. Nothing is
    /// returned unless every file could be read.
    pub fn load<I: IntervalIndex + Default>(&self, specs: &[RegionSpec]) -> Result<LoadedRegions<I>> {
        let mut state = LoadState {
            labels: LabelTable::new(),
            chroms: FxHashMap::default(),
            warnings: Vec::new(),
        };
        let mut files = Vec::with_capacity(specs.len());

        for spec in specs {
            let summary = self.load_file(spec, &mut state)?;
            info!(
                "Added region file '{}' as '{}' ({} intervals)",
                summary.path.display(),
                summary.label,
                summary.intervals
            );
            files.push(summary);
        }

        Ok(LoadedRegions {
            regions: RegionSet::from_parts(state.labels, state.chroms),
            warnings: state.warnings,
            files,
        })
    }

    /// Parse string tokens and load them.
    pub fn load_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<LoadedRegions> {
        self.load(&RegionSpec::parse_all(tokens)?)
    }

    fn load_file<I: IntervalIndex + Default>(
        &self,
        spec: &RegionSpec,
        state: &mut LoadState<I>,
    ) -> Result<FileSummary> {
        let path = spec.path();
        let mut reader = BedReader::from_path(path).map_err(|e| RegionError::io(path, e))?;
        let base = state.labels.intern(spec.label());
        let mut intervals = 0;

        while let Some((line_number, line)) =
            reader.next_line().map_err(|e| RegionError::io(path, e))?
        {
            let region = match parse_region_line(line, &self.options) {
                Ok(Some(region)) => region,
                Ok(None) => continue,
                Err(issue) => {
                    warn!("ignoring {} in {} : {}", issue, path.display(), line);
                    state.warnings.push(LoadWarning {
                        path: path.to_path_buf(),
                        line_number,
                        line: line.to_string(),
                        issue,
                    });
                    continue;
                }
            };

            let compound = region
                .sublabel
                .and_then(|sub| spec.label.compound(sub))
                .map(|name| state.labels.intern(&name))
                .filter(|&id| id != base);
            if let Some(id) = compound {
                state.insert(region.clone(), id);
            }
            state.insert(region, base);
            intervals += 1;
        }

        Ok(FileSummary {
            path: path.to_path_buf(),
            label: spec.label().to_string(),
            intervals,
        })
    }
}

impl RegionSet<IntervalBuffer> {
    /// Load region spec tokens (`path` or `[=]LABEL:path`) with default
    /// indexes.
    pub fn load<S: AsRef<str>>(tokens: &[S], fix_chr: bool) -> Result<LoadedRegions> {
        RegionLoader::new(LoadOptions::new().with_fix_chr(fix_chr)).load_tokens(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_bed(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".bed").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn token(label: &str, file: &NamedTempFile) -> String {
        format!("{}:{}", label, file.path().display())
    }

    #[test]
    fn test_sizes_sum_closed_lengths() {
        let bed = create_temp_bed("chr1\t10\t20\nchr1\t30\t40\nchr2\t0\t1\n");
        let loaded = RegionSet::load(&[token("CONF", &bed)], false).unwrap();

        assert_eq!(loaded.regions.region_size("CONF"), 21);
        assert_eq!(loaded.files[0].intervals, 3);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_compound_labels_credit_both() {
        let bed = create_temp_bed("chr1\t0\t10\tfoo\n");
        let loaded = RegionSet::load(&[token("A", &bed)], false).unwrap();
        let regions = loaded.regions;

        assert_eq!(regions.labels().names().collect::<Vec<_>>(), ["A", "A_foo"]);
        assert_eq!(regions.region_size("A"), 10);
        assert_eq!(regions.region_size("A_foo"), 10);
        assert_eq!(loaded.files[0].intervals, 1);
    }

    #[test]
    fn test_fixed_label_ignores_fourth_column() {
        let bed = create_temp_bed("chr1\t0\t10\tfoo\n");
        let loaded = RegionSet::load(&[token("=A", &bed), token("CONF", &bed)], false).unwrap();
        let regions = loaded.regions;

        assert_eq!(regions.labels().names().collect::<Vec<_>>(), ["A", "CONF"]);
        assert!(!regions.has_regions("A_foo"));
        assert!(!regions.has_regions("CONF_foo"));
    }

    #[test]
    fn test_same_file_twice_doubles_size() {
        let bed = create_temp_bed("chr1\t0\t10\n");
        let loaded = RegionSet::load(&[token("A", &bed), token("A", &bed)], false).unwrap();

        assert_eq!(loaded.regions.labels().len(), 1);
        assert_eq!(loaded.regions.region_size("A"), 20);
    }

    #[test]
    fn test_bad_lines_become_warnings() {
        let bed = create_temp_bed(
            "chr1\t10\t20\n\nchr1\t100\nchr1\tx\t20\nchr1\t50\t40\n# header\nchr1\t60\t70\n",
        );
        let loaded = RegionSet::load(&[token("A", &bed)], false).unwrap();

        assert_eq!(loaded.regions.region_size("A"), 20);
        let lines: Vec<usize> = loaded.warnings.iter().map(|w| w.line_number).collect();
        assert_eq!(lines, [3, 4, 5]);
        assert_eq!(loaded.warnings[0].issue, LineIssue::TooFewFields(2));
        assert!(loaded.warnings[1].to_string().contains("chr1\tx\t20"));
    }

    #[test]
    fn test_huge_intervals_saturate_size() {
        let bed = create_temp_bed("chr1\t0\t18446744073709551615\nchr1\t0\t18446744073709551615\n");
        let loaded = RegionSet::load(&[token("A", &bed)], false).unwrap();

        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.regions.region_size("A"), u64::MAX);
    }

    #[test]
    fn test_missing_file_aborts_load() {
        let bed = create_temp_bed("chr1\t0\t10\n");
        let result = RegionSet::load(
            &[token("A", &bed), "B:/definitely/not/here.bed".to_string()],
            false,
        );
        assert!(matches!(result, Err(RegionError::Io { .. })));
    }

    #[test]
    fn test_empty_file_still_registers_label() {
        let bed = create_temp_bed("");
        let loaded = RegionSet::load(&[token("CONF", &bed)], false).unwrap();

        assert!(loaded.regions.has_regions("CONF"));
        assert_eq!(loaded.regions.region_size("CONF"), 0);
    }

    #[test]
    fn test_fix_chr_renames_before_storage() {
        let bed = create_temp_bed("1\t0\t10\nchr2\t0\t10\n");
        let loaded = RegionSet::load(&[token("A", &bed)], true).unwrap();

        let mut chroms: Vec<_> = loaded.regions.chromosomes().collect();
        chroms.sort();
        assert_eq!(chroms, ["chr1", "chr2"]);
    }

    #[test]
    fn test_label_from_file_stem() {
        let bed = create_temp_bed("chr1\t0\t10\n");
        let path = bed.path().to_string_lossy().into_owned();
        let stem = bed
            .path()
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        let loaded = RegionSet::load(&[path], false).unwrap();
        assert_eq!(loaded.files[0].label, stem);
        assert_eq!(loaded.regions.region_size(&stem), 10);
    }
}
