//! Minimal VCF text records for driving the annotator.
//!
//! Only CHROM, POS, REF and INFO are interpreted; every other column is
//! carried through untouched.

use crate::annotate::{RegionTarget, REGIONS_KEY};
use crate::error::{RegionError, Result};
use crate::streaming::{field_range, parse_u64_fast};
use std::ops::Range;

const INFO_COLUMN: usize = 7;

/// Header line declaring the `Regions` INFO key.
pub const REGIONS_HEADER: &str =
    "##INFO=<ID=Regions,Number=.,Type=String,Description=\"Regions in which the variant is located\">";

/// True for a `##INFO` line declaring `Regions`.
pub fn declares_regions(header_line: &str) -> bool {
    header_line.starts_with("##INFO=<ID=Regions,")
}

/// One VCF data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecord {
    line: String,
    chrom: Range<usize>,
    start: u64,
    end: u64,
}

impl VcfRecord {
    /// Parse a data line. `line_number` is only used in error messages.
    pub fn parse(line: impl Into<String>, line_number: usize) -> Result<Self> {
        let line = line.into();
        let invalid = |message: String| RegionError::Vcf {
            line: line_number,
            message,
        };
        let bytes = line.as_bytes();

        if field_range(bytes, INFO_COLUMN).is_none() {
            return Err(invalid("expected at least 8 columns".to_string()));
        }
        let chrom = field_range(bytes, 0).unwrap_or(0..0);
        let pos_field = &line[field_range(bytes, 1).unwrap_or(0..0)];
        let pos = parse_u64_fast(pos_field.as_bytes())
            .filter(|&p| p > 0)
            .ok_or_else(|| invalid(format!("invalid POS '{}'", pos_field)))?;
        let ref_len = field_range(bytes, 3).map_or(1, |r| r.len().max(1)) as u64;

        let start = pos - 1;
        let mut record = Self {
            chrom,
            start,
            end: start + ref_len - 1,
            line,
        };
        // Symbolic alleles carry their reference length in END.
        if let Some(end) = record.info_value("END").and_then(|v| parse_u64_fast(v.as_bytes())) {
            if end >= pos {
                record.end = end - 1;
            }
        }
        Ok(record)
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based POS.
    pub fn pos(&self) -> u64 {
        self.start + 1
    }

    fn info_range(&self) -> Range<usize> {
        field_range(self.line.as_bytes(), INFO_COLUMN).unwrap_or(0..0)
    }

    fn info(&self) -> &str {
        &self.line[self.info_range()]
    }

    /// Value of an INFO key (`Some("")` for flags).
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info().split(';').find_map(|entry| match entry.split_once('=') {
            Some((k, v)) if k == key => Some(v),
            None if entry == key => Some(""),
            _ => None,
        })
    }

    /// Current `Regions` annotation.
    pub fn regions(&self) -> Option<&str> {
        self.info_value(REGIONS_KEY)
    }

    /// Replace (or with `None`, remove) an INFO key.
    pub fn set_info(&mut self, key: &str, value: Option<&str>) {
        let range = self.info_range();
        let mut entries: Vec<String> = self
            .info()
            .split(';')
            .filter(|entry| {
                !entry.is_empty()
                    && *entry != "."
                    && *entry != key
                    && entry.split_once('=').map_or(true, |(k, _)| k != key)
            })
            .map(str::to_string)
            .collect();
        if let Some(value) = value {
            entries.push(format!("{}={}", key, value));
        }
        let info = if entries.is_empty() {
            ".".to_string()
        } else {
            entries.join(";")
        };
        self.line.replace_range(range, &info);
    }
}

impl RegionTarget for VcfRecord {
    fn chrom(&self) -> &str {
        &self.line[self.chrom.clone()]
    }

    fn span(&self) -> (u64, u64) {
        (self.start, self.end)
    }

    fn set_regions(&mut self, regions: &str) {
        self.set_info(REGIONS_KEY, Some(regions));
    }

    fn clear_regions(&mut self) {
        self.set_info(REGIONS_KEY, None);
    }
}
