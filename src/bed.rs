//! Streaming reader for BED-like region files.
//!
//! Only the first four columns matter here: chromosome, start (0-based,
//! inclusive), end (0-based, exclusive) and an optional sub-label. Further
//! columns are ignored.

use crate::config::LoadOptions;
use crate::interval::Span;
use crate::streaming::{parse_u64_fast, should_skip_line};
use flate2::read::MultiGzDecoder;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Recoverable problems with a single region file line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    #[error("expected at least 3 fields, got {0}")]
    TooFewFields(usize),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("start ({start}) is not before end ({end})")]
    StartAfterStop { start: u64, end: u64 },
}

/// One parsed interval line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLine<'a> {
    pub chrom: Cow<'a, str>,
    pub span: Span,
    /// Fourth column, if present and non-empty.
    pub sublabel: Option<&'a str>,
}

/// Parse one region file line.
///
/// Returns `Ok(None)` for lines that carry no interval and need no warning:
/// blank lines and `#` comments.
pub fn parse_region_line<'a>(
    line: &'a str,
    options: &LoadOptions,
) -> Result<Option<RegionLine<'a>>, LineIssue> {
    if line.trim().is_empty() || should_skip_line(line.as_bytes()) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(LineIssue::TooFewFields(fields.len()));
    }

    let start = parse_coordinate(fields[1])?;
    let end = parse_coordinate(fields[2])?;
    let span = Span::from_bed(start, end).ok_or(LineIssue::StartAfterStop { start, end })?;

    Ok(Some(RegionLine {
        chrom: options.chrom_name(fields[0]),
        span,
        sublabel: fields.get(3).copied().filter(|s| !s.is_empty()),
    }))
}

fn parse_coordinate(field: &str) -> Result<u64, LineIssue> {
    parse_u64_fast(field.trim().as_bytes())
        .ok_or_else(|| LineIssue::InvalidCoordinate(field.to_string()))
}

/// Open a text file, decompressing transparently when the name ends in
/// `.gz` (plain gzip and bgzip both work).
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Line reader tracking 1-based line numbers.
///
/// Lines are decoded lossily so a stray non-UTF-8 byte turns into a line
/// warning instead of aborting the whole file.
pub struct BedReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    line: String,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::with_capacity(1024),
            line: String::with_capacity(1024),
        }
    }

    /// Read the next line without its terminator.
    pub fn next_line(&mut self) -> io::Result<Option<(usize, &str)>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
            self.buffer.pop();
        }
        self.line.clear();
        self.line.push_str(&String::from_utf8_lossy(&self.buffer));
        Ok(Some((self.line_number, &self.line)))
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl BedReader<Box<dyn BufRead>> {
    /// Open a (possibly gzipped) region file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(open_input(path)?))
    }
}

impl<'a> BedReader<BufReader<&'a [u8]>> {
    /// Read from an in-memory string (useful for testing).
    pub fn from_str(content: &'a str) -> Self {
        Self::new(BufReader::new(content.as_bytes()))
    }
}
