//! Error types shared by the loader and the annotator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load or a scan.
///
/// Recoverable problems in region files are not errors; they are reported as
/// [`LoadWarning`](crate::loader::LoadWarning)s alongside the loaded set.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Invalid region spec '{0}': empty label")]
    EmptyLabel(String),

    #[error("Invalid region spec '{0}': empty path")]
    EmptyPath(String),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Variants out of order at {chrom}:{start} (already advanced to {watermark})")]
    OutOfOrder {
        chrom: String,
        start: u64,
        watermark: u64,
    },

    #[error("Variants out of order: chromosome '{0}' was seen earlier (chromosomes must be contiguous)")]
    ChromosomeRevisited(String),

    #[error("Invalid VCF line {line}: {message}")]
    Vcf { line: usize, message: String },

    #[error("I/O error: {0}")]
    Output(#[from] io::Error),
}

impl RegionError {
    /// Wrap an I/O error raised while reading `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RegionError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for violations of the sorted-input contract.
    pub fn is_ordering_violation(&self) -> bool {
        matches!(
            self,
            RegionError::OutOfOrder { .. } | RegionError::ChromosomeRevisited(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RegionError>;
