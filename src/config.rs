//! Load-time configuration.
//!
//! Options are passed explicitly to the loader; nothing here is global, so
//! independent loads (one per shard, one per test) never interfere.

use std::borrow::Cow;

/// Options controlling how region files are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Prepend `chr` to chromosome names that look like bare numbers or
    /// X/Y/M, so `1` in a region file matches `chr1` in the variant stream.
    pub fix_chr: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fix_chr flag (builder pattern).
    pub fn with_fix_chr(mut self, fix_chr: bool) -> Self {
        self.fix_chr = fix_chr;
        self
    }

    /// Apply the configured chromosome-name normalization.
    #[inline]
    pub fn chrom_name<'a>(&self, chrom: &'a str) -> Cow<'a, str> {
        if self.fix_chr {
            normalize_chrom(chrom)
        } else {
            Cow::Borrowed(chrom)
        }
    }
}

/// Prepend `chr` when the name starts with `1`-`9`, `X`, `Y` or `M`.
///
/// Names starting with `0` or anything else are returned unchanged.
#[inline]
pub fn normalize_chrom(chrom: &str) -> Cow<'_, str> {
    match chrom.as_bytes().first() {
        Some(b'1'..=b'9' | b'X' | b'Y' | b'M') => Cow::Owned(format!("chr{}", chrom)),
        _ => Cow::Borrowed(chrom),
    }
}
