//! Allocation-free helpers for tab-delimited lines.

use memchr::memchr_iter;
use std::ops::Range;

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty, contains non-digit characters or
/// does not fit in a u64.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Check if a region file line is a `#` comment.
///
/// `track` and `browser` lines are not skipped here; they fail field parsing
/// and are reported like any other unusable line.
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.first() == Some(&b'#')
}

/// Byte range of the `n`th (0-based) tab-separated field of `line`.
///
/// Uses memchr for SIMD-accelerated tab searching, avoiding the overhead of
/// splitting the whole line into a Vec.
pub fn field_range(line: &[u8], n: usize) -> Option<Range<usize>> {
    let mut start = 0;
    let mut field = 0;
    for tab in memchr_iter(b'\t', line) {
        if field == n {
            return Some(start..tab);
        }
        field += 1;
        start = tab + 1;
    }
    (field == n).then_some(start..line.len())
}
