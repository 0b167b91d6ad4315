//! Shared components for the sorted annotation scan.
//!
//! - Retiring buffers backing the interval index
//! - Sort-order guard
//! - Allocation-free line parsing
//! - Buffered output
//!
//! Memory stays bounded by the intervals still ahead of the scan.

pub mod active_set;
pub mod output;
pub mod parsing;
pub mod validation;

pub use active_set::ActiveSet;
pub use output::LineWriter;
pub use parsing::{field_range, parse_u64_fast, should_skip_line};
pub use validation::OrderGuard;
