//! Command implementations for the `strata` binary.

pub mod annotate;
pub mod sizes;

pub use annotate::AnnotateCommand;
pub use sizes::SizesCommand;
