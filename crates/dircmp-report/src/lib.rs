//! Reports and assertions for directory comparisons.
//!
//! # Key Types
//!
//! - [`PrettyPrinter`] / [`ReportStyle`] -- Render differences as text
//! - [`DifferenceBuckets`] -- Differences grouped per report section
//! - [`DirAssert`] / [`assert_dirs_eq!`] -- Panic with the report when trees differ

pub mod assert;
pub mod buckets;
pub mod printer;
pub mod style;

pub use assert::{check_dirs_equal, AssertionFailure, DirAssert};
pub use buckets::{DifferenceBuckets, KindMismatch};
pub use printer::{render, PrettyPrinter};
pub use style::ReportStyle;
