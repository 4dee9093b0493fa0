//! Directory comparison engine.
//!
//! Compares an original directory tree against a revised one and reports
//! every structural and content difference, for use as a test-assertion
//! backend ("this output directory equals that expected directory").
//!
//! # Key Types
//!
//! - [`Comparator`] / [`compare`] -- Run a full comparison
//! - [`Difference`] -- Missing/extra directories and files, kind mismatches, content changes
//! - [`ContentDifference`] / [`ContentDelta`] / [`Chunk`] -- Line-level edits with 0-based positions
//! - [`TreeSnapshot`] -- Sorted relative paths under a root
//! - [`CompareOptions`] -- Blank-line, file-error and symlink policies
//! - [`CancellationToken`] -- Cooperative cancellation

pub mod cancel;
pub mod compare;
pub mod config;
pub mod content_diff;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod tree_diff;

pub use cancel::CancellationToken;
pub use compare::{compare, Comparator};
pub use config::{BlankLines, CompareOptions, FileErrorPolicy};
pub use content_diff::{
    apply_deltas, diff_contents, diff_file, diff_lines, diff_text, split_lines, ContentReport,
};
pub use error::{CompareError, CompareResult};
pub use model::{
    sort_differences, Category, Chunk, Comparison, ContentDelta, ContentDifference, DeltaKind,
    Difference, EntryKind, SkippedFile,
};
pub use snapshot::TreeSnapshot;
pub use tree_diff::{common_files, reconcile, reconcile_dirs};
