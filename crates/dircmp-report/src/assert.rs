//! Test assertions over directory trees.
//!
//! ```no_run
//! use dircmp_report::{assert_dirs_eq, DirAssert};
//!
//! // Panics with a full report when the trees differ.
//! DirAssert::that("target/generated").is_equal_to("tests/expected");
//! assert_dirs_eq!("tests/expected", "target/generated");
//! ```

use std::path::{Path, PathBuf};

use dircmp_core::{CompareError, CompareOptions, Comparator};

use crate::printer::PrettyPrinter;
use crate::style::ReportStyle;

/// Why an assertion did not hold.
#[derive(Debug, thiserror::Error)]
pub enum AssertionFailure {
    /// The trees differ; `report` is the rendered difference list.
    #[error("directories differ ({count} differences):\n{report}")]
    Differ { count: usize, report: String },

    /// The comparison itself failed.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Fluent assertion on an actual directory.
#[derive(Clone, Debug)]
pub struct DirAssert {
    actual: PathBuf,
    options: CompareOptions,
    printer: PrettyPrinter,
}

impl DirAssert {
    pub fn that(actual: impl Into<PathBuf>) -> Self {
        Self {
            actual: actual.into(),
            options: CompareOptions::default(),
            printer: PrettyPrinter::default(),
        }
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.printer = PrettyPrinter::new(style);
        self
    }

    /// Compare `expected` (the original tree) against the actual tree.
    pub fn check(&self, expected: impl AsRef<Path>) -> Result<(), AssertionFailure> {
        let comparison = Comparator::new(self.options.clone())
            .compare(expected.as_ref(), &self.actual)?;

        if comparison.is_empty() {
            if !comparison.skipped.is_empty() {
                tracing::warn!(
                    skipped = comparison.skipped.len(),
                    "directories equal apart from skipped files"
                );
            }
            return Ok(());
        }

        Err(AssertionFailure::Differ {
            count: comparison.len(),
            report: self.printer.print_comparison(&comparison),
        })
    }

    /// Panic with the rendered report unless the trees are equal.
    #[track_caller]
    pub fn is_equal_to(&self, expected: impl AsRef<Path>) {
        if let Err(failure) = self.check(expected) {
            panic!("{failure}");
        }
    }
}

/// Non-panicking form of [`assert_dirs_eq!`](crate::assert_dirs_eq).
pub fn check_dirs_equal(
    expected: impl AsRef<Path>,
    actual: impl AsRef<Path>,
) -> Result<(), AssertionFailure> {
    DirAssert::that(actual.as_ref()).check(expected)
}

/// Assert that two directory trees are equal, panicking with a report if not.
///
/// The first argument is the expected (original) tree, the second the actual
/// (revised) one.
#[macro_export]
macro_rules! assert_dirs_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::DirAssert::that($actual).is_equal_to($expected)
    };
}
