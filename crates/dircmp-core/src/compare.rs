use std::path::Path;

use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::config::CompareOptions;
use crate::content_diff::diff_contents;
use crate::error::CompareResult;
use crate::model::{sort_differences, Comparison, Difference};
use crate::snapshot::TreeSnapshot;
use crate::tree_diff::{common_files, reconcile};

/// Compares an original directory tree against a revised one.
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    options: CompareOptions,
    cancel: CancellationToken,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a token that can stop the comparison from another thread.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Run the tree reconciliation, then the content diff of every common file.
    ///
    /// Differences come back in report order: missing directories, missing
    /// files, extra directories, extra files, kind mismatches, content, each
    /// sorted by relative path.
    pub fn compare(&self, original: &Path, revised: &Path) -> CompareResult<Comparison> {
        let original_tree = TreeSnapshot::capture(original, &self.options, &self.cancel)?;
        let revised_tree = TreeSnapshot::capture(revised, &self.options, &self.cancel)?;

        let mut differences = reconcile(&original_tree, &revised_tree);
        let common = common_files(&original_tree, &revised_tree);
        debug!(
            structural = differences.len(),
            common = common.len(),
            "trees reconciled"
        );

        let content = diff_contents(original, revised, &common, &self.options, &self.cancel)?;
        differences.extend(content.differences.into_iter().map(Difference::Content));
        sort_differences(&mut differences);

        info!(
            original = %original.display(),
            revised = %revised.display(),
            differences = differences.len(),
            skipped = content.skipped.len(),
            "comparison complete"
        );

        Ok(Comparison {
            differences,
            skipped: content.skipped,
        })
    }
}

/// Compare two directory trees with default options.
pub fn compare(original: &Path, revised: &Path) -> CompareResult<Vec<Difference>> {
    Comparator::default()
        .compare(original, revised)
        .map(Comparison::into_differences)
}
