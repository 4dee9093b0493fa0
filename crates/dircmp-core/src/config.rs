use serde::{Deserialize, Serialize};

/// How blank lines inside a delta are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankLines {
    /// Drop empty and whitespace-only lines from reported chunks. A file whose
    /// deltas all become empty is reported as unchanged.
    #[default]
    Strip,
    /// Report chunk lines verbatim.
    Keep,
}

/// What to do when a file cannot be read or decoded during content comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorPolicy {
    /// Record the file as skipped, log a warning and keep comparing.
    #[default]
    Skip,
    /// Fail the whole comparison with the first file error.
    Abort,
}

/// Options for a directory comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Blank-line reporting policy for content deltas.
    pub blank_lines: BlankLines,
    /// Policy for unreadable or non-UTF-8 files.
    pub on_file_error: FileErrorPolicy,
    /// Whether symbolic links are followed while walking the trees.
    pub follow_links: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            blank_lines: BlankLines::Strip,
            on_file_error: FileErrorPolicy::Skip,
            follow_links: true,
        }
    }
}

impl CompareOptions {
    /// Report every line verbatim and fail on the first unreadable file.
    pub fn strict() -> Self {
        Self {
            blank_lines: BlankLines::Keep,
            on_file_error: FileErrorPolicy::Abort,
            ..Default::default()
        }
    }

    pub fn with_blank_lines(mut self, blank_lines: BlankLines) -> Self {
        self.blank_lines = blank_lines;
        self
    }

    pub fn with_file_error_policy(mut self, policy: FileErrorPolicy) -> Self {
        self.on_file_error = policy;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}
