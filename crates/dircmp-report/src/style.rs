use serde::{Deserialize, Serialize};

/// Layout of a rendered report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStyle {
    /// Indent unit; nested lines repeat it.
    pub indent: String,
    /// Line separator.
    pub newline: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            indent: "\t".into(),
            newline: "\n".into(),
        }
    }
}

impl ReportStyle {
    pub fn new(indent: impl Into<String>, newline: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            newline: newline.into(),
        }
    }

    /// Default style with `width` spaces per indent level.
    pub fn spaces(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
            ..Default::default()
        }
    }

    pub(crate) fn indent(&self, level: usize) -> String {
        self.indent.repeat(level)
    }
}
