//! Plain-text rendering of a difference list.
//!
//! Sections appear in a fixed order: missing directories, missing files,
//! extra directories, extra files, kind mismatches, then one block per file
//! with content changes. Empty sections are left out and blocks are separated
//! by an empty line.

use std::path::Path;

use dircmp_core::{Comparison, ContentDelta, ContentDifference, DeltaKind, Difference};

use crate::buckets::DifferenceBuckets;
use crate::style::ReportStyle;

/// Renders differences into a human-readable report.
#[derive(Clone, Debug, Default)]
pub struct PrettyPrinter {
    style: ReportStyle,
}

impl PrettyPrinter {
    pub fn new(style: ReportStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    /// Render a difference list. An empty list renders as an empty string.
    pub fn print(&self, differences: &[Difference]) -> String {
        self.blocks(differences).join(&self.style.newline)
    }

    /// Render a comparison, including the files skipped during content diffing.
    pub fn print_comparison(&self, comparison: &Comparison) -> String {
        let mut blocks = self.blocks(&comparison.differences);
        if !comparison.skipped.is_empty() {
            let entries: Vec<String> = comparison
                .skipped
                .iter()
                .map(|s| format!("{}: {}", s.path.display(), s.reason))
                .collect();
            blocks.push(self.section("Skipped Files", entries));
        }
        blocks.join(&self.style.newline)
    }

    fn blocks(&self, differences: &[Difference]) -> Vec<String> {
        let buckets = DifferenceBuckets::from_differences(differences);
        let mut blocks = Vec::new();

        let sections = [
            ("Missing Directories", &buckets.missing_directories),
            ("Missing Files", &buckets.missing_files),
            ("Extra Directories", &buckets.extra_directories),
            ("Extra Files", &buckets.extra_files),
        ];
        for (title, paths) in sections {
            if !paths.is_empty() {
                blocks.push(self.section(title, paths.iter().map(|p| display(p))));
            }
        }

        if !buckets.kind_mismatches.is_empty() {
            let entries = buckets.kind_mismatches.iter().map(|m| {
                format!(
                    "{} ({} -> {})",
                    m.path.display(),
                    m.original.as_str(),
                    m.revised.as_str()
                )
            });
            blocks.push(self.section("Kind Mismatches", entries));
        }

        for content in &buckets.content {
            blocks.push(self.content_block(content));
        }

        blocks
    }

    fn section<I, S>(&self, title: &str, entries: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nl = &self.style.newline;
        let one = self.style.indent(1);
        let mut out = format!("{title}:{nl}");
        for entry in entries {
            out.push_str(&one);
            out.push_str(entry.as_ref());
            out.push_str(nl);
        }
        out
    }

    fn content_block(&self, content: &ContentDifference) -> String {
        let nl = &self.style.newline;
        let deltas: Vec<String> = content
            .deltas
            .iter()
            .map(|delta| self.delta_block(delta))
            .collect();
        format!("{}:{nl}{}", content.path.display(), deltas.join(nl))
    }

    fn delta_block(&self, delta: &ContentDelta) -> String {
        let nl = &self.style.newline;
        let one = self.style.indent(1);
        let two = self.style.indent(2);

        let mut out = match delta.kind {
            DeltaKind::Change => format!(
                "{one}Changed content at line {}:{nl}",
                delta.original.position + 1
            ),
            DeltaKind::Delete => format!(
                "{one}Missing content at line {}:{nl}",
                delta.original.position + 1
            ),
            DeltaKind::Insert => format!(
                "{one}Inserted content at line {}:{nl}",
                delta.revised.position + 1
            ),
        };
        match delta.kind {
            DeltaKind::Change => {
                out.push_str(&format!("{two}from ->{nl}"));
                self.push_lines(&mut out, &delta.original.lines);
                out.push_str(&format!("{two}to ->{nl}"));
                self.push_lines(&mut out, &delta.revised.lines);
            }
            DeltaKind::Delete => self.push_lines(&mut out, &delta.original.lines),
            DeltaKind::Insert => self.push_lines(&mut out, &delta.revised.lines),
        }
        out
    }

    fn push_lines(&self, out: &mut String, lines: &[String]) {
        let two = self.style.indent(2);
        for line in lines {
            out.push_str(&two);
            out.push_str(line);
            out.push_str(&self.style.newline);
        }
    }
}

/// Render with the default style.
pub fn render(differences: &[Difference]) -> String {
    PrettyPrinter::default().print(differences)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
