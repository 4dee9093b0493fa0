//! Single-pass grouping of differences by variant.

use std::path::Path;

use dircmp_core::{ContentDifference, Difference, EntryKind};

/// Differences grouped into one bucket per report section.
///
/// Input order is preserved inside each bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DifferenceBuckets<'a> {
    pub missing_directories: Vec<&'a Path>,
    pub missing_files: Vec<&'a Path>,
    pub extra_directories: Vec<&'a Path>,
    pub extra_files: Vec<&'a Path>,
    pub kind_mismatches: Vec<KindMismatch<'a>>,
    pub content: Vec<&'a ContentDifference>,
}

/// A path whose entry kind differs between the two trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindMismatch<'a> {
    pub path: &'a Path,
    pub original: EntryKind,
    pub revised: EntryKind,
}

impl<'a> DifferenceBuckets<'a> {
    pub fn from_differences<I>(differences: I) -> Self
    where
        I: IntoIterator<Item = &'a Difference>,
    {
        let mut buckets = Self::default();
        for difference in differences {
            match difference {
                Difference::MissingDirectory { path } => buckets.missing_directories.push(path),
                Difference::MissingFile { path } => buckets.missing_files.push(path),
                Difference::ExtraDirectory { path } => buckets.extra_directories.push(path),
                Difference::ExtraFile { path } => buckets.extra_files.push(path),
                Difference::KindMismatch {
                    path,
                    original,
                    revised,
                } => buckets.kind_mismatches.push(KindMismatch {
                    path,
                    original: *original,
                    revised: *revised,
                }),
                Difference::Content(content) => buckets.content.push(content),
            }
        }
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.missing_directories.len()
            + self.missing_files.len()
            + self.extra_directories.len()
            + self.extra_files.len()
            + self.kind_mismatches.len()
            + self.content.len()
    }
}
