//! Difference records produced by a comparison.
//!
//! Every record is an immutable value built fresh for one comparison. Paths
//! are relative to the root of the tree they were found in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The kind of a file-system entry as seen at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
    /// Neither a directory nor a regular file (dangling link, socket, ...).
    Other,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Other => "other",
        }
    }
}

/// A single difference between the original and revised trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// A directory present under the original root only.
    MissingDirectory { path: PathBuf },
    /// A file present under the original root only.
    MissingFile { path: PathBuf },
    /// A directory present under the revised root only.
    ExtraDirectory { path: PathBuf },
    /// A file present under the revised root only.
    ExtraFile { path: PathBuf },
    /// A path that is a directory on one side and a file on the other.
    KindMismatch {
        path: PathBuf,
        original: EntryKind,
        revised: EntryKind,
    },
    /// A file present on both sides whose lines differ.
    Content(ContentDifference),
}

/// Report ordering of difference categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    MissingDirectory,
    MissingFile,
    ExtraDirectory,
    ExtraFile,
    KindMismatch,
    Content,
}

impl Difference {
    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        Self::MissingDirectory { path: path.into() }
    }

    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    pub fn extra_directory(path: impl Into<PathBuf>) -> Self {
        Self::ExtraDirectory { path: path.into() }
    }

    pub fn extra_file(path: impl Into<PathBuf>) -> Self {
        Self::ExtraFile { path: path.into() }
    }

    /// The relative path this difference is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingDirectory { path }
            | Self::MissingFile { path }
            | Self::ExtraDirectory { path }
            | Self::ExtraFile { path }
            | Self::KindMismatch { path, .. } => path,
            Self::Content(content) => &content.path,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::MissingDirectory { .. } => Category::MissingDirectory,
            Self::MissingFile { .. } => Category::MissingFile,
            Self::ExtraDirectory { .. } => Category::ExtraDirectory,
            Self::ExtraFile { .. } => Category::ExtraFile,
            Self::KindMismatch { .. } => Category::KindMismatch,
            Self::Content(_) => Category::Content,
        }
    }
}

/// Sort differences into report order: by category, then by relative path.
pub fn sort_differences(differences: &mut [Difference]) {
    differences.sort_by(|a, b| {
        a.category()
            .cmp(&b.category())
            .then_with(|| a.path().cmp(b.path()))
    });
}

/// Line-level changes for a file present under both roots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDifference {
    pub path: PathBuf,
    pub deltas: Vec<ContentDelta>,
}

impl ContentDifference {
    pub fn new(path: impl Into<PathBuf>, deltas: Vec<ContentDelta>) -> Self {
        Self {
            path: path.into(),
            deltas,
        }
    }

    /// Total number of lines inserted, counting change deltas.
    pub fn additions(&self) -> usize {
        self.deltas.iter().map(|d| d.revised.lines.len()).sum()
    }

    /// Total number of lines removed, counting change deltas.
    pub fn deletions(&self) -> usize {
        self.deltas.iter().map(|d| d.original.lines.len()).sum()
    }
}

/// The kind of a single edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Change,
    Insert,
    Delete,
}

/// One contiguous edit between two line sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDelta {
    pub kind: DeltaKind,
    pub original: Chunk,
    pub revised: Chunk,
}

impl ContentDelta {
    /// Build a delta, deriving its kind from which chunks carry lines.
    ///
    /// Returns `None` when both chunks are empty.
    pub fn from_chunks(original: Chunk, revised: Chunk) -> Option<Self> {
        let kind = match (original.lines.is_empty(), revised.lines.is_empty()) {
            (true, true) => return None,
            (false, true) => DeltaKind::Delete,
            (true, false) => DeltaKind::Insert,
            (false, false) => DeltaKind::Change,
        };
        Some(Self {
            kind,
            original,
            revised,
        })
    }
}

/// One side of a delta: a 0-based start position and the affected lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub position: usize,
    pub lines: Vec<String>,
}

impl Chunk {
    pub fn new<I, S>(position: usize, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty(position: usize) -> Self {
        Self {
            position,
            lines: Vec::new(),
        }
    }
}

/// A content-comparison candidate that was skipped after a file-level error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The full result of comparing two trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Differences in report order.
    pub differences: Vec<Difference>,
    /// Files left out of content comparison under the skip policy.
    pub skipped: Vec<SkippedFile>,
}

impl Comparison {
    /// Returns `true` if no differences were found.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of differences.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Number of differences in the given category.
    pub fn count(&self, category: Category) -> usize {
        self.differences
            .iter()
            .filter(|d| d.category() == category)
            .count()
    }

    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }
}
