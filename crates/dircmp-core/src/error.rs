//! Error types for the comparison engine.

use std::path::PathBuf;

/// Errors that can occur while comparing two directory trees.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A comparison root does not exist.
    #[error("root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A comparison root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Metadata for a comparison root could not be read.
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Traversal below a root failed (unreadable directory, symlink loop).
    #[error("failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A file selected for content comparison could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file selected for content comparison is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An edit script did not match the lines it was applied to.
    #[error("edit script does not apply at line index {position}")]
    PatchMismatch { position: usize },

    /// The comparison was cancelled through its token.
    #[error("comparison cancelled")]
    Cancelled,
}

impl CompareError {
    /// Returns `true` for errors scoped to a single file, which are subject
    /// to [`FileErrorPolicy`](crate::config::FileErrorPolicy).
    pub fn is_file_level(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::Encoding { .. })
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
