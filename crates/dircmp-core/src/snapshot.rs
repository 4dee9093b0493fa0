//! Tree snapshots: every relative path under a root with its entry kind.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::cancel::CancellationToken;
use crate::config::CompareOptions;
use crate::error::{CompareError, CompareResult};
use crate::model::EntryKind;

/// The sorted set of relative paths under a root at comparison time.
///
/// Paths are ordered component by component, so a directory always sorts
/// immediately before its own descendants. The root itself is never present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    root: PathBuf,
    entries: BTreeMap<PathBuf, EntryKind>,
}

impl TreeSnapshot {
    /// Walk `root` recursively and record every directory and file below it.
    pub fn capture(
        root: &Path,
        options: &CompareOptions,
        cancel: &CancellationToken,
    ) -> CompareResult<Self> {
        ensure_directory(root)?;

        let mut entries = BTreeMap::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(options.follow_links)
            .sort_by_file_name();

        for entry in walker {
            cancel.check()?;
            match entry {
                Ok(entry) => {
                    let Ok(relative) = entry.path().strip_prefix(root) else {
                        continue;
                    };
                    if relative.as_os_str().is_empty() {
                        continue;
                    }
                    entries.insert(relative.to_path_buf(), entry_kind(&entry));
                }
                Err(err) if is_dangling_link(&err) => {
                    // A followed link whose target is gone; keep the path, it has no kind.
                    if let Some(relative) = err.path().and_then(|p| p.strip_prefix(root).ok()) {
                        debug!(path = %relative.display(), "dangling symbolic link");
                        entries.insert(relative.to_path_buf(), EntryKind::Other);
                    }
                }
                Err(source) => {
                    return Err(CompareError::Walk {
                        root: root.to_path_buf(),
                        source,
                    });
                }
            }
        }

        debug!(root = %root.display(), entries = entries.len(), "captured tree snapshot");
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Build a snapshot from already known entries.
    pub fn from_entries<I, P>(root: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = (P, EntryKind)>,
        P: Into<PathBuf>,
    {
        Self {
            root: root.into(),
            entries: entries
                .into_iter()
                .map(|(path, kind)| (path.into(), kind))
                .filter(|(path, _): &(PathBuf, EntryKind)| !path.as_os_str().is_empty())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// The kind recorded for `path`, if present.
    pub fn kind(&self, path: &Path) -> Option<EntryKind> {
        self.entries.get(path).copied()
    }

    /// Entries in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, EntryKind)> {
        self.entries.iter().map(|(path, kind)| (path.as_path(), *kind))
    }

    /// Absolute location of a relative path under this snapshot's root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

fn ensure_directory(root: &Path) -> CompareResult<()> {
    let metadata = std::fs::metadata(root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CompareError::RootNotFound(root.to_path_buf()),
        _ => CompareError::Io {
            path: root.to_path_buf(),
            source,
        },
    })?;

    if metadata.is_dir() {
        Ok(())
    } else {
        Err(CompareError::NotADirectory(root.to_path_buf()))
    }
}

fn entry_kind(entry: &walkdir::DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return EntryKind::Directory;
    }
    if file_type.is_file() {
        return EntryKind::File;
    }
    if entry.path_is_symlink() {
        // Not followed during the walk; classify by target.
        return match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(meta) if meta.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
    }
    EntryKind::Other
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_none()
        && err.depth() > 0
        && err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
