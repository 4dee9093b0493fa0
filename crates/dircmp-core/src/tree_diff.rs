//! Tree-level diff: reconcile two snapshots by relative path.
//!
//! Paths present only under the original root are reported as missing,
//! paths present only under the revised root as extra. Paths present on both
//! sides are either content-comparison candidates (files on both sides) or
//! kind mismatches. An entry that is neither file nor directory only counts
//! when the other side has something different at the same path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::config::CompareOptions;
use crate::error::CompareResult;
use crate::model::{sort_differences, Difference, EntryKind};
use crate::snapshot::TreeSnapshot;

/// Compare two snapshots and produce the structural differences.
///
/// The result holds only `Missing*`, `Extra*` and `KindMismatch` records, in
/// report order.
pub fn reconcile(original: &TreeSnapshot, revised: &TreeSnapshot) -> Vec<Difference> {
    let mut differences = Vec::new();

    // Missing entries and kind mismatches.
    for (path, kind) in original.iter() {
        match revised.kind(path) {
            None => {
                if let Some(diff) = classify(path, kind, Side::Original) {
                    differences.push(diff);
                }
            }
            Some(other) if is_kind_mismatch(kind, other) => {
                differences.push(Difference::KindMismatch {
                    path: path.to_path_buf(),
                    original: kind,
                    revised: other,
                });
            }
            Some(_) => {}
        }
    }

    // Extra entries.
    for (path, kind) in revised.iter() {
        if !original.contains(path) {
            if let Some(diff) = classify(path, kind, Side::Revised) {
                differences.push(diff);
            }
        }
    }

    sort_differences(&mut differences);
    differences
}

/// Capture both roots with default options and reconcile them.
pub fn reconcile_dirs(original: &Path, revised: &Path) -> CompareResult<Vec<Difference>> {
    let options = CompareOptions::default();
    let cancel = CancellationToken::new();
    let original = TreeSnapshot::capture(original, &options, &cancel)?;
    let revised = TreeSnapshot::capture(revised, &options, &cancel)?;
    Ok(reconcile(&original, &revised))
}

/// Relative paths that are regular files in both snapshots, in snapshot order.
pub fn common_files(original: &TreeSnapshot, revised: &TreeSnapshot) -> Vec<PathBuf> {
    original
        .iter()
        .filter(|(path, kind)| {
            *kind == EntryKind::File && revised.kind(path) == Some(EntryKind::File)
        })
        .map(|(path, _)| path.to_path_buf())
        .collect()
}

#[derive(Clone, Copy)]
enum Side {
    Original,
    Revised,
}

fn classify(path: &Path, kind: EntryKind, side: Side) -> Option<Difference> {
    let path = path.to_path_buf();
    match (kind, side) {
        (EntryKind::Directory, Side::Original) => Some(Difference::MissingDirectory { path }),
        (EntryKind::File, Side::Original) => Some(Difference::MissingFile { path }),
        (EntryKind::Directory, Side::Revised) => Some(Difference::ExtraDirectory { path }),
        (EntryKind::File, Side::Revised) => Some(Difference::ExtraFile { path }),
        (EntryKind::Other, _) => {
            debug!(path = %path.display(), "skipping entry that is neither file nor directory");
            None
        }
    }
}

fn is_kind_mismatch(original: EntryKind, revised: EntryKind) -> bool {
    original != revised
}
