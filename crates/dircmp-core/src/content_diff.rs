//! Content-level diff: line-by-line comparison of files present on both sides.
//!
//! Uses the `similar` crate (Myers diff algorithm) to align the two line
//! sequences, then folds every run of non-equal operations into one
//! [`ContentDelta`] with 0-based positions on both sides.
//!
//! The raw operations are captured without `similar`'s replace post-pass;
//! folding adjacent edits happens here, in order.

use std::ops::Range;
use std::path::{Path, PathBuf};

use similar::algorithms::{myers, Capture};
use similar::{DiffOp, DiffTag};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::config::{BlankLines, CompareOptions, FileErrorPolicy};
use crate::error::{CompareError, CompareResult};
use crate::model::{Chunk, ContentDelta, ContentDifference, SkippedFile};

/// Content differences for a set of files, plus the files that were skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentReport {
    pub differences: Vec<ContentDifference>,
    pub skipped: Vec<SkippedFile>,
}

/// Split text into lines, treating `\n` and `\r\n` alike.
///
/// A trailing line ending does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Compute the edit script turning `original` into `revised`.
///
/// Deltas are in ascending position order and carry their lines verbatim.
/// A pure insertion's original position is the original index the lines are
/// inserted at; a pure deletion's revised position is the revised index the
/// lines were removed at.
pub fn diff_lines(original: &[&str], revised: &[&str]) -> Vec<ContentDelta> {
    let ops = myers_ops(original, revised);

    let mut deltas = Vec::new();
    let mut pending: Option<(Range<usize>, Range<usize>)> = None;

    for op in &ops {
        let (tag, old, new) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            if old.is_empty() {
                continue;
            }
            if let Some((old, new)) = pending.take() {
                deltas.extend(make_delta(original, revised, old, new));
            }
            continue;
        }
        pending = Some(match pending.take() {
            Some((o, n)) => (o.start..old.end, n.start..new.end),
            None => (old, new),
        });
    }
    if let Some((old, new)) = pending {
        deltas.extend(make_delta(original, revised, old, new));
    }

    deltas
}

fn myers_ops(original: &[&str], revised: &[&str]) -> Vec<DiffOp> {
    let mut capture = Capture::new();
    if let Err(never) = myers::diff(
        &mut capture,
        original,
        0..original.len(),
        revised,
        0..revised.len(),
    ) {
        match never {}
    }
    capture.into_ops()
}

fn make_delta(
    original: &[&str],
    revised: &[&str],
    old: Range<usize>,
    new: Range<usize>,
) -> Option<ContentDelta> {
    ContentDelta::from_chunks(
        Chunk::new(old.start, original[old].iter().copied()),
        Chunk::new(new.start, revised[new].iter().copied()),
    )
}

/// Replay an unfiltered edit script over `original`.
///
/// Every delta's original chunk must match the lines at its position.
pub fn apply_deltas<S: AsRef<str>>(
    original: &[S],
    deltas: &[ContentDelta],
) -> CompareResult<Vec<String>> {
    let mut out = Vec::with_capacity(original.len());
    let mut cursor = 0usize;

    for delta in deltas {
        let start = delta.original.position;
        let end = start + delta.original.lines.len();
        if start < cursor || end > original.len() {
            return Err(CompareError::PatchMismatch { position: start });
        }
        let matches = original[start..end]
            .iter()
            .zip(&delta.original.lines)
            .all(|(have, want)| have.as_ref() == want.as_str());
        if !matches {
            return Err(CompareError::PatchMismatch { position: start });
        }

        out.extend(original[cursor..start].iter().map(|l| l.as_ref().to_string()));
        out.extend(delta.revised.lines.iter().cloned());
        cursor = end;
    }
    out.extend(original[cursor..].iter().map(|l| l.as_ref().to_string()));

    Ok(out)
}

/// Remove blank lines from every chunk.
///
/// Returns `None` when every delta ends up with two empty chunks: such a file
/// is reported as unchanged. Otherwise all deltas are kept, including ones
/// that became empty.
pub fn strip_blank_lines(deltas: Vec<ContentDelta>) -> Option<Vec<ContentDelta>> {
    let stripped: Vec<ContentDelta> = deltas
        .into_iter()
        .map(|mut delta| {
            delta.original.lines.retain(|l| !is_blank(l));
            delta.revised.lines.retain(|l| !is_blank(l));
            delta
        })
        .collect();

    let all_empty = stripped
        .iter()
        .all(|d| d.original.lines.is_empty() && d.revised.lines.is_empty());
    if all_empty {
        None
    } else {
        Some(stripped)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Diff two texts and apply the blank-line policy.
///
/// Returns `None` when there is nothing to report.
pub fn diff_text(
    original: &str,
    revised: &str,
    blank_lines: BlankLines,
) -> Option<Vec<ContentDelta>> {
    if original == revised {
        return None;
    }
    let deltas = diff_lines(&split_lines(original), &split_lines(revised));
    if deltas.is_empty() {
        return None;
    }
    match blank_lines {
        BlankLines::Strip => strip_blank_lines(deltas),
        BlankLines::Keep => Some(deltas),
    }
}

/// Read and diff one file pair.
pub fn diff_file(
    original_path: &Path,
    revised_path: &Path,
    relative: &Path,
    blank_lines: BlankLines,
) -> CompareResult<Option<ContentDifference>> {
    let original = read_text(original_path)?;
    let revised = read_text(revised_path)?;

    Ok(diff_text(&original, &revised, blank_lines)
        .map(|deltas| ContentDifference::new(relative, deltas)))
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> CompareResult<String> {
    let bytes = std::fs::read(path).map_err(|source| CompareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| CompareError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Diff every relative path in `paths`, resolved under both roots.
///
/// File-level errors follow `options.on_file_error`.
pub fn diff_contents(
    original_root: &Path,
    revised_root: &Path,
    paths: &[PathBuf],
    options: &CompareOptions,
    cancel: &CancellationToken,
) -> CompareResult<ContentReport> {
    let mut report = ContentReport::default();

    for relative in paths {
        cancel.check()?;

        let result = diff_file(
            &original_root.join(relative),
            &revised_root.join(relative),
            relative,
            options.blank_lines,
        );

        match result {
            Ok(Some(difference)) => {
                debug!(
                    path = %relative.display(),
                    deltas = difference.deltas.len(),
                    "content differs"
                );
                report.differences.push(difference);
            }
            Ok(None) => {}
            Err(err) if err.is_file_level() && options.on_file_error == FileErrorPolicy::Skip => {
                warn!(path = %relative.display(), error = %err, "skipping file");
                report.skipped.push(SkippedFile {
                    path: relative.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use proptest::prelude::*;

    use crate::model::DeltaKind;

    const ORIGINAL: &str = "line1\nline2\nline3\nline4\nline5\nline6\nmissing\n\n\nline8\nline9\n";
    const REVISED: &str = "line1\nline2\nline25\nline5\nline6\n\n\nline8\nline10\nline9\n";

    #[test]
    fn identical_text_no_diff() {
        assert!(diff_text("a\nb\n", "a\nb\n", BlankLines::Keep).is_none());
    }

    #[test]
    fn change_delete_insert_positions() {
        let deltas = diff_text(ORIGINAL, REVISED, BlankLines::Strip).unwrap();
        assert_eq!(
            deltas,
            vec![
                ContentDelta {
                    kind: DeltaKind::Change,
                    original: Chunk::new(2, ["line3", "line4"]),
                    revised: Chunk::new(2, ["line25"]),
                },
                ContentDelta {
                    kind: DeltaKind::Delete,
                    original: Chunk::new(6, ["missing"]),
                    revised: Chunk::empty(5),
                },
                ContentDelta {
                    kind: DeltaKind::Insert,
                    original: Chunk::empty(10),
                    revised: Chunk::new(8, ["line10"]),
                },
            ]
        );
    }

    #[test]
    fn single_middle_line_change() {
        let deltas = diff_lines(&["a", "b", "c", "d", "e"], &["a", "b", "X", "d", "e"]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind, DeltaKind::Change);
        assert_eq!(deltas[0].original, Chunk::new(2, ["c"]));
        assert_eq!(deltas[0].revised, Chunk::new(2, ["X"]));
    }

    #[test]
    fn empty_to_content_is_insert() {
        let deltas = diff_lines(&[], &["new"]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind, DeltaKind::Insert);
        assert_eq!(deltas[0].original.position, 0);
    }

    #[test]
    fn content_to_empty_is_delete() {
        let deltas = diff_lines(&["old", "older"], &[]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind, DeltaKind::Delete);
        assert_eq!(deltas[0].original, Chunk::new(0, ["old", "older"]));
    }

    #[test]
    fn line_endings_are_normalized() {
        assert!(diff_text("a\r\nb\r\n", "a\nb", BlankLines::Keep).is_none());
    }

    #[test]
    fn blank_only_change_is_dropped_when_stripping() {
        let original = "a\nb\n";
        let revised = "a\n\n  \nb\n";
        assert!(diff_text(original, revised, BlankLines::Strip).is_none());

        let kept = diff_text(original, revised, BlankLines::Keep).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].kind, DeltaKind::Insert);
        assert_eq!(kept[0].revised, Chunk::new(1, ["", "  "]));
    }

    #[test]
    fn emptied_delta_survives_next_to_real_change() {
        let original = "a\nb\nc\nd\n";
        let revised = "a\n\nb\nc\nX\n";
        let deltas = diff_text(original, revised, BlankLines::Strip).unwrap();
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].kind, DeltaKind::Insert);
        assert!(deltas[0].revised.lines.is_empty());
        assert_eq!(deltas[1].kind, DeltaKind::Change);
        assert_eq!(deltas[1].revised.lines, vec!["X".to_string()]);
    }

    #[test]
    fn apply_reproduces_revised() {
        let original = split_lines(ORIGINAL);
        let revised = split_lines(REVISED);
        let deltas = diff_lines(&original, &revised);
        assert_eq!(apply_deltas(&original, &deltas).unwrap(), revised);
    }

    fn deltas_are_ascending(deltas: &[ContentDelta]) -> bool {
        deltas.windows(2).all(|w| {
            let (prev, next) = (&w[0], &w[1]);
            prev.original.position + prev.original.lines.len() < next.original.position
                && prev.revised.position + prev.revised.lines.len() < next.revised.position
        })
    }

    #[test]
    fn repeated_lines_yield_ordered_script() {
        let original = ["", "", "a", "a", "ca", "", "a", ""];
        let revised = ["a", "a", "a", "", "", "", "", "", "", "a", "", "", "", ""];
        let deltas = diff_lines(&original, &revised);

        assert!(deltas_are_ascending(&deltas), "{deltas:#?}");
        assert_eq!(apply_deltas(&original[..], &deltas).unwrap(), revised);
    }

    #[test]
    fn apply_rejects_mismatched_script() {
        let deltas = diff_lines(&["a", "b"], &["a", "c"]);
        let result = apply_deltas(&["a", "z"], &deltas);
        assert!(matches!(result, Err(CompareError::PatchMismatch { position: 1 })));

        let result = apply_deltas(&["a"], &deltas);
        assert!(matches!(result, Err(CompareError::PatchMismatch { .. })));
    }

    #[test]
    fn diff_file_reports_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, ORIGINAL).unwrap();
        fs::write(&b, REVISED).unwrap();

        let diff = diff_file(&a, &b, Path::new("same.txt"), BlankLines::Strip)
            .unwrap()
            .unwrap();
        assert_eq!(diff.path, PathBuf::from("same.txt"));
        assert_eq!(diff.deltas.len(), 3);
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_text(&path), Err(CompareError::Encoding { .. })));
    }

    fn roots() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("original");
        let revised = dir.path().join("revised");
        fs::create_dir_all(&original).unwrap();
        fs::create_dir_all(&revised).unwrap();
        (dir, original, revised)
    }

    #[test]
    fn diff_contents_skips_unreadable_files() {
        let (_dir, original, revised) = roots();
        fs::write(original.join("bad.bin"), [0xffu8, 0x00]).unwrap();
        fs::write(revised.join("bad.bin"), [0xfeu8, 0x00]).unwrap();
        fs::write(original.join("same.txt"), ORIGINAL).unwrap();
        fs::write(revised.join("same.txt"), REVISED).unwrap();
        let paths = vec![PathBuf::from("bad.bin"), PathBuf::from("same.txt")];

        let report = diff_contents(
            &original,
            &revised,
            &paths,
            &CompareOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(report.differences.len(), 1);
        assert_eq!(report.differences[0].path, PathBuf::from("same.txt"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("bad.bin"));
    }

    #[test]
    fn diff_contents_aborts_on_request() {
        let (_dir, original, revised) = roots();
        fs::write(original.join("a.txt"), "a\n").unwrap();
        // Missing on the revised side: the read fails.
        let paths = vec![PathBuf::from("a.txt")];
        let options = CompareOptions::default().with_file_error_policy(FileErrorPolicy::Abort);

        let result =
            diff_contents(&original, &revised, &paths, &options, &CancellationToken::new());
        assert!(matches!(result, Err(CompareError::FileRead { .. })));
    }

    #[test]
    fn diff_contents_honors_cancellation() {
        let (_dir, original, revised) = roots();
        let token = CancellationToken::new();
        token.cancel();
        let paths = vec![PathBuf::from("a.txt")];

        let result =
            diff_contents(&original, &revised, &paths, &CompareOptions::default(), &token);
        assert!(matches!(result, Err(CompareError::Cancelled)));
    }

    proptest! {
        #[test]
        fn edit_script_round_trips(
            original in prop::collection::vec("[abc]{0,2}", 0..24),
            revised in prop::collection::vec("[abc]{0,2}", 0..24),
        ) {
            let a: Vec<&str> = original.iter().map(String::as_str).collect();
            let b: Vec<&str> = revised.iter().map(String::as_str).collect();
            let deltas = diff_lines(&a, &b);

            prop_assert_eq!(apply_deltas(&a, &deltas).unwrap(), revised.clone());
            prop_assert!(deltas_are_ascending(&deltas));
        }
    }
}
