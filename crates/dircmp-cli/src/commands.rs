use anyhow::Context;
use colored::Colorize;
use dircmp_core::{
    BlankLines, CancellationToken, Comparator, CompareOptions, EntryKind, FileErrorPolicy,
    TreeSnapshot,
};
use dircmp_report::{PrettyPrinter, ReportStyle};

use crate::cli::*;

/// Exit status for a command that could not run, as with diff(1).
pub const EXIT_TROUBLE: u8 = 2;

/// Result of a command that ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Identical,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Identical => 0,
            Outcome::Different => 1,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Command::Compare(args) => {
            let identical = cmd_compare(args, &cli.format)?;
            Ok(if identical {
                Outcome::Identical
            } else {
                Outcome::Different
            })
        }
        Command::Snapshot(args) => {
            cmd_snapshot(args, &cli.format)?;
            Ok(Outcome::Identical)
        }
    }
}

fn compare_options(args: &CompareArgs) -> CompareOptions {
    let blank_lines = if args.keep_blank_lines {
        BlankLines::Keep
    } else {
        BlankLines::Strip
    };
    let policy = if args.fail_fast {
        FileErrorPolicy::Abort
    } else {
        FileErrorPolicy::Skip
    };
    CompareOptions::default()
        .with_blank_lines(blank_lines)
        .with_file_error_policy(policy)
        .with_follow_links(!args.no_follow_links)
}

fn report_style(args: &CompareArgs) -> ReportStyle {
    match &args.indent {
        Some(indent) => ReportStyle::new(indent.as_str(), "\n"),
        None => ReportStyle::default(),
    }
}

/// Returns `true` when the trees are identical.
fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<bool> {
    let comparison = Comparator::new(compare_options(&args))
        .compare(&args.original, &args.revised)
        .with_context(|| {
            format!(
                "comparing {} with {}",
                args.original.display(),
                args.revised.display()
            )
        })?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        OutputFormat::Text => {
            if comparison.is_empty() {
                println!("{} Directories are identical.", "✓".green().bold());
            } else {
                let printer = PrettyPrinter::new(report_style(&args));
                print!("{}", printer.print(&comparison.differences));
                println!();
                println!(
                    "{} {} differences",
                    "✗".red().bold(),
                    comparison.len().to_string().bold()
                );
            }
            for skipped in &comparison.skipped {
                eprintln!(
                    "  {} {}: {}",
                    "skipped:".yellow(),
                    skipped.path.display(),
                    skipped.reason
                );
            }
        }
    }

    Ok(comparison.is_empty())
}

fn cmd_snapshot(args: SnapshotArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let options = CompareOptions::default().with_follow_links(!args.no_follow_links);
    let snapshot = TreeSnapshot::capture(&args.root, &options, &CancellationToken::new())
        .with_context(|| format!("reading {}", args.root.display()))?;

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = snapshot
                .iter()
                .map(|(path, kind)| serde_json::json!({ "path": path, "kind": kind }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for (path, kind) in snapshot.iter() {
                let label = match kind {
                    EntryKind::Directory => kind.as_str().blue(),
                    EntryKind::File => kind.as_str().normal(),
                    EntryKind::Other => kind.as_str().yellow(),
                };
                println!("{label:<9} {}", path.display());
            }
            println!("{} entries", snapshot.len().to_string().bold());
        }
    }

    Ok(())
}
