use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dircmp",
    about = "Compare two directory trees and report every difference",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare an original tree against a revised tree
    Compare(CompareArgs),
    /// List every entry under a directory as the comparison sees it
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// The original (expected) directory
    pub original: PathBuf,
    /// The revised (actual) directory
    pub revised: PathBuf,
    /// Report blank lines inside changed regions
    #[arg(long)]
    pub keep_blank_lines: bool,
    /// Stop at the first unreadable or non-UTF-8 file
    #[arg(long)]
    pub fail_fast: bool,
    /// Do not follow symbolic links while walking
    #[arg(long)]
    pub no_follow_links: bool,
    /// Indent unit for the text report
    #[arg(long)]
    pub indent: Option<String>,
}

#[derive(Args)]
pub struct SnapshotArgs {
    pub root: PathBuf,
    #[arg(long)]
    pub no_follow_links: bool,
}
