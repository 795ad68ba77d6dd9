//! CLI argument parsing for doccat.
//!
//! This module only declares the command-line interface; it is also compiled
//! by the build script to render the man page, so it depends on nothing but
//! `clap`.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Concatenate PDF or Markdown files into a single document.
///
/// Files are collected from a directory (recursively, in path order) or
/// taken from an explicit list, in the order given.
#[derive(Parser, Debug)]
#[command(name = "doccat")]
#[command(version)]
#[command(about = "Concatenate PDF or Markdown files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge PDF files into a single PDF
    Merge(MergePdfArgs),

    /// Merge Markdown files into a single Markdown file
    MergeMd(MergeMdArgs),

    /// Start the HTTP API server
    Serve(ServeArgs),
}

/// Input selection and verbosity, shared by the merge commands.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory to search for input files (recursively)
    ///
    /// Files are merged in lexicographic order of their full path.
    /// Ignored when --files is given.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Files to merge, in the order given (comma-separated)
    ///
    /// Entries containing '*', '?' or '[' are expanded as glob patterns.
    ///
    /// Examples:
    ///   doccat merge -f cover.pdf,body.pdf -o book.pdf
    ///   doccat merge-md -f 'notes/*.md' -o notes.md
    #[arg(short, long, value_name = "FILES", value_delimiter = ',')]
    pub files: Vec<String>,

    /// Show the merge order, skipped files and statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MergePdfArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = "merged.pdf")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct MergeMdArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output Markdown file path
    #[arg(short, long, value_name = "FILE", default_value = "merged.md")]
    pub output: PathBuf,

    /// Introduce each file with a '# <file name>' heading
    ///
    /// Files are separated by a horizontal rule when enabled and by a blank
    /// line otherwise.
    #[arg(
        short = 't',
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub add_titles: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "DOCCAT_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "DOCCAT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Allowed CORS origin (repeatable); all origins are allowed when unset
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,

    /// Directory temporary workspaces are created in
    ///
    /// Defaults to the system temp directory.
    #[arg(long, value_name = "DIR", env = "DOCCAT_WORKSPACE_ROOT")]
    pub workspace_root: Option<PathBuf>,
}
