//! CLI argument parsing for pagesmith.
//!
//! This module defines the command-line interface with `clap`: one
//! subcommand per operation plus the options every operation shares. It only
//! depends on `clap` so the build script can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Merge, split, compress and prune PDF documents.
///
/// pagesmith writes its outputs under fixed names into the output directory:
/// merged.pdf, page_<n>.pdf, compressed.pdf and pages_deleted.pdf.
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(version)]
#[command(about = "Merge, split, compress and prune PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every operation
    #[command(flatten)]
    pub common: CommonArgs,
}

/// The four page-set operations.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge files into merged.pdf, in the given order
    ///
    /// Examples:
    ///   pagesmith merge a.pdf b.pdf
    ///   pagesmith merge chapter*.pdf --swap 1:3
    Merge {
        /// Files or glob patterns to merge
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Swap two list positions before merging (1-based, repeatable)
        ///
        /// Each swap is replayed as a drag from A dropped onto B.
        #[arg(long, value_name = "A:B", value_parser = parse_swap)]
        swap: Vec<(usize, usize)>,
    },

    /// Split a file into page_1.pdf, page_2.pdf, ...
    Split {
        /// File to split
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Rewrite a file with compressed streams into compressed.pdf
    Compress {
        /// File to compress
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Drop pages from a file and write the rest to pages_deleted.pdf
    ///
    /// Every page starts out kept. Toggle pages with --toggle, or review
    /// them with --interactive.
    Delete {
        /// File to prune
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Toggle page N between kept and discarded (1-based, repeatable)
        #[arg(short, long, value_name = "N")]
        toggle: Vec<usize>,

        /// Review the pages in an interactive prompt before writing
        #[arg(short, long)]
        interactive: bool,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory the outputs are written to
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Dry run - decode inputs and show the planned outputs without writing
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show statistics and debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Overwrite existing outputs without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing outputs
    #[arg(long, conflicts_with = "force", global = true)]
    pub no_clobber: bool,

    /// Compression level for merge, split and delete outputs
    ///
    /// - none: streams are written as they are
    /// - standard: flate-compress streams (default)
    /// - maximum: also drop unused objects and use object streams
    #[arg(short, long, value_name = "LEVEL", default_value = "standard", global = true)]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Scale of the page previews in interactive review
    #[arg(long, value_name = "F", default_value_t = 1.2, global = true)]
    pub scale: f32,

    /// Print the operation report (or dry-run plan) as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Parse `A:B` into a pair of one-based positions.
pub fn parse_swap(value: &str) -> Result<(usize, usize), String> {
    let (from, to) = value
        .split_once(':')
        .ok_or_else(|| format!("expected A:B, got {value}"))?;

    let parse = |part: &str| -> Result<usize, String> {
        match part.trim().parse::<usize>() {
            Ok(0) => Err("positions start at 1".to_string()),
            Ok(n) => Ok(n),
            Err(_) => Err(format!("invalid position: {part}")),
        }
    };

    Ok((parse(from)?, parse(to)?))
}
