//! pagesmith - Merge, split, compress and prune PDF documents.
//!
//! Command-line front end over the pagesmith library: each subcommand fills a
//! session, optionally replays gestures, and runs one operation into the
//! output directory.

mod cli;
mod logging;
mod review;
mod settings;

use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::{Cli, Command};
use pagesmith::codec::LopdfCodec;
use pagesmith::compose::Operation;
use pagesmith::config::{Config, OverwriteMode};
use pagesmith::error::{PageSmithError, Result};
use pagesmith::io::{DirectorySink, SourceReader};
use pagesmith::output::{OutputFormatter, display_plan, display_report};
use pagesmith::render::{GeometryRasterizer, ReviewGrid};
use pagesmith::session::DragEvent;
use pagesmith::utils::collect_paths_for_patterns;
use pagesmith::{Session, SourceFile};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.common.verbose, cli.common.quiet);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pagesmith::NAME, pagesmith::VERSION));
        formatter.blank_line();
    }

    let mut session = Session::with_config(LopdfCodec::new(), &config);
    let reader = SourceReader::new();

    let operation = match cli.command {
        Command::Merge { inputs, swap } => {
            let paths = collect_paths_for_patterns(&inputs)?;
            formatter.info(&format!("Reading {} file(s)...", paths.len()));
            session.select_merge_files(reader.read_all(&paths).await?);

            for (from, to) in swap {
                apply_swap(&mut session, from, to)?;
            }
            formatter.debug(&format!(
                "Merge order: {}",
                session.merge_files().names().join(", ")
            ));
            Operation::Merge
        }
        Command::Split { input } => {
            session.select_split_file(reader.read(&input).await?);
            Operation::Split
        }
        Command::Compress { input } => {
            session.select_compress_file(reader.read(&input).await?);
            Operation::Compress
        }
        Command::Delete {
            input,
            toggle,
            interactive,
        } => {
            let file = reader.read(&input).await?;
            prepare_delete(&mut session, file, &toggle, interactive, &config, &formatter).await?;
            Operation::Delete
        }
    };

    if config.dry_run {
        let plan = session.plan(operation).await?;
        if config.json {
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|e| PageSmithError::other(format!("Failed to serialize plan: {e}")))?;
            println!("{json}");
        } else {
            display_plan(&formatter, &plan);
            formatter.blank_line();
            formatter.success("Dry run completed successfully");
            formatter.info("  Run without --dry-run to write the outputs");
        }
        return Ok(());
    }

    formatter.info(&format!(
        "Running {operation}, writing to {}",
        config.output_dir.display()
    ));

    let mut sink = create_sink(&config, &formatter);
    let report = match operation {
        Operation::Merge => session.merge(&mut sink).await?,
        Operation::Split => session.split(&mut sink).await?,
        Operation::Compress => session.compress(&mut sink).await?,
        Operation::Delete => session.commit_delete(&mut sink).await?,
    };

    if config.json {
        println!("{}", report.to_json()?);
    } else {
        display_report(&formatter, &report);
    }

    Ok(())
}

/// Replay a one-based `from:to` swap as a drag on the merge list.
fn apply_swap(session: &mut Session<LopdfCodec>, from: usize, to: usize) -> Result<()> {
    let (from, to) = (from.saturating_sub(1), to.saturating_sub(1));
    session.drag(DragEvent::Start { index: from })?;
    session.drag(DragEvent::Over { index: to })?;
    session.drag(DragEvent::Drop { index: to })?;
    Ok(())
}

/// Load the file to prune and apply the requested toggles.
async fn prepare_delete(
    session: &mut Session<LopdfCodec>,
    file: SourceFile,
    toggles: &[usize],
    interactive: bool,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let source = file.clone();
    let loaded = session.load_review(file).await?;
    formatter.info(&format!(
        "{} has {} page(s)",
        loaded.source().name(),
        loaded.selection().len()
    ));

    for &number in toggles {
        let mark = session.toggle_page(number.saturating_sub(1))?;
        formatter.debug(&format!("Page {number} {mark:?}"));
    }

    if interactive {
        let grid =
            ReviewGrid::build(&GeometryRasterizer::new(), &source, config.preview_scale).await?;
        review::run(
            session,
            &grid,
            formatter,
            config.swipe_threshold * 2.0,
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
        .await?;
    }

    Ok(())
}

/// Build the output sink, asking on stdin before overwriting in prompt mode.
///
/// Quiet output cannot prompt, so it refuses to overwrite instead.
fn create_sink(config: &Config, formatter: &OutputFormatter) -> DirectorySink {
    let sink = DirectorySink::new(&config.output_dir, config.overwrite_mode);

    if config.overwrite_mode == OverwriteMode::Prompt && !formatter.is_quiet() {
        let formatter = formatter.clone();
        sink.with_confirm(Box::new(move |path: &Path| confirm_overwrite(&formatter, path)))
    } else {
        sink
    }
}

/// Ask whether `path` may be overwritten.
fn confirm_overwrite(formatter: &OutputFormatter, path: &Path) -> Result<bool> {
    formatter.warning(&format!("Output file already exists: {}", path.display()));

    print!("Overwrite? [y/N]: ");
    std::io::stdout().flush().ok();

    let mut response = String::new();
    std::io::stdin()
        .read_line(&mut response)
        .map_err(|err| PageSmithError::other(format!("Failed to read input: {err}")))?;

    Ok(is_yes(&response))
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
