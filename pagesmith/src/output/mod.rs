//! User-facing output for pagesmith.
//!
//! This module renders results for people:
//! - Formatted status messages honoring quiet and verbose modes
//! - Dry-run plans
//! - Operation reports
//! - The page table of a review grid
//!
//! # Examples
//!
//! ```no_run
//! use pagesmith::config::Config;
//! use pagesmith::output::OutputFormatter;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Splitting report.pdf");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::compose::{CompositionPlan, OperationReport, PageSource};
use crate::render::ThumbnailRow;
use crate::session::PageMark;
use crate::utils::format_file_size;

/// Display what an operation would produce.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `plan` - Resolved plan to display
pub fn display_plan(formatter: &OutputFormatter, plan: &CompositionPlan) {
    formatter.section(&format!(
        "Dry run: {} would write {} file(s), {} page(s)",
        plan.operation,
        plan.outputs.len(),
        plan.total_pages()
    ));

    for (number, output) in plan.outputs.iter().enumerate() {
        formatter.list_item(
            number + 1,
            &format!("{} <- {}", output.filename, describe_pages(&output.pages)),
        );
    }
}

/// Collapse consecutive pages of the same source into ranges.
fn describe_pages(pages: &[PageSource]) -> String {
    let mut runs: Vec<(&str, usize, usize)> = Vec::new();
    for page in pages {
        match runs.last_mut() {
            Some((source, _, end)) if *source == page.source && *end + 1 == page.page => {
                *end = page.page;
            }
            _ => runs.push((page.source.as_str(), page.page, page.page)),
        }
    }

    runs.iter()
        .map(|(source, start, end)| {
            if start == end {
                format!("{source} p{start}")
            } else {
                format!("{source} p{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display the outcome of an operation.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `report` - Report returned by the operation
pub fn display_report(formatter: &OutputFormatter, report: &OperationReport) {
    for output in &report.outputs {
        formatter.success(&format!(
            "Wrote {} ({} page(s), {})",
            output.filename,
            output.page_count,
            format_file_size(output.size)
        ));
    }

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Operation", report.operation.as_str());
        formatter.detail("Outputs", &report.outputs.len().to_string());
        formatter.detail("Total pages", &report.total_pages().to_string());
        formatter.detail("Input size", &format_file_size(report.input_size));
        formatter.detail("Output size", &format_file_size(report.output_size()));
        formatter.detail(
            "Elapsed",
            &format!("{:.2}s", report.elapsed.as_secs_f64()),
        );
    }
}

/// Display the pages of a review grid with their marks.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `rows` - One row per page, in page order
pub fn display_grid(formatter: &OutputFormatter, rows: &[ThumbnailRow]) {
    for row in rows {
        let mark = match row.mark {
            PageMark::Kept => "keep",
            PageMark::Discarded => "discard",
        };
        formatter.list_item(
            row.number,
            &format!("[{mark:^7}] {}x{} px", row.width, row.height),
        );
    }

    let discarded = rows
        .iter()
        .filter(|row| row.mark == PageMark::Discarded)
        .count();
    formatter.info(&format!(
        "{} of {} page(s) kept",
        rows.len() - discarded,
        rows.len()
    ));
}
