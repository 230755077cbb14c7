//! Composition of output documents.
//!
//! - [`plan`]: operations, output file names and resolved plans
//! - [`reducer`]: the [`Composer`] that turns session state into outputs
//! - [`report`]: what an operation produced

pub mod plan;
pub mod reducer;
pub mod report;

pub use plan::{CompositionPlan, Operation, PageSource, PlannedOutput};
pub use reducer::Composer;
pub use report::{OperationReport, OutputSummary};
