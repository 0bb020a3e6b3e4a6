//! Outer surface: the command line and the pipeline it drives.

pub mod cli;
pub mod pipeline;

pub use pipeline::{run_assess, run_validate, RunSummary};
