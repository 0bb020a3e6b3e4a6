//! Command-line surface.
//!
//! Parsing stays here; everything below [`Cli::run_config`] works from a
//! [`RunConfig`] only.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use crate::assessment::domain::Provenance;
use crate::common::config::{AppCfg, RunConfig};
use crate::common::error::{BenchError, BenchResult};
use crate::data::domain::{Delimiter, Workflow};

use super::pipeline::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "fairbench", author, version, about = "Fairness benchmarking for AFib predictions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a submission against its workflow schema
    Validate(SubmissionArgs),
    /// Compute fairness metrics and write assessment records
    Assess(AssessArgs),
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SubmissionArgs {
    /// Submission table
    #[arg(short, long)]
    pub input: PathBuf,

    /// Benchmarking community the run belongs to
    #[arg(long = "community", visible_alias = "com", alias = "community-name")]
    pub community: String,

    /// Challenges the submission takes part in
    #[arg(short, long = "challenges", num_args = 1.., required = true)]
    pub challenges: Vec<String>,

    /// Participant (tool) name
    #[arg(short, long, alias = "participant-name")]
    pub participant: String,

    /// Where the JSON output is written
    #[arg(short, long)]
    pub output: PathBuf,

    /// model-output, model-output-tsv or training-dataset
    #[arg(short, long, default_value = "model-output")]
    pub workflow: Workflow,

    /// Override the workflow's delimiter (comma or tab)
    #[arg(long)]
    pub delimiter: Option<Delimiter>,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub submission: SubmissionArgs,

    /// Gold-standard table for model-output workflows
    #[arg(short = 'm', long = "metrics-ref")]
    pub reference: Option<PathBuf>,

    /// Fail when more than this many ids go unmatched
    #[arg(long)]
    pub max_unmatched: Option<usize>,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Validate(_) => "validate",
            Command::Assess(_) => "assess",
        }
    }
}

impl Cli {
    /// Log level after applying `--verbose` over the environment default.
    pub fn log_level(&self, app: &AppCfg) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            app.log_level
        }
    }

    /// Resolve flags and environment defaults into a run configuration.
    pub fn run_config(&self, app: &AppCfg) -> BenchResult<RunConfig> {
        let (args, reference, max_unmatched) = match &self.command {
            Command::Validate(args) => (args, None, None),
            Command::Assess(a) => (&a.submission, a.reference.clone(), a.max_unmatched),
        };

        let provenance = Provenance {
            community: non_empty("community", &args.community)?,
            challenges: args
                .challenges
                .iter()
                .map(|c| non_empty("challenges", c))
                .collect::<BenchResult<Vec<_>>>()?,
            participant: non_empty("participant", &args.participant)?,
        };

        if let Command::Assess(_) = self.command {
            if args.workflow.needs_reference() && reference.is_none() {
                return Err(BenchError::usage(format!(
                    "workflow {} needs --metrics-ref",
                    args.workflow
                )));
            }
        }

        Ok(RunConfig {
            workflow: args.workflow,
            input: args.input.clone(),
            reference,
            output: args.output.clone(),
            provenance,
            delimiter: args.delimiter,
            max_unmatched: max_unmatched.or(app.max_unmatched),
        })
    }

    /// Dispatch the parsed command against the local filesystem.
    pub fn execute(&self, app: &AppCfg) -> BenchResult<RunSummary> {
        let cfg = self.run_config(app)?;
        log::debug!("{} with {:?}", self.command.name(), cfg);
        match self.command {
            Command::Validate(_) => pipeline::run_validate(&cfg),
            Command::Assess(_) => pipeline::run_assess(&cfg),
        }
    }
}

fn non_empty(flag: &str, value: &str) -> BenchResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BenchError::usage(format!("--{flag} must not be empty")));
    }
    Ok(trimmed.to_string())
}
