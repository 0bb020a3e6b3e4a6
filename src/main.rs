// main.rs - fairbench command-line entry point
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use fairbench::api::cli::Cli;
use fairbench::api::RunSummary;
use fairbench::common::config::AppCfg;
use fairbench::common::log as logging;
use fairbench::{BenchCode, BenchError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let app = AppCfg::load();
    logging::init(cli.log_level(&app));

    match run(&cli, &app) {
        Ok(summary) => {
            log::info!(
                "{} done: {} records in {}",
                cli.command.name(),
                summary.records,
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(failure_code(&err).exit_status())
        }
    }
}

fn run(cli: &Cli, app: &AppCfg) -> Result<RunSummary> {
    cli.execute(app)
        .with_context(|| format!("{} failed", cli.command.name()))
}

/// Code of the innermost [`BenchError`], or `Internal` for anything else.
fn failure_code(err: &anyhow::Error) -> BenchCode {
    err.downcast_ref::<BenchError>()
        .map(BenchError::code)
        .unwrap_or(BenchCode::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairbench::data::{SchemaError, Violation};

    #[test]
    fn schema_failure_exits_with_five() {
        let schema = SchemaError {
            table: "submission".into(),
            violations: vec![Violation::MissingColumn {
                column: "ID".into(),
            }],
        };
        let err = Err::<(), _>(BenchError::from(schema))
            .context("assess failed")
            .unwrap_err();
        assert_eq!(failure_code(&err), BenchCode::Schema);
        assert_eq!(failure_code(&err).exit_status(), 5);
        assert!(format!("{err:#}").starts_with("assess failed: "));
    }

    #[test]
    fn join_and_usage_codes_survive_context() {
        let join = anyhow::Error::new(BenchError::TooManyUnmatched {
            dropped: 2,
            allowed: 0,
        })
        .context("assess failed");
        assert_eq!(failure_code(&join).exit_status(), 6);

        let usage = anyhow::Error::new(BenchError::usage("empty participant"));
        assert_eq!(failure_code(&usage).exit_status(), 2);
    }

    #[test]
    fn foreign_errors_are_internal() {
        let err = anyhow::anyhow!("unexpected");
        assert_eq!(failure_code(&err), BenchCode::Internal);
        assert_eq!(failure_code(&err).exit_status(), 70);
    }
}
