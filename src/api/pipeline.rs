//! End-to-end runs: load, validate, score and publish.
//!
//! The pipeline only sees a [`RunConfig`]; it never touches process arguments
//! or the environment. Table access and artefact output go through the
//! [`TableSource`] and [`ArtifactSink`] seams so tests can swap them out.

use std::path::PathBuf;
use std::time::Instant;

use crate::assessment::domain::{ArtifactSink, AssessmentRecord};
use crate::assessment::repo_fs::FsArtifactRepo;
use crate::assessment::service as assessment;
use crate::common::config::RunConfig;
use crate::common::error::{BenchError, BenchResult};
use crate::common::time;
use crate::data::domain::TableSource;
use crate::data::repo_fs::FsTableRepo;
use crate::data::service as data;
use crate::evaluation::domain::MetricResult;
use crate::evaluation::join::DropPolicy;
use crate::evaluation::service as evaluation;
use crate::training::service as training;

/// What a finished run produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub output: PathBuf,
}

/// Validate the submission and publish a participant record.
pub fn validate(
    cfg: &RunConfig,
    source: &dyn TableSource,
    sink: &dyn ArtifactSink,
) -> BenchResult<RunSummary> {
    let start = Instant::now();
    let rows = data::check_submission(source, &cfg.input, cfg.workflow, cfg.delimiter())?;
    let record = assessment::participant_record(&cfg.provenance, true);
    assessment::publish(sink, &cfg.output, std::slice::from_ref(&record))?;
    log::info!(
        "{} submission {} passed validation (rows={}, dur_ms={})",
        cfg.workflow,
        cfg.input.display(),
        rows,
        time::elapsed_ms(start)
    );
    Ok(RunSummary {
        records: 1,
        output: cfg.output.clone(),
    })
}

/// Compute every metric the workflow defines.
pub fn compute_metrics(cfg: &RunConfig, source: &dyn TableSource) -> BenchResult<Vec<MetricResult>> {
    let delimiter = cfg.delimiter();

    if !cfg.workflow.needs_reference() {
        let rows = data::load_training(source, &cfg.input, cfg.workflow, delimiter)?;
        return Ok(training::assess(&rows).metrics);
    }

    let reference_path = cfg.reference.as_ref().ok_or_else(|| {
        BenchError::usage(format!(
            "workflow {} needs a reference table (--metrics-ref)",
            cfg.workflow
        ))
    })?;
    let submission = data::load_submission(source, &cfg.input, cfg.workflow, delimiter)?;
    let reference = data::load_reference(source, reference_path, cfg.workflow, delimiter)?;
    let policy = DropPolicy {
        max_unmatched: cfg.max_unmatched,
    };
    Ok(evaluation::evaluate(&submission, &reference, policy)?.metrics)
}

/// Compute metrics and package them as assessment records.
pub fn assessment_records(
    cfg: &RunConfig,
    source: &dyn TableSource,
) -> BenchResult<Vec<AssessmentRecord>> {
    let metrics = compute_metrics(cfg, source)?;
    Ok(assessment::build_assessments(&cfg.provenance, &metrics))
}

/// Full assessment run: records are published only once all are built.
pub fn assess(
    cfg: &RunConfig,
    source: &dyn TableSource,
    sink: &dyn ArtifactSink,
) -> BenchResult<RunSummary> {
    let start = Instant::now();
    let records = assessment_records(cfg, source)?;
    assessment::publish(sink, &cfg.output, &records)?;
    log::info!(
        "{} assessment for {} finished (dur_ms={})",
        cfg.workflow,
        cfg.provenance.participant,
        time::elapsed_ms(start)
    );
    Ok(RunSummary {
        records: records.len(),
        output: cfg.output.clone(),
    })
}

/// [`validate`] against the local filesystem.
pub fn run_validate(cfg: &RunConfig) -> BenchResult<RunSummary> {
    validate(cfg, &FsTableRepo::new(), &FsArtifactRepo::new())
}

/// [`assess`] against the local filesystem.
pub fn run_assess(cfg: &RunConfig) -> BenchResult<RunSummary> {
    assess(cfg, &FsTableRepo::new(), &FsArtifactRepo::new())
}
