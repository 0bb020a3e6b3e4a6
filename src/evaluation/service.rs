//! Evaluation service: join, tally and score one model-output submission.

use std::time::Instant;

use crate::common::error::BenchResult;
use crate::common::time;
use crate::data::domain::{ReferenceRow, SubmissionRow};

use super::confusion::{self, PartitionedCounts};
use super::domain::MetricResult;
use super::join::{self, DropPolicy};
use super::metrics;

/// How many rows made it through the join.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct JoinStats {
    pub joined: usize,
    pub submission_only: usize,
    pub reference_only: usize,
    pub unlabeled: usize,
}

/// Everything computed for one submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelOutputReport {
    pub join: JoinStats,
    pub counts: PartitionedCounts<String>,
    pub metrics: Vec<MetricResult>,
}

/// Score `submission` against `reference`.
pub fn evaluate(
    submission: &[SubmissionRow],
    reference: &[ReferenceRow],
    policy: DropPolicy,
) -> BenchResult<ModelOutputReport> {
    let start = Instant::now();

    let outcome = join::inner_join(submission, reference);
    policy.check(&outcome)?;
    let stats = JoinStats {
        joined: outcome.records.len(),
        submission_only: outcome.submission_only,
        reference_only: outcome.reference_only,
        unlabeled: outcome.unlabeled,
    };

    let counts = confusion::by_group(&outcome.records)?;
    let o = counts.overall;
    log::info!(
        "joined {} records: TP={} TN={} FP={} FN={} across {} groups",
        stats.joined,
        o.tp,
        o.tn,
        o.fp,
        o.fn_,
        counts.groups.len()
    );

    let metrics = metrics::performance_results(&counts);
    log::debug!(
        "computed {} metrics (dur_ms={})",
        metrics.len(),
        time::elapsed_ms(start)
    );

    Ok(ModelOutputReport {
        join: stats,
        counts,
        metrics,
    })
}
