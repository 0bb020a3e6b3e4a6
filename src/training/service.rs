//! Service layer scoring the composition of a training dataset.

use crate::data::domain::TrainingRow;
use crate::evaluation::domain::MetricResult;

use super::domain::CompositionCounts;
use super::metrics::CompositionMetrics;

#[derive(Clone, Debug, PartialEq)]
pub struct CompositionReport {
    pub counts: CompositionCounts,
    pub metrics: Vec<MetricResult>,
}

/// Tally rows by sex and compute the composition metrics.
pub fn assess(rows: &[TrainingRow]) -> CompositionReport {
    let counts = CompositionCounts::by_sex(rows);
    log::info!(
        "training set: {} male, {} female, {} positive, {} negative of {} rows",
        counts.group_a.count,
        counts.group_b.count,
        counts.overall_positive,
        counts.overall_negative,
        rows.len()
    );
    let metrics = CompositionMetrics::from_counts(&counts).results();
    CompositionReport { counts, metrics }
}
