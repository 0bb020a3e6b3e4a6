//! Classification-performance metrics over confusion counts.
//!
//! Every ratio goes through [`safe_ratio`], so an empty denominator yields
//! `0.0` rather than `NaN`.

use crate::common::ratio::safe_ratio;

use super::confusion::{ConfusionCounts, PartitionedCounts};
use super::domain::{MetricCode, MetricResult};

/// (TP+TN) / total.
pub fn overall_accuracy(c: &ConfusionCounts) -> f64 {
    safe_ratio(c.tp + c.tn, c.total())
}

/// (TP+FP) / total.
pub fn statistical_parity(c: &ConfusionCounts) -> f64 {
    safe_ratio(c.tp + c.fp, c.total())
}

/// TP / (TP+FN).
pub fn equal_opportunity(c: &ConfusionCounts) -> f64 {
    safe_ratio(c.tp, c.tp + c.fn_)
}

/// FP / (FP+TN).
pub fn predictive_equality(c: &ConfusionCounts) -> f64 {
    safe_ratio(c.fp, c.fp + c.tn)
}

/// FN / (FN+TP).
pub fn false_negative_rate(c: &ConfusionCounts) -> f64 {
    safe_ratio(c.fn_, c.fn_ + c.tp)
}

/// The five performance metrics for one population.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PerformanceMetrics {
    pub oa: f64,
    pub sp: f64,
    pub eo: f64,
    pub pe: f64,
    pub fnr: f64,
}

impl PerformanceMetrics {
    pub fn from_counts(c: &ConfusionCounts) -> Self {
        Self {
            oa: overall_accuracy(c),
            sp: statistical_parity(c),
            eo: equal_opportunity(c),
            pe: predictive_equality(c),
            fnr: false_negative_rate(c),
        }
    }

    /// Values in publication order.
    pub fn entries(&self) -> [(MetricCode, f64); 5] {
        [
            (MetricCode::Oa, self.oa),
            (MetricCode::Sp, self.sp),
            (MetricCode::Eo, self.eo),
            (MetricCode::Pe, self.pe),
            (MetricCode::Fnr, self.fnr),
        ]
    }
}

/// Overall metrics first, then each group in key order.
pub fn performance_results(counts: &PartitionedCounts<String>) -> Vec<MetricResult> {
    let mut out: Vec<MetricResult> = PerformanceMetrics::from_counts(&counts.overall)
        .entries()
        .into_iter()
        .map(|(code, value)| MetricResult::overall(code, value))
        .collect();

    for (group, c) in &counts.groups {
        out.extend(
            PerformanceMetrics::from_counts(c)
                .entries()
                .into_iter()
                .map(|(code, value)| MetricResult::for_group(code, value, group.as_str())),
        );
    }
    out
}
