//! Dataset-composition fairness metrics.
//!
//! Group A is conventionally male and group B female. Positive values of the
//! imbalance metrics mean group A is over-represented.

use crate::common::ratio::safe_ratio;
use crate::evaluation::domain::{MetricCode, MetricResult};

use super::domain::{CompositionCounts, GroupLabelCounts};

/// (count_A - count_B) / (count_A + count_B).
pub fn class_imbalance(a: &GroupLabelCounts, b: &GroupLabelCounts) -> f64 {
    safe_ratio(i128::from(a.count) - i128::from(b.count), a.count + b.count)
}

/// Share of all labelled examples with a given label that fall in one group.
pub fn label_percentage(group_label: u64, overall_label: u64) -> f64 {
    safe_ratio(group_label, overall_label)
}

/// (A_label / count_A) - (B_label / count_B); each term is zero for an empty group.
pub fn label_imbalance(a_label: u64, a_count: u64, b_label: u64, b_count: u64) -> f64 {
    safe_ratio(a_label, a_count) - safe_ratio(b_label, b_count)
}

/// Share of all negatives held by `group` minus its share of all positives.
pub fn conditional_demographic_disparity(
    group: &GroupLabelCounts,
    a: &GroupLabelCounts,
    b: &GroupLabelCounts,
) -> f64 {
    safe_ratio(group.negative, a.negative + b.negative)
        - safe_ratio(group.positive, a.positive + b.positive)
}

/// All composition metrics, keyed by their published code.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompositionMetrics {
    pub ci: f64,
    pub fplp: f64,
    pub fnlp: f64,
    pub pli: f64,
    pub nli: f64,
    pub fcdd: f64,
    pub mcdd: f64,
}

impl CompositionMetrics {
    pub fn from_counts(c: &CompositionCounts) -> Self {
        let (male, female) = (&c.group_a, &c.group_b);
        Self {
            ci: class_imbalance(male, female),
            fplp: label_percentage(female.positive, c.overall_positive),
            fnlp: label_percentage(female.negative, c.overall_negative),
            pli: label_imbalance(male.positive, male.count, female.positive, female.count),
            nli: label_imbalance(male.negative, male.count, female.negative, female.count),
            fcdd: conditional_demographic_disparity(female, male, female),
            mcdd: conditional_demographic_disparity(male, male, female),
        }
    }

    pub fn entries(&self) -> [(MetricCode, f64); 7] {
        [
            (MetricCode::Ci, self.ci),
            (MetricCode::Fplp, self.fplp),
            (MetricCode::Fnlp, self.fnlp),
            (MetricCode::Pli, self.pli),
            (MetricCode::Nli, self.nli),
            (MetricCode::Fcdd, self.fcdd),
            (MetricCode::Mcdd, self.mcdd),
        ]
    }

    pub fn results(&self) -> Vec<MetricResult> {
        self.entries()
            .into_iter()
            .map(|(code, value)| MetricResult::overall(code, value))
            .collect()
    }
}
