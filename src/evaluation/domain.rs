//! Domain primitives for evaluation: joined records and metric results.

use std::fmt;

use crate::data::domain::Label;

/// A prediction paired with its gold-standard outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinedRecord {
    pub id: String,
    pub predicted: Label,
    pub truth: Label,
    pub group: Option<String>,
}

/// Every metric the engine can emit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum MetricCode {
    /// Overall accuracy.
    Oa,
    /// Statistical parity.
    Sp,
    /// Equal opportunity.
    Eo,
    /// Predictive equality.
    Pe,
    /// False negative rate.
    Fnr,
    /// Class imbalance.
    Ci,
    /// Female positive label percentage.
    Fplp,
    /// Female negative label percentage.
    Fnlp,
    /// Positive label imbalance.
    Pli,
    /// Negative label imbalance.
    Nli,
    /// Female conditional demographic disparity.
    Fcdd,
    /// Male conditional demographic disparity.
    Mcdd,
}

impl MetricCode {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricCode::Oa => "OA",
            MetricCode::Sp => "SP",
            MetricCode::Eo => "EO",
            MetricCode::Pe => "PE",
            MetricCode::Fnr => "FNR",
            MetricCode::Ci => "CI",
            MetricCode::Fplp => "FPLP",
            MetricCode::Fnlp => "FNLP",
            MetricCode::Pli => "PLI",
            MetricCode::Nli => "NLI",
            MetricCode::Fcdd => "FCDD",
            MetricCode::Mcdd => "MCDD",
        }
    }
}

impl fmt::Display for MetricCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Population a metric was computed over.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Scope {
    Overall,
    Group(String),
}

/// One computed metric value.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricResult {
    pub code: MetricCode,
    pub value: f64,
    pub scope: Scope,
}

impl MetricResult {
    pub fn overall(code: MetricCode, value: f64) -> Self {
        Self {
            code,
            value,
            scope: Scope::Overall,
        }
    }

    pub fn for_group(code: MetricCode, value: f64, group: impl Into<String>) -> Self {
        Self {
            code,
            value,
            scope: Scope::Group(group.into()),
        }
    }

    /// Metric name as published: `EO` overall, `EO_Female` for a group.
    pub fn name(&self) -> String {
        match &self.scope {
            Scope::Overall => self.code.as_str().to_string(),
            Scope::Group(group) => format!("{}_{}", self.code, group),
        }
    }
}
