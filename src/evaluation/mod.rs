//! Evaluation of model predictions against the gold standard.

pub mod confusion;
pub mod domain;
pub mod join;
pub mod metrics;
pub mod service;

pub use confusion::{ConfusionCounts, InconsistentTotalError, PartitionedCounts};
pub use domain::{JoinedRecord, MetricCode, MetricResult, Scope};
pub use join::{DropPolicy, JoinOutcome};
