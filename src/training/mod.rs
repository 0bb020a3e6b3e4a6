//! Training-set composition: how the groups and labels are distributed
//! before any model sees the data.

pub mod domain;
pub mod metrics;
pub mod service;

pub use domain::{CompositionCounts, GroupLabelCounts};
pub use metrics::CompositionMetrics;
