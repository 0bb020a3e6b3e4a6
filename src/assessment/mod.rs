//! Assessment records: packaging metric values for the benchmarking platform.

pub mod domain;
pub mod repo_fs;
pub mod service;

pub use domain::{AssessmentRecord, ParticipantRecord, Provenance};
