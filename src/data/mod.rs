//! Data domain: reading, validating and typing the submitted tables.

pub mod domain;
pub mod repo_fs;
pub mod schema;
pub mod service;

pub use domain::{Label, ReferenceRow, SubmissionRow, TrainingRow, Workflow};
pub use schema::{SchemaError, Violation};
