//! Output records consumed by the benchmarking platform.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::BenchResult;

/// Who submitted the data and which benchmark it belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Provenance {
    pub community: String,
    pub challenges: Vec<String>,
    pub participant: String,
}

/// One metric value packaged for publication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub community: String,
    pub challenge: Vec<String>,
    pub participant: String,
    pub metric: String,
    pub value: f64,
    pub error_margin: f64,
}

/// Statement that a submission passed validation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub community: String,
    pub challenge: Vec<String>,
    pub participant: String,
    pub validated: bool,
}

/// Destination for rendered output artefacts.
pub trait ArtifactSink {
    fn put_artifact(&self, path: &Path, body: &str) -> BenchResult<()>;
}
