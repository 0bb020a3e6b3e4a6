//! Builds the output records from computed metrics.

use serde::Serialize;
use std::path::Path;

use crate::common::error::BenchResult;
use crate::common::json;
use crate::evaluation::domain::MetricResult;

use super::domain::{ArtifactSink, AssessmentRecord, ParticipantRecord, Provenance};

/// `<community>:_<METRIC>_<participant>_A`
pub fn assessment_id(community: &str, metric: &str, participant: &str) -> String {
    format!("{community}:_{metric}_{participant}_A")
}

/// `<community>:<participant>_P`
pub fn participant_id(community: &str, participant: &str) -> String {
    format!("{community}:{participant}_P")
}

/// One record per metric, in the order the metrics were produced.
pub fn build_assessments(p: &Provenance, metrics: &[MetricResult]) -> Vec<AssessmentRecord> {
    metrics
        .iter()
        .map(|m| {
            let metric = m.name();
            AssessmentRecord {
                id: assessment_id(&p.community, &metric, &p.participant),
                kind: "assessment".to_string(),
                community: p.community.clone(),
                challenge: p.challenges.clone(),
                participant: p.participant.clone(),
                metric,
                value: m.value,
                error_margin: 0.0,
            }
        })
        .collect()
}

pub fn participant_record(p: &Provenance, validated: bool) -> ParticipantRecord {
    ParticipantRecord {
        id: participant_id(&p.community, &p.participant),
        kind: "participant".to_string(),
        community: p.community.clone(),
        challenge: p.challenges.clone(),
        participant: p.participant.clone(),
        validated,
    }
}

/// Render `records` as a sorted, indented JSON array and hand it to `sink`.
pub fn publish<T: Serialize>(sink: &dyn ArtifactSink, path: &Path, records: &[T]) -> BenchResult<()> {
    let body = json::to_sorted_pretty(records)?;
    sink.put_artifact(path, &body)?;
    log::info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}
