//! Inner join of submissions against the gold standard.
//!
//! Ids compare byte-for-byte. Unmatched ids never fail the join itself; they
//! are counted so the caller can decide via [`DropPolicy`].

use std::collections::{HashMap, HashSet};

use crate::common::error::{BenchError, BenchResult};
use crate::data::domain::{ReferenceRow, SubmissionRow};

use super::domain::JoinedRecord;

/// Joined records plus everything that fell out of the join.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JoinOutcome {
    /// In submission order.
    pub records: Vec<JoinedRecord>,
    /// Submitted ids absent from the reference.
    pub submission_only: usize,
    /// Reference ids absent from the submission.
    pub reference_only: usize,
    /// Matched ids with a null predicted or true label.
    pub unlabeled: usize,
}

impl JoinOutcome {
    /// Ids present in only one of the two tables.
    pub fn unmatched(&self) -> usize {
        self.submission_only + self.reference_only
    }
}

pub fn inner_join(submission: &[SubmissionRow], reference: &[ReferenceRow]) -> JoinOutcome {
    let mut truth_by_id: HashMap<&str, &ReferenceRow> = HashMap::with_capacity(reference.len());
    for row in reference {
        truth_by_id.entry(row.id.as_str()).or_insert(row);
    }

    let mut outcome = JoinOutcome::default();
    let mut matched: HashSet<&str> = HashSet::with_capacity(submission.len());

    for sub in submission {
        let Some(gold) = truth_by_id.get(sub.id.as_str()) else {
            outcome.submission_only += 1;
            continue;
        };
        if !matched.insert(gold.id.as_str()) {
            // Repeated submission id; the first occurrence already joined.
            continue;
        }
        match (sub.predicted, gold.truth) {
            (Some(predicted), Some(truth)) => outcome.records.push(JoinedRecord {
                id: sub.id.clone(),
                predicted,
                truth,
                group: sub.group.clone(),
            }),
            _ => outcome.unlabeled += 1,
        }
    }

    outcome.reference_only = truth_by_id
        .keys()
        .filter(|id| !matched.contains(*id))
        .count();
    outcome
}

/// What to do about ids that did not match.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DropPolicy {
    /// Fail once more than this many ids are unmatched; `None` only warns.
    pub max_unmatched: Option<usize>,
}

impl DropPolicy {
    pub fn check(&self, outcome: &JoinOutcome) -> BenchResult<()> {
        let dropped = outcome.unmatched();
        if dropped == 0 && outcome.unlabeled == 0 {
            return Ok(());
        }
        log::warn!(
            "join dropped {} submission-only, {} reference-only and {} unlabeled ids",
            outcome.submission_only,
            outcome.reference_only,
            outcome.unlabeled
        );
        match self.max_unmatched {
            Some(allowed) if dropped > allowed => {
                Err(BenchError::TooManyUnmatched { dropped, allowed })
            }
            _ => Ok(()),
        }
    }
}
