//! Confusion-matrix tallies, overall and per group.

use std::collections::BTreeMap;

use crate::data::domain::Label;

use super::domain::JoinedRecord;

/// TP/TN/FP/FN counts for one population.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfusionCounts {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    pub fn_: u64,
}

/// The four counts did not add up to the number of records tallied.
#[derive(thiserror::Error, Copy, Clone, Debug, Eq, PartialEq)]
#[error("confusion counts TP={tp} TN={tn} FP={fp} FN={fn_} do not sum to {expected} records")]
pub struct InconsistentTotalError {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    pub fn_: u64,
    pub expected: u64,
}

impl ConfusionCounts {
    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Count one prediction.
    pub fn add(&mut self, predicted: Label, truth: Label) {
        match (predicted, truth) {
            (Label::Positive, Label::Positive) => self.tp += 1,
            (Label::Negative, Label::Negative) => self.tn += 1,
            (Label::Positive, Label::Negative) => self.fp += 1,
            (Label::Negative, Label::Positive) => self.fn_ += 1,
        }
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &ConfusionCounts) {
        self.tp += other.tp;
        self.tn += other.tn;
        self.fp += other.fp;
        self.fn_ += other.fn_;
    }

    pub fn verify(&self, expected: u64) -> Result<(), InconsistentTotalError> {
        if self.total() == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected))
        }
    }

    fn mismatch(&self, expected: u64) -> InconsistentTotalError {
        InconsistentTotalError {
            tp: self.tp,
            tn: self.tn,
            fp: self.fp,
            fn_: self.fn_,
            expected,
        }
    }
}

/// Tally every record into one set of counts.
pub fn tally(records: &[JoinedRecord]) -> Result<ConfusionCounts, InconsistentTotalError> {
    let mut counts = ConfusionCounts::default();
    for r in records {
        counts.add(r.predicted, r.truth);
    }
    counts.verify(records.len() as u64)?;
    Ok(counts)
}

/// Overall counts plus one set per group key.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartitionedCounts<K: Ord> {
    pub overall: ConfusionCounts,
    pub groups: BTreeMap<K, ConfusionCounts>,
}

/// Tally overall and per `key`. Records whose key is `None` only count
/// toward the overall scope.
pub fn partition<K, F>(
    records: &[JoinedRecord],
    key: F,
) -> Result<PartitionedCounts<K>, InconsistentTotalError>
where
    K: Ord,
    F: Fn(&JoinedRecord) -> Option<K>,
{
    let overall = tally(records)?;

    let mut sized: BTreeMap<K, (ConfusionCounts, u64)> = BTreeMap::new();
    let mut ungrouped = ConfusionCounts::default();
    for r in records {
        match key(r) {
            Some(k) => {
                let (counts, size) = sized.entry(k).or_default();
                counts.add(r.predicted, r.truth);
                *size += 1;
            }
            None => ungrouped.add(r.predicted, r.truth),
        }
    }

    let mut groups = BTreeMap::new();
    for (k, (counts, size)) in sized {
        counts.verify(size)?;
        groups.insert(k, counts);
    }
    reconcile(&overall, &ungrouped, &groups)?;
    Ok(PartitionedCounts { overall, groups })
}

/// Group tallies plus the ungrouped tally must reproduce the overall tally
/// cell by cell.
pub fn reconcile<K: Ord>(
    overall: &ConfusionCounts,
    ungrouped: &ConfusionCounts,
    groups: &BTreeMap<K, ConfusionCounts>,
) -> Result<(), InconsistentTotalError> {
    let mut combined = *ungrouped;
    for counts in groups.values() {
        combined.merge(counts);
    }
    if combined == *overall {
        Ok(())
    } else {
        Err(combined.mismatch(overall.total()))
    }
}

/// Partition by the record's group attribute.
pub fn by_group(records: &[JoinedRecord]) -> Result<PartitionedCounts<String>, InconsistentTotalError> {
    partition(records, |r| r.group.clone())
}
