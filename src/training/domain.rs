//! Domain types for training-set composition: per-group label tallies.

use crate::data::domain::{Label, TrainingRow, FEMALE, MALE};

/// Label tallies for one group.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupLabelCounts {
    /// Every row in the group, labelled or not.
    pub count: u64,
    pub positive: u64,
    pub negative: u64,
}

impl GroupLabelCounts {
    fn add(&mut self, label: Option<Label>) {
        self.count += 1;
        match label {
            Some(Label::Positive) => self.positive += 1,
            Some(Label::Negative) => self.negative += 1,
            None => {}
        }
    }
}

/// Composition of a training set split into two groups, A and B.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompositionCounts {
    pub group_a: GroupLabelCounts,
    pub group_b: GroupLabelCounts,
    /// Labelled positive across every row, including rows without a group.
    pub overall_positive: u64,
    pub overall_negative: u64,
}

impl CompositionCounts {
    /// Tally rows, with `a` and `b` naming the two groups compared.
    pub fn tally(rows: &[TrainingRow], a: &str, b: &str) -> Self {
        let mut out = Self::default();
        for row in rows {
            match row.label {
                Some(Label::Positive) => out.overall_positive += 1,
                Some(Label::Negative) => out.overall_negative += 1,
                None => {}
            }
            match row.group.as_deref() {
                Some(g) if g == a => out.group_a.add(row.label),
                Some(g) if g == b => out.group_b.add(row.label),
                _ => {}
            }
        }
        out
    }

    /// Male as group A, female as group B.
    pub fn by_sex(rows: &[TrainingRow]) -> Self {
        Self::tally(rows, MALE, FEMALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: Option<&str>, label: Option<Label>) -> TrainingRow {
        TrainingRow {
            id: String::new(),
            group: group.map(str::to_string),
            label,
        }
    }

    #[test]
    fn counts_unlabelled_and_ungrouped_rows_where_they_belong() {
        let rows = vec![
            row(Some(MALE), Some(Label::Positive)),
            row(Some(MALE), None),
            row(Some(FEMALE), Some(Label::Negative)),
            row(None, Some(Label::Positive)),
        ];
        let c = CompositionCounts::by_sex(&rows);
        assert_eq!(
            c.group_a,
            GroupLabelCounts {
                count: 2,
                positive: 1,
                negative: 0
            }
        );
        assert_eq!(
            c.group_b,
            GroupLabelCounts {
                count: 1,
                positive: 0,
                negative: 1
            }
        );
        assert_eq!(c.overall_positive, 2);
        assert_eq!(c.overall_negative, 1);
    }
}
