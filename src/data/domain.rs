//! Core table definitions: typed rows, labels and the per-workflow column
//! layouts that adapt raw submissions onto one canonical schema.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::BenchResult;

use super::schema::{ColumnSpec, LabelCoding, Schema};

/// Binary outcome, predicted or true.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Case-insensitive `Yes`/`No`.
    pub fn from_yes_no(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("yes") {
            Some(Label::Positive)
        } else if raw.eq_ignore_ascii_case("no") {
            Some(Label::Negative)
        } else {
            None
        }
    }

    /// Integer coding, `1` positive and `0` negative.
    pub fn from_binary(value: i64) -> Option<Self> {
        match value {
            1 => Some(Label::Positive),
            0 => Some(Label::Negative),
            _ => None,
        }
    }
}

/// Field separator of the delimited input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\\t" | "\t" => Ok(Delimiter::Tab),
            other => Err(format!("unknown delimiter '{other}' (expected comma or tab)")),
        }
    }
}

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

/// Permitted values of the group attribute (sex).
pub const SEX_DOMAIN: &[&str] = &[MALE, FEMALE];

/// Column holding the true outcome in every reference table.
pub const TRUE_VALUE_COLUMN: &str = "true_value";

/// Input layout variants seen across benchmark submissions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Workflow {
    /// Comma separated `ID`/`output` model predictions.
    ModelOutput,
    /// Tab separated `patient_id`/`diagnosis` model predictions.
    ModelOutputTsv,
    /// Comma separated `ID`/`Sexo`/`AF` training set composition.
    TrainingDataset,
}

/// Column names of one workflow's submission table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ColumnMap {
    pub id: &'static str,
    pub label: &'static str,
    pub group: &'static str,
}

impl Workflow {
    pub fn name(self) -> &'static str {
        match self {
            Workflow::ModelOutput => "model-output",
            Workflow::ModelOutputTsv => "model-output-tsv",
            Workflow::TrainingDataset => "training-dataset",
        }
    }

    pub fn delimiter(self) -> Delimiter {
        match self {
            Workflow::ModelOutputTsv => Delimiter::Tab,
            Workflow::ModelOutput | Workflow::TrainingDataset => Delimiter::Comma,
        }
    }

    /// Whether assessment joins against a gold-standard table.
    pub fn needs_reference(self) -> bool {
        !matches!(self, Workflow::TrainingDataset)
    }

    pub fn columns(self) -> ColumnMap {
        match self {
            Workflow::ModelOutput => ColumnMap {
                id: "ID",
                label: "output",
                group: "sex",
            },
            Workflow::ModelOutputTsv => ColumnMap {
                id: "patient_id",
                label: "diagnosis",
                group: "sex",
            },
            Workflow::TrainingDataset => ColumnMap {
                id: "ID",
                label: "AF",
                group: "Sexo",
            },
        }
    }

    /// Schema the submitted table must satisfy.
    pub fn submission_schema(self) -> Schema {
        let cols = self.columns();
        let columns = match self {
            Workflow::ModelOutput => vec![
                ColumnSpec::key(cols.id),
                ColumnSpec::label(cols.label, LabelCoding::YesNo),
                ColumnSpec::category(cols.group, SEX_DOMAIN).optional(),
            ],
            Workflow::ModelOutputTsv => vec![
                ColumnSpec::key(cols.id),
                ColumnSpec::label(cols.label, LabelCoding::Either),
                ColumnSpec::category(cols.group, SEX_DOMAIN).optional(),
            ],
            Workflow::TrainingDataset => vec![
                ColumnSpec::key(cols.id),
                ColumnSpec::category(cols.group, SEX_DOMAIN),
                ColumnSpec::label(cols.label, LabelCoding::YesNo),
            ],
        };
        Schema::new("submission", columns)
    }

    /// Schema of the gold-standard table, if the workflow uses one.
    pub fn reference_schema(self) -> Option<Schema> {
        let coding = match self {
            Workflow::ModelOutput => LabelCoding::Either,
            Workflow::ModelOutputTsv => LabelCoding::Binary,
            Workflow::TrainingDataset => return None,
        };
        Some(Schema::new(
            "reference",
            vec![
                ColumnSpec::key(self.columns().id),
                ColumnSpec::label(TRUE_VALUE_COLUMN, coding),
            ],
        ))
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Workflow {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        [
            Workflow::ModelOutput,
            Workflow::ModelOutputTsv,
            Workflow::TrainingDataset,
        ]
        .into_iter()
        .find(|w| w.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            format!(
                "unknown workflow '{raw}' (expected model-output, model-output-tsv or training-dataset)"
            )
        })
    }
}

/// One submitted prediction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionRow {
    pub id: String,
    pub group: Option<String>,
    pub predicted: Option<Label>,
}

/// One gold-standard outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferenceRow {
    pub id: String,
    pub truth: Option<Label>,
}

/// One training-set sample.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrainingRow {
    pub id: String,
    pub group: Option<String>,
    pub label: Option<Label>,
}

/// Delimited text as read from disk, before any typing.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// A data line with its 1-based position in the source file.
#[derive(Clone, Debug)]
pub struct RawRow {
    pub line: u64,
    pub cells: Vec<String>,
}

/// Source of raw tables.
pub trait TableSource {
    fn read_table(&self, path: &Path, delimiter: Delimiter) -> BenchResult<RawTable>;
}
