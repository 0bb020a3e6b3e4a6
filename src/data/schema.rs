//! Declarative table schemas and the validator that turns raw text cells into
//! typed values.
//!
//! Validation is all-or-nothing. Missing header columns are reported on their
//! own, since no row can be checked without them. Otherwise every row-level
//! problem is collected so a submitter sees the full list in one pass.
//!
//! Null cells (see [`NULL_TOKENS`]) are accepted in nullable columns and skip
//! type and domain checks entirely. Value cells are trimmed before checking;
//! key cells are not, so ids join byte for byte.

use std::collections::HashMap;

use super::domain::{Label, RawTable};

/// Cell contents treated as missing, mirroring common dataframe NA tokens.
pub const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

pub fn is_null(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw.trim())
}

/// How a label column encodes the binary outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LabelCoding {
    /// `Yes` / `No`, case-insensitive.
    YesNo,
    /// Integer column restricted to `0` / `1`.
    Binary,
    /// Either of the above.
    Either,
}

/// Declared type and value domain of a column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColumnKind {
    /// Unique, non-null row identifier, kept byte for byte.
    Key,
    /// Case-insensitive match against the listed spellings.
    Category(&'static [&'static str]),
    Label(LabelCoding),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Whether the column must appear in the header.
    pub required: bool,
    pub nullable: bool,
}

impl ColumnSpec {
    pub fn key(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Key,
            required: true,
            nullable: false,
        }
    }

    pub fn category(name: &'static str, domain: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: ColumnKind::Category(domain),
            required: true,
            nullable: true,
        }
    }

    pub fn label(name: &'static str, coding: LabelCoding) -> Self {
        Self {
            name,
            kind: ColumnKind::Label(coding),
            required: true,
            nullable: true,
        }
    }

    /// Allow the column to be absent from the header.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Ordered column declarations for one table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schema {
    pub table: &'static str,
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(table: &'static str, columns: Vec<ColumnSpec>) -> Self {
        Self { table, columns }
    }

    /// Position of a declared column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// A validated cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    Null,
    Key(String),
    /// Canonical spelling from the column's domain.
    Category(&'static str),
    Label(Label),
}

/// A validated row; cells follow the schema's column order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypedRow {
    pub line: u64,
    pub cells: Vec<Cell>,
}

impl TypedRow {
    /// String content of a key or category cell.
    pub fn text(&self, idx: usize) -> Option<&str> {
        match self.cells.get(idx)? {
            Cell::Key(s) => Some(s.as_str()),
            Cell::Category(s) => Some(*s),
            Cell::Null | Cell::Label(_) => None,
        }
    }

    pub fn label(&self, idx: usize) -> Option<Label> {
        match self.cells.get(idx)? {
            Cell::Label(label) => Some(*label),
            _ => None,
        }
    }
}

/// Output of a successful validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypedTable {
    pub schema: Schema,
    pub rows: Vec<TypedRow>,
}

/// One schema problem.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("line {line}: column '{column}'{} has non-coercible value '{value}'", fmt_row(.row_id))]
    TypeMismatch {
        column: String,
        row_id: Option<String>,
        line: u64,
        value: String,
    },

    #[error("line {line}: column '{column}'{} has value '{value}' outside the permitted set", fmt_row(.row_id))]
    DomainViolation {
        column: String,
        row_id: Option<String>,
        line: u64,
        value: String,
    },

    #[error("line {line}: key column '{column}' is empty")]
    MissingKey { column: String, line: u64 },

    #[error("line {line}: id '{row_id}' in column '{column}' already appeared on line {first_line}")]
    DuplicateKey {
        column: String,
        row_id: String,
        line: u64,
        first_line: u64,
    },
}

fn fmt_row(row_id: &Option<String>) -> String {
    match row_id {
        Some(id) => format!(" (id '{id}')"),
        None => String::new(),
    }
}

impl Violation {
    pub fn column(&self) -> &str {
        match self {
            Violation::MissingColumn { column }
            | Violation::TypeMismatch { column, .. }
            | Violation::DomainViolation { column, .. }
            | Violation::MissingKey { column, .. }
            | Violation::DuplicateKey { column, .. } => column,
        }
    }
}

/// Every violation found in one table.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[error("{table} table failed validation with {} violation(s):\n{}", .violations.len(), render(.violations))]
pub struct SchemaError {
    pub table: String,
    pub violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check `table` against `schema`, returning typed rows or every violation.
pub fn validate(table: &RawTable, schema: &Schema) -> Result<TypedTable, SchemaError> {
    let mut header_pos: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in table.header.iter().enumerate() {
        header_pos.entry(name.as_str()).or_insert(idx);
    }

    let missing: Vec<Violation> = schema
        .columns
        .iter()
        .filter(|c| c.required && !header_pos.contains_key(c.name))
        .map(|c| Violation::MissingColumn {
            column: c.name.to_string(),
        })
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError {
            table: schema.table.to_string(),
            violations: missing,
        });
    }

    let sources: Vec<Option<usize>> = schema
        .columns
        .iter()
        .map(|c| header_pos.get(c.name).copied())
        .collect();
    let key_source = schema
        .columns
        .iter()
        .zip(&sources)
        .find(|(c, _)| c.kind == ColumnKind::Key)
        .and_then(|(_, src)| *src);

    let mut violations = Vec::new();
    let mut seen: HashMap<String, u64> = HashMap::new();
    let mut rows = Vec::with_capacity(table.rows.len());

    for raw in &table.rows {
        let row_id = key_source
            .and_then(|idx| raw.cells.get(idx))
            .filter(|s| !is_null(s))
            .cloned();

        let mut cells = Vec::with_capacity(schema.columns.len());
        for (spec, src) in schema.columns.iter().zip(&sources) {
            let value = src
                .and_then(|idx| raw.cells.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            let value = match spec.kind {
                ColumnKind::Key => value,
                _ => value.trim(),
            };
            let cell = check_cell(spec, value, raw.line, &row_id, &mut seen, &mut violations);
            cells.push(cell);
        }
        rows.push(TypedRow {
            line: raw.line,
            cells,
        });
    }

    if violations.is_empty() {
        Ok(TypedTable {
            schema: schema.clone(),
            rows,
        })
    } else {
        Err(SchemaError {
            table: schema.table.to_string(),
            violations,
        })
    }
}

fn check_cell(
    spec: &ColumnSpec,
    value: &str,
    line: u64,
    row_id: &Option<String>,
    seen: &mut HashMap<String, u64>,
    violations: &mut Vec<Violation>,
) -> Cell {
    let column = || spec.name.to_string();

    if is_null(value) {
        if !spec.nullable {
            violations.push(Violation::MissingKey {
                column: column(),
                line,
            });
        }
        return Cell::Null;
    }

    let type_mismatch = || Violation::TypeMismatch {
        column: column(),
        row_id: row_id.clone(),
        line,
        value: value.to_string(),
    };
    let domain_violation = || Violation::DomainViolation {
        column: column(),
        row_id: row_id.clone(),
        line,
        value: value.to_string(),
    };

    match &spec.kind {
        ColumnKind::Key => {
            if let Some(&first_line) = seen.get(value) {
                violations.push(Violation::DuplicateKey {
                    column: column(),
                    row_id: value.to_string(),
                    line,
                    first_line,
                });
            } else {
                seen.insert(value.to_string(), line);
            }
            Cell::Key(value.to_string())
        }
        ColumnKind::Category(domain) => {
            let domain: &'static [&'static str] = domain;
            match domain.iter().copied().find(|d| d.eq_ignore_ascii_case(value)) {
                Some(canonical) => Cell::Category(canonical),
                None => {
                    violations.push(domain_violation());
                    Cell::Null
                }
            }
        }
        ColumnKind::Label(LabelCoding::YesNo) => match Label::from_yes_no(value) {
            Some(label) => Cell::Label(label),
            None => {
                violations.push(domain_violation());
                Cell::Null
            }
        },
        ColumnKind::Label(LabelCoding::Binary) => match value.parse::<i64>() {
            Ok(n) => match Label::from_binary(n) {
                Some(label) => Cell::Label(label),
                None => {
                    violations.push(domain_violation());
                    Cell::Null
                }
            },
            Err(_) => {
                violations.push(type_mismatch());
                Cell::Null
            }
        },
        ColumnKind::Label(LabelCoding::Either) => {
            let parsed = Label::from_yes_no(value)
                .or_else(|| value.parse::<i64>().ok().and_then(Label::from_binary));
            match parsed {
                Some(label) => Cell::Label(label),
                None => {
                    violations.push(domain_violation());
                    Cell::Null
                }
            }
        }
    }
}
