//! Service layer that loads, validates and types the input tables.
//!
//! Each loader reads the raw table, runs it through the workflow's schema and
//! adapts the typed rows onto the canonical row structs. Nothing past this
//! point looks columns up by name.

use std::path::Path;

use crate::common::error::{BenchError, BenchResult};

use super::domain::{
    Delimiter, ReferenceRow, SubmissionRow, TableSource, TrainingRow, Workflow,
    TRUE_VALUE_COLUMN,
};
use super::schema::{self, Schema, TypedTable};

fn load_typed(
    source: &dyn TableSource,
    path: &Path,
    delimiter: Delimiter,
    schema: &Schema,
) -> BenchResult<TypedTable> {
    let raw = source.read_table(path, delimiter)?;
    let typed = schema::validate(&raw, schema)?;
    log::info!(
        "validated {} table {} ({} rows)",
        schema.table,
        path.display(),
        typed.rows.len()
    );
    Ok(typed)
}

/// Load and validate a model-output submission.
pub fn load_submission(
    source: &dyn TableSource,
    path: &Path,
    workflow: Workflow,
    delimiter: Delimiter,
) -> BenchResult<Vec<SubmissionRow>> {
    let typed = load_typed(source, path, delimiter, &workflow.submission_schema())?;
    Ok(submission_rows(&typed, workflow))
}

/// Load and validate the gold-standard table of a model-output workflow.
pub fn load_reference(
    source: &dyn TableSource,
    path: &Path,
    workflow: Workflow,
    delimiter: Delimiter,
) -> BenchResult<Vec<ReferenceRow>> {
    let schema = workflow.reference_schema().ok_or_else(|| {
        BenchError::usage(format!(
            "workflow {workflow} has no reference table"
        ))
    })?;
    let typed = load_typed(source, path, delimiter, &schema)?;
    Ok(reference_rows(&typed, workflow))
}

/// Load and validate a training-set composition table.
pub fn load_training(
    source: &dyn TableSource,
    path: &Path,
    workflow: Workflow,
    delimiter: Delimiter,
) -> BenchResult<Vec<TrainingRow>> {
    let typed = load_typed(source, path, delimiter, &workflow.submission_schema())?;
    Ok(training_rows(&typed, workflow))
}

/// Validate a submission without keeping its rows.
pub fn check_submission(
    source: &dyn TableSource,
    path: &Path,
    workflow: Workflow,
    delimiter: Delimiter,
) -> BenchResult<usize> {
    let typed = load_typed(source, path, delimiter, &workflow.submission_schema())?;
    Ok(typed.rows.len())
}

struct Positions {
    id: Option<usize>,
    label: Option<usize>,
    group: Option<usize>,
}

fn positions(schema: &Schema, id: &str, label: &str, group: Option<&str>) -> Positions {
    Positions {
        id: schema.position(id),
        label: schema.position(label),
        group: group.and_then(|g| schema.position(g)),
    }
}

/// Adapt a validated submission table.
pub fn submission_rows(table: &TypedTable, workflow: Workflow) -> Vec<SubmissionRow> {
    let cols = workflow.columns();
    let pos = positions(&table.schema, cols.id, cols.label, Some(cols.group));
    table
        .rows
        .iter()
        .filter_map(|row| {
            let id = row.text(pos.id?)?.to_string();
            Some(SubmissionRow {
                id,
                group: pos.group.and_then(|g| row.text(g)).map(str::to_string),
                predicted: pos.label.and_then(|l| row.label(l)),
            })
        })
        .collect()
}

/// Adapt a validated reference table.
pub fn reference_rows(table: &TypedTable, workflow: Workflow) -> Vec<ReferenceRow> {
    let pos = positions(&table.schema, workflow.columns().id, TRUE_VALUE_COLUMN, None);
    table
        .rows
        .iter()
        .filter_map(|row| {
            Some(ReferenceRow {
                id: row.text(pos.id?)?.to_string(),
                truth: pos.label.and_then(|l| row.label(l)),
            })
        })
        .collect()
}

/// Adapt a validated training-set table.
pub fn training_rows(table: &TypedTable, workflow: Workflow) -> Vec<TrainingRow> {
    let cols = workflow.columns();
    let pos = positions(&table.schema, cols.id, cols.label, Some(cols.group));
    table
        .rows
        .iter()
        .filter_map(|row| {
            Some(TrainingRow {
                id: row.text(pos.id?)?.to_string(),
                group: pos.group.and_then(|g| row.text(g)).map(str::to_string),
                label: pos.label.and_then(|l| row.label(l)),
            })
        })
        .collect()
}
