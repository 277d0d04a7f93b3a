//! Raw batch construction from JSON records or an already-loaded frame

use std::borrow::Borrow;
use std::collections::HashSet;

use polars::prelude::*;
use serde_json::{Map, Value};

use super::error::{PipelineError, PipelineResult};

/// An ordered, fully-materialized batch of raw records.
///
/// Row order is the order records arrived in and is preserved through every
/// pipeline stage, so output rows line up 1:1 with input rows.
#[derive(Debug, Clone)]
pub struct RawBatch {
    frame: DataFrame,
}

/// Storage type inferred for a JSON column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
}

impl RawBatch {
    /// Wrap a frame loaded from disk.
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build a batch from parsed JSON values, each of which must be an object.
    pub fn from_values(values: &[Value]) -> PipelineResult<Self> {
        let records = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_object()
                    .ok_or(PipelineError::NotAnObject { index })
            })
            .collect::<PipelineResult<Vec<_>>>()?;
        Self::from_records(&records)
    }

    /// Build a batch from JSON objects.
    ///
    /// The column set is the union of keys across records in first-seen order.
    /// A key missing from a record is null for that row.
    pub fn from_records<R: Borrow<Map<String, Value>>>(records: &[R]) -> PipelineResult<Self> {
        let mut names: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records {
            let record: &Map<String, Value> = record.borrow();
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    names.push(key.as_str());
                }
            }
        }

        let columns: Vec<Column> = names
            .iter()
            .map(|name| {
                let values: Vec<&Value> = records
                    .iter()
                    .map(|r| {
                        let record: &Map<String, Value> = r.borrow();
                        record.get(*name).unwrap_or(&Value::Null)
                    })
                    .collect();
                build_column(name, &values)
            })
            .collect();

        let frame = if columns.is_empty() {
            DataFrame::empty()
        } else {
            DataFrame::new(columns)?
        };
        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Column names in arrival order
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

fn infer_kind(values: &[&Value]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;

    for value in values.iter().filter(|v| !v.is_null()) {
        let this = match value {
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Number(n) if n.is_i64() => ColumnKind::Integer,
            Value::Number(_) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        };

        kind = Some(match (kind, this) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Integer | ColumnKind::Float), ColumnKind::Integer | ColumnKind::Float) => {
                ColumnKind::Float
            }
            _ => return ColumnKind::Text,
        });
    }

    // All-null columns are numeric so they classify as structurally empty
    kind.unwrap_or(ColumnKind::Float)
}

fn build_column(name: &str, values: &[&Value]) -> Column {
    match infer_kind(values) {
        ColumnKind::Boolean => {
            let data: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Column::new(name.into(), data)
        }
        ColumnKind::Integer => {
            let data: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
            Column::new(name.into(), data)
        }
        ColumnKind::Float => {
            let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Column::new(name.into(), data)
        }
        ColumnKind::Text => {
            let data: Vec<Option<String>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Column::new(name.into(), data)
        }
    }
}
