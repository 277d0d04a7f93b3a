//! Scored output: the original columns in sorted order plus the model results

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::pipeline::schema::{OUTCOME_COLUMN, PHAT_COLUMN};
use crate::pipeline::{classify_outcomes, BusinessOutcome, PipelineResult, RawBatch};

/// Per-record results joined back onto the untransformed input
#[derive(Debug, Clone)]
pub struct ScoredBatch {
    /// Original columns sorted by name
    original: DataFrame,
    phat: Vec<f64>,
    outcomes: Vec<BusinessOutcome>,
}

/// Threshold each probability and merge the results with the original input.
///
/// Input columns are sorted by name and followed by `phat` and
/// `business_outcome`. An input column already carrying one of those names is
/// superseded by the result column.
pub fn postprocess(batch: &RawBatch, phat: Vec<f64>, threshold: f64) -> PipelineResult<ScoredBatch> {
    let mut names: Vec<String> = batch
        .column_names()
        .into_iter()
        .filter(|name| name != PHAT_COLUMN && name != OUTCOME_COLUMN)
        .collect();
    names.sort();

    let original = batch.frame().select(names.iter().map(|s| s.as_str()))?;
    let outcomes = classify_outcomes(&phat, threshold);

    Ok(ScoredBatch {
        original,
        phat,
        outcomes,
    })
}

impl ScoredBatch {
    pub fn len(&self) -> usize {
        self.phat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phat.is_empty()
    }

    pub fn phat(&self) -> &[f64] {
        &self.phat
    }

    pub fn outcomes(&self) -> &[BusinessOutcome] {
        &self.outcomes
    }

    pub fn event_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_event()).count()
    }

    /// Output column names: sorted input columns, then the result columns
    pub fn column_names(&self) -> Vec<String> {
        self.original
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .chain([PHAT_COLUMN.to_string(), OUTCOME_COLUMN.to_string()])
            .collect()
    }

    /// Render one JSON object per record, keys in output column order.
    pub fn to_json_records(&self) -> PipelineResult<Vec<Value>> {
        let mut columns: Vec<(String, std::vec::IntoIter<Value>)> = self
            .original
            .get_columns()
            .iter()
            .map(|col| Ok((col.name().to_string(), column_to_json(col)?.into_iter())))
            .collect::<PipelineResult<_>>()?;

        let records = self
            .phat
            .iter()
            .zip(&self.outcomes)
            .map(|(&phat, outcome)| {
                let mut record = Map::with_capacity(columns.len() + 2);
                for (name, values) in columns.iter_mut() {
                    record.insert(name.clone(), values.next().unwrap_or(Value::Null));
                }
                record.insert(PHAT_COLUMN.to_string(), Value::from(phat));
                record.insert(OUTCOME_COLUMN.to_string(), Value::from(outcome.as_str()));
                Value::Object(record)
            })
            .collect();

        Ok(records)
    }

    /// Render the same table as a frame, for writing to CSV or Parquet.
    pub fn to_frame(&self) -> PipelineResult<DataFrame> {
        let mut frame = self.original.clone();
        frame.with_column(Column::new(PHAT_COLUMN.into(), self.phat.clone()))?;
        let labels: Vec<&str> = self.outcomes.iter().map(|o| o.as_str()).collect();
        frame.with_column(Column::new(OUTCOME_COLUMN.into(), labels))?;
        Ok(frame)
    }
}

/// Convert a column back into JSON values. Non-finite floats become null.
fn column_to_json(col: &Column) -> PipelineResult<Vec<Value>> {
    let dtype = col.dtype();

    let values = if dtype == &DataType::Boolean {
        col.bool()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Bool))
            .collect()
    } else if dtype == &DataType::String {
        col.str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype.is_signed_integer() {
        let cast = col.cast(&DataType::Int64)?;
        cast.i64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype.is_unsigned_integer() {
        let cast = col.cast(&DataType::UInt64)?;
        cast.u64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype.is_float() {
        let cast = col.cast(&DataType::Float64)?;
        cast.f64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else {
        let cast = col.cast(&DataType::String)?;
        cast.str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch() -> RawBatch {
        let records = json!([
            {"zeta": "z1", "alpha": 1, "mid": 1.5, "flag": true},
            {"zeta": null, "alpha": 2, "mid": null, "flag": false},
            {"alpha": 3, "mid": 2.5, "zeta": "z3", "flag": null}
        ]);
        RawBatch::from_values(records.as_array().unwrap()).unwrap()
    }

    #[test]
    fn test_columns_sorted_then_results() {
        let scored = postprocess(&batch(), vec![0.1, 0.75, 0.9], 0.75).unwrap();
        assert_eq!(
            scored.column_names(),
            vec!["alpha", "flag", "mid", "zeta", "phat", "business_outcome"]
        );
        assert_eq!(scored.event_count(), 2);
    }

    #[test]
    fn test_json_records_preserve_values_and_key_order() {
        let scored = postprocess(&batch(), vec![0.1, 0.75, 0.9], 0.75).unwrap();
        let records = scored.to_json_records().unwrap();
        assert_eq!(records.len(), 3);

        let first = records[0].as_object().unwrap();
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "flag", "mid", "zeta", "phat", "business_outcome"]);

        assert_eq!(records[0]["alpha"], json!(1));
        assert_eq!(records[0]["zeta"], json!("z1"));
        assert_eq!(records[0]["business_outcome"], json!("Non-Event"));
        assert_eq!(records[1]["zeta"], Value::Null);
        assert_eq!(records[1]["mid"], Value::Null);
        assert_eq!(records[1]["business_outcome"], json!("Event"));
        assert_eq!(records[2]["mid"], json!(2.5));
        assert_eq!(records[2]["flag"], Value::Null);
        assert_eq!(records[2]["phat"], json!(0.9));
    }

    #[test]
    fn test_result_columns_supersede_inputs() {
        let records = json!([{"phat": 0.2, "b": 1, "a": 2}]);
        let raw = RawBatch::from_values(records.as_array().unwrap()).unwrap();
        let scored = postprocess(&raw, vec![0.8], 0.75).unwrap();
        assert_eq!(scored.column_names(), vec!["a", "b", "phat", "business_outcome"]);

        let out = scored.to_json_records().unwrap();
        assert_eq!(out[0]["phat"], json!(0.8));
    }

    #[test]
    fn test_to_frame() {
        let scored = postprocess(&batch(), vec![0.1, 0.75, 0.9], 0.75).unwrap();
        let frame = scored.to_frame().unwrap();
        assert_eq!(frame.shape(), (3, 6));

        let labels: Vec<Option<&str>> = frame.column("business_outcome").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(labels, vec![Some("Non-Event"), Some("Event"), Some("Event")]);
    }
}
