//! Cleanup of the currency- and percentage-formatted columns
//!
//! Both columns arrive as text (`"$(1,234.50)"`, `"12.5%"`) and must be numeric
//! before imputation. A value that does not parse fails the whole batch.

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::schema::{CURRENCY_COLUMN, PERCENTAGE_COLUMN};

/// Text format of a column that needs cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattedKind {
    /// `$` and `,` separators, parentheses for negatives
    Currency,
    /// Trailing `%`, magnitude kept (`12.5%` is `12.5`)
    Percentage,
}

impl FormattedKind {
    fn parse(self, raw: &str) -> Option<f64> {
        match self {
            FormattedKind::Currency => parse_currency(raw),
            FormattedKind::Percentage => parse_percentage(raw),
        }
    }

    fn error(self, column: &str, row: usize, value: &str) -> PipelineError {
        let column = column.to_string();
        let value = value.to_string();
        match self {
            FormattedKind::Currency => PipelineError::InvalidCurrency { column, row, value },
            FormattedKind::Percentage => PipelineError::InvalidPercentage { column, row, value },
        }
    }
}

/// Parse a currency amount such as `$1,234.50` or `(12)`.
///
/// `$`, `,` and `)` are removed and `(` becomes a minus sign.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ')'))
        .map(|c| if c == '(' { '-' } else { c })
        .collect();
    cleaned.trim().parse::<f64>().ok()
}

/// Parse a percentage such as `12.5%` into `12.5`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '%').collect();
    cleaned.trim().parse::<f64>().ok()
}

/// Replace the formatted columns of `df` with their Float64 forms.
pub fn clean_formatted_columns(df: &DataFrame) -> PipelineResult<DataFrame> {
    let currency = clean_column(df, CURRENCY_COLUMN, FormattedKind::Currency)?;
    let percentage = clean_column(df, PERCENTAGE_COLUMN, FormattedKind::Percentage)?;

    let mut cleaned = df.clone();
    cleaned.with_column(currency)?;
    cleaned.with_column(percentage)?;
    Ok(cleaned)
}

fn clean_column(df: &DataFrame, name: &str, kind: FormattedKind) -> PipelineResult<Column> {
    let column = df.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })?;

    let values: Vec<Option<f64>> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(raw) => kind
                    .parse(raw)
                    .map(|v| (!v.is_nan()).then_some(v))
                    .ok_or_else(|| kind.error(name, row, raw)),
            })
            .collect::<PipelineResult<_>>()?,
        // Already numeric, e.g. a JSON number or an all-null column
        dtype if dtype.is_primitive_numeric() || dtype == &DataType::Boolean => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect(),
        dtype => {
            return Err(PipelineError::NonNumericColumn {
                column: name.to_string(),
                dtype: dtype.to_string(),
            })
        }
    };

    Ok(Column::new(name.into(), values))
}
