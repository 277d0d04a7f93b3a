//! Drop-first one-hot encoding of the categorical passthrough columns
//!
//! For each column the levels are its distinct observed categories in sorted
//! order followed by an explicit missing level. The first level is dropped as
//! the reference, and every remaining level becomes a `<column>_<category>` (or
//! `<column>_nan`) indicator column. Which indicators exist depends on which
//! categories this batch happens to contain; alignment against the model schema
//! happens afterwards.

use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::schema::MISSING_LEVEL_SUFFIX;

/// One level of a categorical column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Category(String),
    Missing,
}

impl Level {
    fn label(&self) -> &str {
        match self {
            Level::Category(c) => c,
            Level::Missing => MISSING_LEVEL_SUFFIX,
        }
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Level::Category(c), Some(v)) => c == v,
            (Level::Missing, None) => true,
            _ => false,
        }
    }
}

/// Levels observed for one column in this batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLevels {
    pub column: String,
    /// Distinct categories, sorted, with `Level::Missing` last
    pub levels: Vec<Level>,
}

impl CategoryLevels {
    pub fn observe(column: &str, values: &[Option<String>]) -> Self {
        let distinct: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
        let mut levels: Vec<Level> = distinct
            .into_iter()
            .map(|c| Level::Category(c.to_string()))
            .collect();
        levels.push(Level::Missing);

        Self {
            column: column.to_string(),
            levels,
        }
    }

    /// Levels that get an indicator column (all but the reference level)
    pub fn encoded_levels(&self) -> &[Level] {
        &self.levels[1..]
    }

    /// The reference level omitted from the encoding
    pub fn reference_level(&self) -> &Level {
        &self.levels[0]
    }
}

/// A generated indicator column: which levels of which column it flags
///
/// Usually one level. A category spelled like the missing label (`"nan"`)
/// shares its indicator with the missing level, and either one sets the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotEntry {
    pub column: String,
    pub levels: Vec<Level>,
    pub feature_name: String,
}

impl OneHotEntry {
    fn flags(&self, value: Option<&str>) -> bool {
        self.levels.iter().any(|level| level.matches(value))
    }
}

/// Explicit `(column, level) -> feature name` mapping built per batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneHotPlan {
    pub entries: Vec<OneHotEntry>,
}

impl OneHotPlan {
    pub fn from_levels(all_levels: &[CategoryLevels]) -> Self {
        let mut entries: Vec<OneHotEntry> = Vec::new();
        for levels in all_levels {
            for level in levels.encoded_levels() {
                let feature_name = format!("{}_{}", levels.column, level.label());
                match entries.iter_mut().find(|e| e.feature_name == feature_name) {
                    Some(entry) => entry.levels.push(level.clone()),
                    None => entries.push(OneHotEntry {
                        column: levels.column.clone(),
                        levels: vec![level.clone()],
                        feature_name,
                    }),
                }
            }
        }
        Self { entries }
    }

    /// Observe the levels of `columns` in `df` and plan their indicators.
    pub fn build(df: &DataFrame, columns: &[&str]) -> PipelineResult<Self> {
        let levels = columns
            .iter()
            .map(|column| Ok(CategoryLevels::observe(column, &categorical_values(df, column)?)))
            .collect::<PipelineResult<Vec<_>>>()?;
        Ok(Self::from_levels(&levels))
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.feature_name.as_str()).collect()
    }
}

/// Read a categorical column as optional strings, casting non-text columns.
pub fn categorical_values(df: &DataFrame, column: &str) -> PipelineResult<Vec<Option<String>>> {
    let col = df.column(column).map_err(|_| PipelineError::MissingColumn {
        column: column.to_string(),
    })?;

    let as_text = col.cast(&DataType::String)?;
    let values = as_text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// One-hot encode `columns` of `df` into Float64 indicator columns.
pub fn one_hot_encode(df: &DataFrame, columns: &[&str]) -> PipelineResult<Vec<Column>> {
    let mut values: HashMap<&str, Vec<Option<String>>> = HashMap::with_capacity(columns.len());
    let mut levels = Vec::with_capacity(columns.len());
    for column in columns {
        let observed = categorical_values(df, column)?;
        levels.push(CategoryLevels::observe(column, &observed));
        values.insert(*column, observed);
    }

    let plan = OneHotPlan::from_levels(&levels);
    let indicators = plan
        .entries
        .iter()
        .map(|entry| {
            let flags: Vec<f64> = values[entry.column.as_str()]
                .iter()
                .map(|v| if entry.flags(v.as_deref()) { 1.0 } else { 0.0 })
                .collect();
            Column::new(entry.feature_name.as_str().into(), flags)
        })
        .collect();

    Ok(indicators)
}
