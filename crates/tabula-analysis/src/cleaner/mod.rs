//! Missing-value imputation.
//!
//! The cleaner is a pure transformation: it never mutates its input, and
//! the returned dataset has no missing values. Numeric columns are filled
//! with their median, everything else with the most frequent value (first
//! mode on ties). A column with no non-missing values at all is rejected
//! with [`AnalysisError::EmptyColumn`] — there is no statistic to fill it
//! with, and dropping data silently is not this component's job.

use crate::error::{AnalysisError, Result};
use crate::types::{ImputeStrategy, MissingValueSummary};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Dataset cleaner filling missing values per column.
pub struct DataCleaner;

impl DataCleaner {
    /// Return a copy of `df` with every missing value imputed, plus the
    /// list of actions taken.
    ///
    /// Columns without missing values pass through untouched. Cleaning is
    /// idempotent: cleaning an already-clean dataset is a no-op.
    pub fn clean(df: &DataFrame) -> Result<(DataFrame, Vec<String>)> {
        let mut out = df.clone();
        let mut actions = Vec::new();

        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for name in names {
            let series = out.column(&name)?.as_materialized_series().clone();
            let nulls = series.null_count();
            if nulls == 0 {
                continue;
            }
            if nulls == series.len() {
                return Err(AnalysisError::EmptyColumn(name));
            }

            if is_numeric_dtype(series.dtype()) {
                let median = series
                    .median()
                    .ok_or_else(|| AnalysisError::EmptyColumn(name.clone()))?;
                let filled = fill_numeric_nulls(&series, median)?;
                out.replace(&name, filled)?;
                actions.push(format!(
                    "Filled {} missing values in '{}' with median {:.2}",
                    nulls, name, median
                ));
                debug!("Median imputed '{}': {} values", name, nulls);
            } else {
                let mode = string_mode(&series)
                    .ok_or_else(|| AnalysisError::EmptyColumn(name.clone()))?;
                let filled = fill_string_nulls(&series, &mode)?;
                out.replace(&name, filled)?;
                actions.push(format!(
                    "Filled {} missing values in '{}' with mode '{}'",
                    nulls, name, mode
                ));
                debug!("Mode imputed '{}': {} values", name, nulls);
            }
        }

        Ok((out, actions))
    }

    /// Per-column missing-value counts, only for columns that have any.
    pub fn missing_summary(df: &DataFrame) -> Vec<MissingValueSummary> {
        let height = df.height();
        df.get_columns()
            .iter()
            .filter_map(|column| {
                let missing = column.null_count();
                if missing == 0 {
                    return None;
                }
                let percentage = if height == 0 {
                    0.0
                } else {
                    (missing as f64 / height as f64) * 100.0
                };
                Some(MissingValueSummary {
                    column: column.name().to_string(),
                    missing_count: missing,
                    missing_percentage: percentage,
                })
            })
            .collect()
    }

    /// Impute one column with an explicit strategy, returning a new dataset.
    ///
    /// Mean/Median apply to numeric columns only; Mode applies to
    /// categorical columns only. The target must exist and must have at
    /// least one non-missing value.
    pub fn impute_column(
        df: &DataFrame,
        column: &str,
        strategy: ImputeStrategy,
    ) -> Result<DataFrame> {
        let series = df
            .column(column)
            .map_err(|_| AnalysisError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .clone();

        if series.null_count() == series.len() {
            return Err(AnalysisError::EmptyColumn(column.to_string()));
        }

        let numeric = is_numeric_dtype(series.dtype());
        let filled = match strategy {
            ImputeStrategy::Mean | ImputeStrategy::Median if !numeric => {
                return Err(AnalysisError::InvalidStrategy {
                    column: column.to_string(),
                    strategy: strategy.as_str().to_string(),
                    reason: "column is not numeric".to_string(),
                });
            }
            ImputeStrategy::Mode if numeric => {
                return Err(AnalysisError::InvalidStrategy {
                    column: column.to_string(),
                    strategy: strategy.as_str().to_string(),
                    reason: "mode imputation applies to categorical columns".to_string(),
                });
            }
            ImputeStrategy::Mean => {
                let mean = series
                    .mean()
                    .ok_or_else(|| AnalysisError::EmptyColumn(column.to_string()))?;
                fill_numeric_nulls(&series, mean)?
            }
            ImputeStrategy::Median => {
                let median = series
                    .median()
                    .ok_or_else(|| AnalysisError::EmptyColumn(column.to_string()))?;
                fill_numeric_nulls(&series, median)?
            }
            ImputeStrategy::Mode => {
                let mode = string_mode(&series)
                    .ok_or_else(|| AnalysisError::EmptyColumn(column.to_string()))?;
                fill_string_nulls(&series, &mode)?
            }
        };

        let mut out = df.clone();
        out.replace(column, filled)?;
        Ok(out)
    }
}
