//! Chart specification building.
//!
//! Turns typed [`ChartRequest`]s into serializable [`ChartSpec`]s a
//! frontend can render. No drawing happens here; the specs carry the data
//! series and a title, nothing renderer-specific.

use crate::error::{AnalysisError, Result};
use crate::types::{CategoryCount, ChartRequest, ChartSpec};
use crate::utils::{is_numeric_dtype, numeric_values, paired_numeric_values};
use polars::prelude::*;
use std::collections::HashMap;

/// Builds chart specs from a dataset and a typed request.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Validate the request against the dataset and build its spec.
    pub fn build(df: &DataFrame, request: &ChartRequest) -> Result<ChartSpec> {
        match request {
            ChartRequest::Histogram { column } => Self::histogram(df, column),
            ChartRequest::Bar { column } => Self::bar(df, column),
            ChartRequest::Scatter { x, y } => Self::scatter(df, x, y),
        }
    }

    fn histogram(df: &DataFrame, column: &str) -> Result<ChartSpec> {
        let series = Self::column_or_listing(df, column)?;
        if !is_numeric_dtype(series.dtype()) {
            return Err(AnalysisError::ColumnNotNumeric(column.to_string())
                .with_context("Histograms require numerical data"));
        }

        Ok(ChartSpec::Histogram {
            title: format!("Distribution of {column}"),
            column: column.to_string(),
            values: numeric_values(series)?,
        })
    }

    fn bar(df: &DataFrame, column: &str) -> Result<ChartSpec> {
        let series = Self::column_or_listing(df, column)?;
        let non_null = series.drop_nulls();

        let mut counts: HashMap<String, usize> = HashMap::new();
        if !non_null.is_empty() {
            let str_series = non_null.cast(&DataType::String)?;
            for val in str_series.str()?.into_iter().flatten() {
                *counts.entry(val.to_string()).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(value, count)| CategoryCount { value, count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));

        Ok(ChartSpec::Bar {
            title: format!("Value Counts of {column}"),
            column: column.to_string(),
            counts,
        })
    }

    fn scatter(df: &DataFrame, x: &str, y: &str) -> Result<ChartSpec> {
        let x_series = Self::column_or_listing(df, x)?;
        let y_series = Self::column_or_listing(df, y)?;

        for (name, series) in [(x, x_series), (y, y_series)] {
            if !is_numeric_dtype(series.dtype()) {
                return Err(AnalysisError::ColumnNotNumeric(name.to_string())
                    .with_context("Scatter plots require numerical data"));
            }
        }

        Ok(ChartSpec::Scatter {
            title: format!("Relationship between {x} and {y}"),
            x: x.to_string(),
            y: y.to_string(),
            points: paired_numeric_values(x_series, y_series)?,
        })
    }

    /// Resolve a column, listing the available ones in the error message.
    fn column_or_listing<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Series> {
        df.column(column)
            .map(|c| c.as_materialized_series())
            .map_err(|_| {
                let available: Vec<String> = df
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                AnalysisError::ColumnNotFound(column.to_string())
                    .with_context(format!("Available columns: {}", available.join(", ")))
            })
    }
}
