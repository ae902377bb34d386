//! Dataset profiling.
//!
//! Partitions a dataset's columns into numeric and categorical summaries:
//! descriptive statistics with IQR outlier counts for numeric columns,
//! value-count maps for everything else. Profiling is read-only and
//! deterministic; degenerate columns (all-missing) produce empty summaries
//! rather than errors.

mod categorical;
mod statistics;

pub(crate) use statistics::{describe_numeric, quantile_sorted, sample_std};

use crate::config::DEFAULT_IQR_MULTIPLIER;
use crate::error::Result;
use crate::types::DatasetProfile;
use crate::utils::{is_numeric_dtype, numeric_values};
use categorical::summarize_categorical;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Statistical profiler for tabular datasets.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile a dataset with the default 1.5x IQR fence.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetProfile> {
        Self::profile_dataset_with(df, DEFAULT_IQR_MULTIPLIER)
    }

    /// Profile a dataset with a custom IQR fence multiplier.
    ///
    /// Every column lands in exactly one partition: numeric dtypes get a
    /// [`crate::types::NumericSummary`], all other dtypes (strings,
    /// booleans, dates) are summarized as categorical. A dataset with no
    /// columns of one kind yields an empty map for that kind.
    pub fn profile_dataset_with(df: &DataFrame, iqr_multiplier: f64) -> Result<DatasetProfile> {
        let mut numeric = BTreeMap::new();
        let mut categorical = BTreeMap::new();

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let name = series.name().to_string();

            if is_numeric_dtype(series.dtype()) {
                let values = numeric_values(series)?;
                numeric.insert(name, describe_numeric(&values, iqr_multiplier));
            } else {
                categorical.insert(name, summarize_categorical(series)?);
            }
        }

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            numeric,
            categorical,
        })
    }
}
