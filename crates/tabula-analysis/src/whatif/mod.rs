//! What-if scenario engine.
//!
//! Applies a hypothetical modification to one numeric column of a copied
//! dataset and reports the direct statistical shift plus the estimated
//! impact on correlated columns.
//!
//! The propagation formula (`correlation x percentage change`) is a linear
//! first-order approximation over observed correlations, not a causal
//! model; results describe statistical association in the data, nothing
//! stronger.

mod impact;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::profiler::{DataProfiler, quantile_sorted, sample_std};
use crate::types::{ColumnChange, Modification, TargetStats, WhatIfResult};
use crate::utils::{is_numeric_dtype, numeric_values};
use impact::estimate_impacts;
use polars::prelude::*;
use tracing::debug;

/// Executes what-if scenarios against an immutable source dataset.
pub struct WhatIfEngine;

impl WhatIfEngine {
    /// Run a scenario with the default configuration.
    pub fn run(df: &DataFrame, modification: &Modification) -> Result<WhatIfResult> {
        Self::run_with(df, modification, &AnalysisConfig::default())
    }

    /// Run a scenario: validate, measure the baseline, apply the change to
    /// a fresh copy, re-measure, and estimate propagated impact.
    ///
    /// The input dataset is never mutated. Validation failures
    /// ([`AnalysisError::ColumnNotFound`], [`AnalysisError::ColumnNotNumeric`])
    /// are returned before any statistics are computed.
    pub fn run_with(
        df: &DataFrame,
        modification: &Modification,
        config: &AnalysisConfig,
    ) -> Result<WhatIfResult> {
        let target = &modification.column;
        let column = df
            .column(target)
            .map_err(|_| AnalysisError::ColumnNotFound(target.clone()))?;
        let series = column.as_materialized_series();
        if !is_numeric_dtype(series.dtype()) {
            return Err(AnalysisError::ColumnNotNumeric(target.clone()));
        }

        let baseline_values = numeric_values(series)?;
        let baseline = Self::target_stats(&baseline_values);
        debug!(
            "What-if baseline for '{}': mean={:.4}, std={:.4}",
            target, baseline.mean, baseline.std
        );

        let modified_df = Self::apply_modification(df, modification)?;
        let modified_values =
            numeric_values(modified_df.column(target)?.as_materialized_series())?;
        let modified = Self::target_stats(&modified_values);

        let percent_changes = TargetStats {
            mean: Self::percent_change(baseline.mean, modified.mean),
            median: Self::percent_change(baseline.median, modified.median),
            std: Self::percent_change(baseline.std, modified.std),
            min: Self::percent_change(baseline.min, modified.min),
            max: Self::percent_change(baseline.max, modified.max),
        };

        let impacts = estimate_impacts(
            df,
            target,
            &modification.change,
            baseline.mean,
            config.correlation_threshold,
        )?;

        let modified_profile =
            DataProfiler::profile_dataset_with(&modified_df, config.iqr_multiplier)?;

        Ok(WhatIfResult {
            modification: modification.clone(),
            baseline,
            modified,
            percent_changes,
            impacts,
            modified_profile,
            narrative: None,
        })
    }

    /// Apply the modification to a fresh copy of the dataset.
    pub(crate) fn apply_modification(
        df: &DataFrame,
        modification: &Modification,
    ) -> Result<DataFrame> {
        let mut out = df.clone();
        let series = out
            .column(&modification.column)?
            .as_materialized_series()
            .clone();
        let float_series = series.cast(&DataType::Float64)?;
        let ca = float_series.f64()?;

        let changed = match modification.change {
            ColumnChange::PercentIncrease(p) => {
                let factor = 1.0 + p / 100.0;
                ca.apply(|v| v.map(|x| x * factor))
            }
            ColumnChange::PercentDecrease(p) => {
                let factor = 1.0 - p / 100.0;
                ca.apply(|v| v.map(|x| x * factor))
            }
            ColumnChange::SetValue(value) => {
                Float64Chunked::full(series.name().clone(), value, series.len())
            }
        };

        let mut changed = changed.into_series();
        changed.rename(series.name().clone());
        out.replace(&modification.column, changed)?;
        Ok(out)
    }

    /// The five tracked statistics over non-missing values.
    fn target_stats(values: &[f64]) -> TargetStats {
        if values.is_empty() {
            return TargetStats {
                mean: 0.0,
                median: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        TargetStats {
            mean,
            median: quantile_sorted(&sorted, 0.5),
            std: sample_std(&sorted, mean),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        }
    }

    /// `(new - old) / |old| * 100`, defined as 0 when old == 0.
    fn percent_change(old: f64, new: f64) -> f64 {
        if old == 0.0 {
            0.0
        } else {
            (new - old) / old.abs() * 100.0
        }
    }
}
