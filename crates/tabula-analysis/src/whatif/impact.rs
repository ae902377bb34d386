//! Correlation-based impact propagation.

use crate::error::{AnalysisError, Result};
use crate::types::{ColumnChange, ImpactEstimate};
use crate::utils::{is_numeric_dtype, paired_numeric_values};
use polars::prelude::*;

/// Pearson correlation coefficient of row-aligned pairs.
///
/// Returns 0.0 for degenerate inputs (fewer than two pairs, or zero
/// variance on either side) so callers can treat "no measurable
/// relationship" uniformly.
pub(crate) fn pearson_correlation(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    if n < 2.0 {
        return 0.0;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 { 0.0 } else { cov / denom }
}

/// The percentage change the modification applies to the target column,
/// signed. For set-to-value this is the implied change of the mean, which
/// is undefined for a zero baseline mean.
pub(crate) fn applied_percent_change(
    target: &str,
    change: &ColumnChange,
    baseline_mean: f64,
) -> Result<f64> {
    match change {
        ColumnChange::PercentIncrease(p) => Ok(*p),
        ColumnChange::PercentDecrease(p) => Ok(-p),
        ColumnChange::SetValue(v) => {
            if baseline_mean == 0.0 {
                return Err(AnalysisError::ZeroBaselineMean(target.to_string()));
            }
            Ok((v - baseline_mean) / baseline_mean * 100.0)
        }
    }
}

/// Estimate the propagated impact on every other numeric column.
///
/// Correlations are computed on the original, unmodified dataset. Columns
/// with |r| at or below the materiality threshold are omitted. The result
/// is ordered by descending absolute correlation.
pub(crate) fn estimate_impacts(
    df: &DataFrame,
    target: &str,
    change: &ColumnChange,
    baseline_mean: f64,
    threshold: f64,
) -> Result<Vec<ImpactEstimate>> {
    let percent = applied_percent_change(target, change, baseline_mean)?;
    let target_series = df.column(target)?.as_materialized_series();

    let mut impacts = Vec::new();
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.name().as_str() == target || !is_numeric_dtype(series.dtype()) {
            continue;
        }

        let pairs = paired_numeric_values(target_series, series)?;
        let correlation = pearson_correlation(&pairs);
        if correlation.abs() <= threshold {
            continue;
        }

        impacts.push(ImpactEstimate {
            column: series.name().to_string(),
            correlation,
            estimated_impact: correlation * percent,
        });
    }

    impacts.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    Ok(impacts)
}
