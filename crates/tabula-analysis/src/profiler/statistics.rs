//! Numeric summary statistics for column profiling.

use crate::types::NumericSummary;

/// Quantile by linear interpolation at `q * (n - 1)` on sorted values.
///
/// Callers must pass a non-empty, ascending slice.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

/// Sample standard deviation with Bessel's correction; 0.0 for n <= 1.
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Count values outside the `[q1 - m*iqr, q3 + m*iqr]` fence.
pub(crate) fn count_outliers(values: &[f64], q1: f64, q3: f64, multiplier: f64) -> usize {
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;
    values.iter().filter(|&&v| v < lower || v > upper).count()
}

/// Full numeric summary of a column's non-missing values.
///
/// An empty slice (all-missing column) yields count 0 with zeroed
/// statistics; profiling never fails on degenerate columns.
pub(crate) fn describe_numeric(values: &[f64], iqr_multiplier: f64) -> NumericSummary {
    if values.is_empty() {
        return NumericSummary {
            count: 0,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            max: 0.0,
            outlier_count: 0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = sample_std(&sorted, mean);
    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let outlier_count = count_outliers(&sorted, q1, q3, iqr_multiplier);

    NumericSummary {
        count,
        mean,
        std,
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[count - 1],
        outlier_count,
    }
}
