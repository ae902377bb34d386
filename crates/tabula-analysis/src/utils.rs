//! Shared polars helpers used across the cleaner, profiler, and what-if
//! engine.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Non-missing values of a numeric column as `f64`, in row order.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

/// Row-aligned (a, b) pairs where both columns are non-missing.
pub fn paired_numeric_values(a: &Series, b: &Series) -> PolarsResult<Vec<(f64, f64)>> {
    let fa = a.cast(&DataType::Float64)?;
    let fb = b.cast(&DataType::Float64)?;
    let pairs = fa
        .f64()?
        .into_iter()
        .zip(fb.f64()?.into_iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .collect();
    Ok(pairs)
}

/// Most frequent value of a string-castable Series.
///
/// Ties break to the value that appears first in row order, so the result
/// is deterministic for a given column.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut counts: std::collections::HashMap<&str, (usize, usize)> =
        std::collections::HashMap::new();
    for (idx, val) in str_chunked.into_iter().flatten().enumerate() {
        let entry = counts.entry(val).or_insert((0, idx));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(val, _)| val.to_string())
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64 regardless of the input's numeric dtype.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let filled = float_series
        .f64()?
        .apply(|v| Some(v.unwrap_or(fill_value)));
    let mut out = filled.into_series();
    out.rename(series.name().clone());
    Ok(out)
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.cast(&DataType::String)?;
    let filled: StringChunked = str_series
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    let mut out = filled.into_series();
    out.rename(series.name().clone());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== is_numeric_dtype tests ====================

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    // ==================== numeric_values tests ====================

    #[test]
    fn test_numeric_values_drops_nulls() {
        let series = Series::new("v".into(), &[Some(1.0f64), None, Some(3.0)]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_numeric_values_casts_integers() {
        let series = Series::new("v".into(), &[1i64, 2, 3]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    // ==================== paired_numeric_values tests ====================

    #[test]
    fn test_paired_values_skips_rows_with_any_null() {
        let a = Series::new("a".into(), &[Some(1.0f64), None, Some(3.0), Some(4.0)]);
        let b = Series::new("b".into(), &[Some(10.0f64), Some(20.0), None, Some(40.0)]);
        let pairs = paired_numeric_values(&a, &b).unwrap();
        assert_eq!(pairs, vec![(1.0, 10.0), (4.0, 40.0)]);
    }

    // ==================== string_mode tests ====================

    #[test]
    fn test_string_mode_basic() {
        let series = Series::new("c".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaks_to_first_seen() {
        let series = Series::new("c".into(), &["b", "a", "a", "b"]);
        assert_eq!(string_mode(&series), Some("b".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("c".into(), &[None::<&str>, None, None]);
        assert_eq!(string_mode(&series), None);
    }

    // ==================== fill helpers tests ====================

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("v".into(), &[Some(1.0f64), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.name().as_str(), "v");
        assert_eq!(filled.f64().unwrap().get(1), Some(2.0));
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("c".into(), &[Some("x"), None, Some("y")]);
        let filled = fill_string_nulls(&series, "z").unwrap();
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.str().unwrap().get(1), Some("z"));
    }
}
