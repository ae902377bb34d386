//! Categorical column summarization.

use crate::error::Result;
use crate::types::CategoricalSummary;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Exact value -> count mapping plus distinct count over non-missing values.
pub(crate) fn summarize_categorical(series: &Series) -> Result<CategoricalSummary> {
    let non_null = series.drop_nulls();

    let mut value_counts: BTreeMap<String, usize> = BTreeMap::new();
    if !non_null.is_empty() {
        let str_series = non_null.cast(&DataType::String)?;
        for val in str_series.str()?.into_iter().flatten() {
            *value_counts.entry(val.to_string()).or_insert(0) += 1;
        }
    }

    let distinct_count = value_counts.len();
    Ok(CategoricalSummary {
        value_counts,
        distinct_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_and_distinct() {
        let series = Series::new("city".into(), &["NY", "NY", "Boston", "NY", "Chicago"]);
        let summary = summarize_categorical(&series).unwrap();

        assert_eq!(summary.distinct_count, 3);
        assert_eq!(summary.value_counts["NY"], 3);
        assert_eq!(summary.value_counts["Boston"], 1);
        assert_eq!(summary.value_counts["Chicago"], 1);
    }

    #[test]
    fn test_summarize_excludes_nulls() {
        let series = Series::new("city".into(), &[Some("NY"), None, Some("NY")]);
        let summary = summarize_categorical(&series).unwrap();

        assert_eq!(summary.distinct_count, 1);
        assert_eq!(summary.value_counts["NY"], 2);
        assert_eq!(summary.value_counts.values().sum::<usize>(), 2);
    }

    #[test]
    fn test_summarize_all_null_column() {
        let series = Series::new("city".into(), &[None::<&str>, None]);
        let summary = summarize_categorical(&series).unwrap();

        assert_eq!(summary.distinct_count, 0);
        assert!(summary.value_counts.is_empty());
    }
}
