//! Core data model for profiling, what-if analysis, and chart requests.
//!
//! Everything here is plain serializable data: profiles and what-if results
//! are handed to frontends and to the narrative provider as JSON, so every
//! type derives `Serialize`/`Deserialize` and carries no polars handles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Profiles
// ============================================================================

/// The kind of a profiled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Descriptive statistics for a numeric column.
///
/// `std` is the sample standard deviation (Bessel's correction); quartiles
/// are computed by linear interpolation on the sorted non-missing values.
/// An all-missing column yields `count == 0` with zeroed statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Values outside the `[Q1 - m*IQR, Q3 + m*IQR]` fence.
    pub outlier_count: usize,
}

/// Value frequencies for a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Exact value -> occurrence count mapping over distinct non-missing values.
    pub value_counts: BTreeMap<String, usize>,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
}

/// Statistical profile of a whole dataset.
///
/// Invariant: `numeric` and `categorical` partition the dataset's columns —
/// every column appears in exactly one of the two maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// (rows, columns) of the profiled dataset.
    pub shape: (usize, usize),
    pub numeric: BTreeMap<String, NumericSummary>,
    pub categorical: BTreeMap<String, CategoricalSummary>,
}

impl DatasetProfile {
    /// Which partition a column landed in, if any.
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        if self.numeric.contains_key(name) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.contains_key(name) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Total number of profiled columns across both partitions.
    pub fn column_count(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }
}

// ============================================================================
// What-if modifications
// ============================================================================

/// The transformation applied to every value of the target column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColumnChange {
    /// Multiply every value by `1 + p/100`.
    PercentIncrease(f64),
    /// Multiply every value by `1 - p/100`.
    PercentDecrease(f64),
    /// Replace every value with `v`.
    SetValue(f64),
}

/// A hypothetical modification of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub column: String,
    pub change: ColumnChange,
}

impl Modification {
    pub fn percent_increase(column: impl Into<String>, percent: f64) -> Self {
        Self {
            column: column.into(),
            change: ColumnChange::PercentIncrease(percent),
        }
    }

    pub fn percent_decrease(column: impl Into<String>, percent: f64) -> Self {
        Self {
            column: column.into(),
            change: ColumnChange::PercentDecrease(percent),
        }
    }

    pub fn set_value(column: impl Into<String>, value: f64) -> Self {
        Self {
            column: column.into(),
            change: ColumnChange::SetValue(value),
        }
    }

    /// Human-readable description of the applied change.
    pub fn describe(&self) -> String {
        match self.change {
            ColumnChange::PercentIncrease(p) => {
                format!("increased all {} values by {}%", self.column, p)
            }
            ColumnChange::PercentDecrease(p) => {
                format!("decreased all {} values by {}%", self.column, p)
            }
            ColumnChange::SetValue(v) => format!("set all {} values to {}", self.column, v),
        }
    }
}

/// The five statistics tracked before and after a modification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl TargetStats {
    /// (label, value) pairs in presentation order.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Std Dev", self.std),
            ("Min", self.min),
            ("Max", self.max),
        ]
    }
}

/// Estimated effect of a modification on one correlated column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub column: String,
    /// Pearson correlation with the target, computed on the unmodified data.
    pub correlation: f64,
    /// Estimated percentage change propagated through the correlation.
    pub estimated_impact: f64,
}

impl ImpactEstimate {
    /// Qualitative strength label: |r| > 0.7 Strong, > 0.3 Moderate, else Weak.
    pub fn strength_label(&self) -> &'static str {
        let r = self.correlation.abs();
        if r > 0.7 {
            "Strong"
        } else if r > 0.3 {
            "Moderate"
        } else {
            "Weak"
        }
    }

    /// Sign-based direction label.
    pub fn direction_label(&self) -> &'static str {
        if self.correlation > 0.0 {
            "positive"
        } else {
            "negative"
        }
    }
}

/// Structured result of a what-if scenario.
///
/// `impacts` is ordered by descending absolute correlation; `narrative` is
/// `None` when no provider is configured or the provider failed (the numeric
/// sections remain valid either way).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub modification: Modification,
    pub baseline: TargetStats,
    pub modified: TargetStats,
    /// Per-stat percentage change `(new - old) / |old| * 100`, 0 when old == 0.
    pub percent_changes: TargetStats,
    pub impacts: Vec<ImpactEstimate>,
    /// Full re-profile of the modified dataset.
    pub modified_profile: DatasetProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

// ============================================================================
// Cleaning
// ============================================================================

/// Missing-value counts for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueSummary {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Explicit single-column imputation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Mean of non-missing values (numeric columns only).
    Mean,
    /// Median of non-missing values (numeric columns only).
    Median,
    /// Most frequent value, first mode on ties (categorical columns only).
    Mode,
}

impl ImputeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

// ============================================================================
// Chart requests
// ============================================================================

/// A typed chart request, replacing free-text tool dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartRequest {
    /// Distribution of one numeric column.
    Histogram { column: String },
    /// Value counts of one categorical column.
    Bar { column: String },
    /// Relationship between two numeric columns.
    Scatter { x: String, y: String },
}

/// One (value, count) bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Renderer-agnostic chart data. The core never draws anything; a frontend
/// turns these specs into actual plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Histogram {
        title: String,
        column: String,
        values: Vec<f64>,
    },
    Bar {
        title: String,
        column: String,
        /// Bars in descending count order (ties alphabetical).
        counts: Vec<CategoryCount>,
    },
    Scatter {
        title: String,
        x: String,
        y: String,
        points: Vec<(f64, f64)>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            Self::Histogram { title, .. } | Self::Bar { title, .. } | Self::Scatter { title, .. } => {
                title
            }
        }
    }
}

// ============================================================================
// Session commands
// ============================================================================

/// Tagged union of everything a frontend can ask the session to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Profile,
    WhatIf(Modification),
    Chart(ChartRequest),
}

/// Response union matching [`AnalysisRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Profile(DatasetProfile),
    WhatIf(Box<WhatIfResult>),
    Chart(ChartSpec),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_describe() {
        let m = Modification::percent_increase("salary", 10.0);
        assert_eq!(m.describe(), "increased all salary values by 10%");

        let m = Modification::set_value("salary", 50000.0);
        assert_eq!(m.describe(), "set all salary values to 50000");
    }

    #[test]
    fn test_modification_serde_tagging() {
        let m = Modification::percent_decrease("price", 5.0);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"kind\":\"percent_decrease\""));
        assert!(json.contains("\"value\":5.0"));

        let back: Modification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_impact_strength_labels() {
        let mk = |r: f64| ImpactEstimate {
            column: "x".to_string(),
            correlation: r,
            estimated_impact: 0.0,
        };
        assert_eq!(mk(0.9).strength_label(), "Strong");
        assert_eq!(mk(-0.8).strength_label(), "Strong");
        assert_eq!(mk(0.5).strength_label(), "Moderate");
        assert_eq!(mk(0.2).strength_label(), "Weak");
        assert_eq!(mk(0.9).direction_label(), "positive");
        assert_eq!(mk(-0.5).direction_label(), "negative");
    }

    #[test]
    fn test_profile_column_kind() {
        let mut profile = DatasetProfile {
            shape: (3, 2),
            numeric: BTreeMap::new(),
            categorical: BTreeMap::new(),
        };
        profile.numeric.insert(
            "age".to_string(),
            NumericSummary {
                count: 3,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                q1: 0.0,
                median: 0.0,
                q3: 0.0,
                max: 0.0,
                outlier_count: 0,
            },
        );
        profile.categorical.insert(
            "city".to_string(),
            CategoricalSummary {
                value_counts: BTreeMap::new(),
                distinct_count: 0,
            },
        );

        assert_eq!(profile.column_kind("age"), Some(ColumnKind::Numeric));
        assert_eq!(profile.column_kind("city"), Some(ColumnKind::Categorical));
        assert_eq!(profile.column_kind("missing"), None);
        assert_eq!(profile.column_count(), 2);
    }

    #[test]
    fn test_chart_request_serde() {
        let r = ChartRequest::Scatter {
            x: "age".to_string(),
            y: "salary".to_string(),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"chart\":\"scatter\""));

        let back: ChartRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_chart_spec_title() {
        let spec = ChartSpec::Bar {
            title: "Value Counts of city".to_string(),
            column: "city".to_string(),
            counts: vec![],
        };
        assert_eq!(spec.title(), "Value Counts of city");
    }

    #[test]
    fn test_target_stats_field_order() {
        let stats = TargetStats {
            mean: 1.0,
            median: 2.0,
            std: 3.0,
            min: 4.0,
            max: 5.0,
        };
        let labels: Vec<&str> = stats.fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Mean", "Median", "Std Dev", "Min", "Max"]);
    }
}
