//! Error types for the analysis core.
//!
//! The taxonomy separates validation failures (bad user input, surfaced as
//! readable messages at the boundary) from computation failures (degenerate
//! numeric cases that must be reported, not coerced). Errors serialize as a
//! `code` + `message` struct so frontends can branch on the code.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Operation requires a numeric column but the target is not numeric.
    #[error("Column '{0}' is not numeric")]
    ColumnNotNumeric(String),

    /// Column has no non-missing values, so no fill statistic exists for it.
    #[error("Column '{0}' is entirely missing; no median or mode can be computed")]
    EmptyColumn(String),

    /// Imputation strategy does not apply to the target column's kind.
    #[error("Strategy '{strategy}' is not valid for column '{column}': {reason}")]
    InvalidStrategy {
        column: String,
        strategy: String,
        reason: String,
    },

    /// Set-to-value impact estimation with a zero baseline mean.
    #[error(
        "Baseline mean of column '{0}' is zero; implied percentage change is undefined"
    )]
    ZeroBaselineMean(String),

    /// No dataset has been ingested into the session yet.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (narrative provider, only with "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::ColumnNotNumeric(_) => "COLUMN_NOT_NUMERIC",
            Self::EmptyColumn(_) => "EMPTY_COLUMN",
            Self::InvalidStrategy { .. } => "INVALID_STRATEGY",
            Self::ZeroBaselineMean(_) => "ZERO_BASELINE_MEAN",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error represents invalid user input rather than an
    /// internal failure. Validation errors are surfaced as messages and
    /// never crash the process.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::ColumnNotFound(_)
            | Self::ColumnNotNumeric(_)
            | Self::EmptyColumn(_)
            | Self::InvalidStrategy { .. }
            | Self::NoDataLoaded => true,
            Self::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// Check if this error is a degenerate-numeric computation failure.
    pub fn is_computation(&self) -> bool {
        match self {
            Self::ZeroBaselineMean(_) => true,
            Self::WithContext { source, .. } => source.is_computation(),
            _ => false,
        }
    }
}

/// Errors serialize as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::ColumnNotFound("salary".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            AnalysisError::ZeroBaselineMean("bonus".to_string()).error_code(),
            "ZERO_BASELINE_MEAN"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(AnalysisError::ColumnNotFound("x".to_string()).is_validation());
        assert!(AnalysisError::ColumnNotNumeric("x".to_string()).is_validation());
        assert!(AnalysisError::NoDataLoaded.is_validation());
        assert!(!AnalysisError::ZeroBaselineMean("x".to_string()).is_validation());
    }

    #[test]
    fn test_is_computation() {
        assert!(AnalysisError::ZeroBaselineMean("x".to_string()).is_computation());
        assert!(!AnalysisError::ColumnNotFound("x".to_string()).is_computation());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context_preserves_code() {
        let error = AnalysisError::ColumnNotNumeric("city".to_string())
            .with_context("During what-if validation");
        assert!(error.to_string().contains("During what-if validation"));
        assert_eq!(error.error_code(), "COLUMN_NOT_NUMERIC");
        assert!(error.is_validation());
    }
}
