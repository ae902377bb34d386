//! Configuration for the analysis session.
//!
//! Uses the builder pattern for ergonomic setup; `build()` validates the
//! numeric thresholds before handing out a config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Default materiality threshold: correlations at or below this absolute
/// value are excluded from impact reporting.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.1;

/// Default IQR fence multiplier for outlier detection.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Configuration for profiling, what-if analysis, and report output.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .correlation_threshold(0.2)
///     .generate_narrative(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum |correlation| for a column to appear in impact estimates.
    /// Default: 0.1
    pub correlation_threshold: f64,

    /// IQR fence multiplier for outlier counting.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Whether to request a narrative from the configured provider.
    /// Default: true
    pub generate_narrative: bool,

    /// Output directory for emitted JSON reports.
    /// Default: "./outputs"
    pub output_dir: PathBuf,

    /// Custom output file name (without extension).
    /// If None, the report stem is derived from the input file name.
    /// Default: None
    pub output_name: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            generate_narrative: true,
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier {
                value: self.iqr_multiplier,
            });
        }
        Ok(())
    }
}

/// Validation errors for [`AnalysisConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("{field} must be in [0.0, 1.0), got {value}")]
    InvalidThreshold { field: String, value: f64 },

    #[error("iqr_multiplier must be a positive finite number, got {value}")]
    InvalidMultiplier { value: f64 },
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    correlation_threshold: Option<f64>,
    iqr_multiplier: Option<f64>,
    generate_narrative: Option<bool>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
}

impl AnalysisConfigBuilder {
    /// Set the correlation materiality threshold (must be in [0.0, 1.0)).
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the IQR fence multiplier (must be > 0).
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Enable or disable narrative generation.
    pub fn generate_narrative(mut self, enabled: bool) -> Self {
        self.generate_narrative = Some(enabled);
        self
    }

    /// Set the output directory for emitted reports.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set a custom output file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            generate_narrative: self
                .generate_narrative
                .unwrap_or(defaults.generate_narrative),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name.or(defaults.output_name),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.correlation_threshold, 0.1);
        assert_eq!(config.iqr_multiplier, 1.5);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::builder()
            .correlation_threshold(0.25)
            .iqr_multiplier(3.0)
            .generate_narrative(false)
            .output_name("report")
            .build()
            .unwrap();

        assert_eq!(config.correlation_threshold, 0.25);
        assert_eq!(config.iqr_multiplier, 3.0);
        assert!(!config.generate_narrative);
        assert_eq!(config.output_name.as_deref(), Some("report"));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = AnalysisConfig::builder()
            .correlation_threshold(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigValidationError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let err = AnalysisConfig::builder()
            .iqr_multiplier(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigValidationError::InvalidMultiplier { .. }));

        let err = AnalysisConfig::builder()
            .iqr_multiplier(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigValidationError::InvalidMultiplier { .. }));
    }
}
