//! Tabula Analysis
//!
//! Statistical profiling and what-if impact analysis for tabular datasets,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides the numeric core of a data-analysis assistant:
//!
//! - **Data Cleaning**: median/mode missing-value imputation over a copy
//! - **Profiling**: descriptive statistics, IQR outlier counts, and
//!   categorical value-count summaries, partitioned by column kind
//! - **What-If Scenarios**: apply a hypothetical change to one numeric
//!   column and estimate the propagated impact on correlated columns
//! - **Report Formatting**: fixed-structure markdown and JSON output
//! - **Narrative Generation**: optional LLM-backed prose reports through a
//!   provider trait (numeric results never depend on the provider)
//! - **Chart Specs**: typed histogram/bar/scatter requests producing
//!   renderer-agnostic data
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabula_analysis::{AnalysisConfig, AnalysisSession, Modification};
//! use tabula_analysis::ai::OpenRouterProvider;
//! use polars::prelude::*;
//! use std::sync::Arc;
//!
//! // Load data
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//!
//! // Option 1: with narrative generation
//! let provider = Arc::new(OpenRouterProvider::new(api_key)?);
//! let mut session = AnalysisSession::builder()
//!     .narrative_provider(provider)
//!     .build()?;
//!
//! // Option 2: numeric-only
//! let config = AnalysisConfig::builder()
//!     .generate_narrative(false)
//!     .correlation_threshold(0.2)
//!     .build()?;
//! let mut session = AnalysisSession::builder().config(config).build()?;
//!
//! // Clean once, then analyze
//! session.ingest(df)?;
//! let profile = session.profile()?;
//! let scenario = session.run_what_if(&Modification::percent_increase("salary", 10.0))?;
//! ```
//!
//! # Ownership Model
//!
//! The [`AnalysisSession`] owns the canonical cleaned dataset. Cleaning
//! happens exactly once at ingest; every later operation works on an
//! immutable borrow or a private copy, so no stage can mutate shared state
//! behind another's back.

pub mod ai;
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;
pub mod whatif;

// Re-exports for convenient access
pub use charts::ChartBuilder;
pub use cleaner::DataCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use profiler::DataProfiler;
pub use reporting::{AnalysisReport, ReportFormatter, ReportWriter};
pub use session::{AnalysisSession, AnalysisSessionBuilder};
pub use types::{
    AnalysisRequest, AnalysisResponse, CategoricalSummary, CategoryCount, ChartRequest, ChartSpec,
    ColumnChange, ColumnKind, DatasetProfile, ImpactEstimate, ImputeStrategy, MissingValueSummary,
    Modification, NumericSummary, TargetStats, WhatIfResult,
};
pub use whatif::WhatIfEngine;
