//! Analysis session: explicit ownership of the canonical dataset.
//!
//! The session is the single owner of the cleaned dataset. It is created
//! through a builder, ingests raw data exactly once per dataset (cleaning
//! happens at ingest, never again), and hands immutable views to every
//! downstream consumer. What-if scenarios always branch from a copy; the
//! canonical dataset is never written after ingest.

use crate::ai::NarrativeProvider;
use crate::charts::ChartBuilder;
use crate::cleaner::DataCleaner;
use crate::config::{AnalysisConfig, ConfigValidationError};
use crate::error::{AnalysisError, Result};
use crate::profiler::DataProfiler;
use crate::reporting::AnalysisReport;
use crate::types::{
    AnalysisRequest, AnalysisResponse, ChartRequest, ChartSpec, DatasetProfile, Modification,
    WhatIfResult,
};
use crate::whatif::WhatIfEngine;
use polars::prelude::*;
use std::sync::Arc;
use tracing::{info, warn};

/// A single-user analysis session over one canonical dataset.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_analysis::{AnalysisSession, Modification};
///
/// let mut session = AnalysisSession::builder().build()?;
/// session.ingest(df)?;
///
/// let profile = session.profile()?;
/// let result = session.run_what_if(&Modification::percent_increase("salary", 10.0))?;
/// ```
pub struct AnalysisSession {
    config: AnalysisConfig,
    narrative_provider: Option<Arc<dyn NarrativeProvider>>,
    canonical: Option<DataFrame>,
    cleaning_actions: Vec<String>,
}

impl AnalysisSession {
    /// Create a new session builder.
    pub fn builder() -> AnalysisSessionBuilder {
        AnalysisSessionBuilder::default()
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Clean a raw dataset and store it as the canonical copy.
    ///
    /// This is the only point where the canonical dataset is written.
    /// Ingesting again replaces the session's dataset wholesale (a new
    /// analysis, not a mutation of the old one).
    pub fn ingest(&mut self, df: DataFrame) -> Result<&[String]> {
        let (cleaned, actions) = DataCleaner::clean(&df)?;
        info!(
            "Ingested dataset {:?}; {} cleaning action(s)",
            cleaned.shape(),
            actions.len()
        );
        self.canonical = Some(cleaned);
        self.cleaning_actions = actions;
        Ok(&self.cleaning_actions)
    }

    /// Immutable view of the canonical cleaned dataset.
    pub fn canonical(&self) -> Result<&DataFrame> {
        self.canonical.as_ref().ok_or(AnalysisError::NoDataLoaded)
    }

    /// Actions taken by the cleaner at ingest.
    pub fn cleaning_actions(&self) -> &[String] {
        &self.cleaning_actions
    }

    /// Profile the canonical dataset.
    pub fn profile(&self) -> Result<DatasetProfile> {
        DataProfiler::profile_dataset_with(self.canonical()?, self.config.iqr_multiplier)
    }

    /// Run a what-if scenario against a copy of the canonical dataset,
    /// attaching a narrative when a provider is configured.
    ///
    /// Provider failures degrade the result (narrative `None`) instead of
    /// failing the scenario; the numeric sections are always valid.
    pub fn run_what_if(&self, modification: &Modification) -> Result<WhatIfResult> {
        let mut result = WhatIfEngine::run_with(self.canonical()?, modification, &self.config)?;

        if self.config.generate_narrative {
            let payload = serde_json::json!({
                "modification": result.modification,
                "baseline": result.baseline,
                "modified": result.modified,
                "percent_changes": result.percent_changes,
                "modified_profile": result.modified_profile,
            });
            result.narrative = self.generate_narrative(&payload);
        }

        Ok(result)
    }

    /// Build a chart spec from the canonical dataset.
    pub fn chart(&self, request: &ChartRequest) -> Result<ChartSpec> {
        ChartBuilder::build(self.canonical()?, request)
    }

    /// Typed command entry point for frontends.
    pub fn dispatch(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        match request {
            AnalysisRequest::Profile => Ok(AnalysisResponse::Profile(self.profile()?)),
            AnalysisRequest::WhatIf(modification) => Ok(AnalysisResponse::WhatIf(Box::new(
                self.run_what_if(modification)?,
            ))),
            AnalysisRequest::Chart(chart) => Ok(AnalysisResponse::Chart(self.chart(chart)?)),
        }
    }

    /// Produce the full analysis report: profile plus optional narrative.
    pub fn analyze(&self, input_name: &str) -> Result<AnalysisReport> {
        let profile = self.profile()?;

        let narrative = if self.config.generate_narrative {
            self.generate_narrative(&serde_json::to_value(&profile)?)
        } else {
            None
        };

        Ok(AnalysisReport::new(
            input_name,
            self.cleaning_actions.clone(),
            profile,
            None,
            narrative,
        ))
    }

    fn generate_narrative(&self, payload: &serde_json::Value) -> Option<String> {
        let provider = self.narrative_provider.as_ref()?;
        match provider.generate_report(payload) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    "Narrative provider '{}' failed: {}; returning numeric-only result",
                    provider.name(),
                    e
                );
                None
            }
        }
    }
}

/// Builder for [`AnalysisSession`].
#[derive(Default)]
pub struct AnalysisSessionBuilder {
    config: Option<AnalysisConfig>,
    narrative_provider: Option<Arc<dyn NarrativeProvider>>,
}

impl AnalysisSessionBuilder {
    /// Set the analysis configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Attach a narrative provider.
    pub fn narrative_provider(mut self, provider: Arc<dyn NarrativeProvider>) -> Self {
        self.narrative_provider = Some(provider);
        self
    }

    /// Build the session, validating the configuration.
    pub fn build(self) -> std::result::Result<AnalysisSession, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(AnalysisSession {
            config,
            narrative_provider: self.narrative_provider,
            canonical: None,
            cleaning_actions: Vec::new(),
        })
    }
}
