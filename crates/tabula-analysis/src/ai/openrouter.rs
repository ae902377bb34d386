//! OpenRouter narrative provider.
//!
//! Implements [`NarrativeProvider`] against the OpenRouter API
//! (<https://openrouter.ai/>), which fronts multiple LLM models behind one
//! chat-completions endpoint.

use super::NarrativeProvider;
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenRouter API endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for report generation.
const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default temperature (moderate; reports benefit from some variation).
const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Default max tokens for a full report.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// The model to use (e.g., "deepseek/deepseek-chat", "openai/gpt-4").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OpenRouterConfig {
    /// Create a new configuration builder.
    pub fn builder() -> OpenRouterConfigBuilder {
        OpenRouterConfigBuilder::default()
    }
}

/// Builder for [`OpenRouterConfig`].
#[derive(Default)]
pub struct OpenRouterConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl OpenRouterConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenRouterConfig {
        OpenRouterConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// OpenRouter-backed narrative provider.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_analysis::ai::{OpenRouterConfig, OpenRouterProvider};
///
/// let provider = OpenRouterProvider::new("your-api-key")?;
///
/// let custom = OpenRouterProvider::with_config(
///     "your-api-key",
///     OpenRouterConfig::builder().model("openai/gpt-4").build(),
/// )?;
/// ```
pub struct OpenRouterProvider {
    api_key: String,
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, OpenRouterConfig::default())
    }

    /// Create a provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn build_report_prompt(&self, stats: &serde_json::Value) -> String {
        format!(
            "You are an expert data analyst. Your job is to take a JSON object containing \
            a statistical summary of a dataset and write a clear, concise, and insightful \
            report for a business audience.\n\n\
            Here is the statistical summary you need to analyze:\n{}\n\n\
            Please structure your report with the following sections, using markdown for \
            formatting:\n\n\
            ### 1. Executive Summary\n\
            A brief, high-level overview of the most critical findings.\n\n\
            ### 2. Key Statistical Findings\n\
            - Describe the main characteristics of the numerical data. Mention the average, \
            median, and range.\n\
            - Discuss the distribution of the categorical data.\n\n\
            ### 3. Data Quality & Outliers\n\
            - Point out any potential data quality issues based on the outlier counts, and \
            what they might imply (data entry errors, or genuinely exceptional cases).\n\n\
            ### 4. Actionable Business Insights\n\
            - Provide 1-2 concrete insights a business could act on.\n\n\
            Generate the report based on the provided JSON data.",
            stats
        )
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "OpenRouter API Error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: ChatResponse = response.json()?;
        let text = result
            .choices
            .as_ref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.message.as_ref())
            .map(|msg| msg.content.clone())
            .ok_or_else(|| anyhow!("No response content from OpenRouter API"))?;

        Ok(text)
    }
}

impl NarrativeProvider for OpenRouterProvider {
    fn generate_report(&self, stats: &serde_json::Value) -> Result<String> {
        let prompt = self.build_report_prompt(stats);
        self.call_api(&prompt)
    }

    fn name(&self) -> &str {
        "OpenRouter"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenRouterConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = OpenRouterConfig::builder()
            .model("openai/gpt-4")
            .temperature(0.2)
            .max_tokens(256)
            .build();

        assert_eq!(config.model, "openai/gpt-4");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_provider_exposes_model() {
        let provider = OpenRouterProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "OpenRouter");
        assert_eq!(provider.model(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn test_prompt_embeds_stats_and_sections() {
        let provider = OpenRouterProvider::new("test-key").unwrap();
        let stats = serde_json::json!({"numeric": {"salary": {"mean": 42.0}}});
        let prompt = provider.build_report_prompt(&stats);

        assert!(prompt.contains("\"salary\""));
        assert!(prompt.contains("Executive Summary"));
        assert!(prompt.contains("Data Quality & Outliers"));
        assert!(prompt.contains("Actionable Business Insights"));
    }
}
