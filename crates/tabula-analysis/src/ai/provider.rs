//! Narrative provider trait for abstracting LLM interactions.
//!
//! The core treats the text-generation service as opaque: statistics go in
//! as JSON, prose comes out. Implementations wrap a concrete API; the
//! session falls back to a numeric-only (degraded) result when a provider
//! fails, so implementations should return errors rather than panic.

use anyhow::Result;

/// Trait for services that turn a statistical summary into a prose report.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
pub trait NarrativeProvider: Send + Sync {
    /// Generate a natural-language report from a statistical summary.
    ///
    /// `stats` is the JSON-serialized profile (and, for what-if scenarios,
    /// the modification summary). The returned string is forwarded
    /// downstream verbatim; the core never parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or the response carries no
    /// usable text. Callers degrade to a numeric-only result.
    fn generate_report(&self, stats: &serde_json::Value) -> Result<String>;

    /// Provider name for logging and debugging.
    fn name(&self) -> &str;

    /// The model backing this provider, if it exposes one.
    fn model(&self) -> Option<&str> {
        None
    }
}
