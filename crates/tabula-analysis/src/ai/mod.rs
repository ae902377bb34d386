//! Narrative generation via external LLM providers.
//!
//! The numeric core never depends on a provider's response for
//! correctness; prose is attached to results when available and marked
//! unavailable otherwise.
//!
//! # Feature Flag
//!
//! The [`NarrativeProvider`] trait is always available for custom
//! implementations. The concrete [`OpenRouterProvider`] requires the `ai`
//! feature (enabled by default):
//!
//! ```toml
//! # Disable AI support for a smaller binary
//! tabula-analysis = { version = "0.1", default-features = false }
//! ```

// Provider trait is always available (for custom implementations)
mod provider;
pub use provider::NarrativeProvider;

// Concrete providers require the "ai" feature
#[cfg(feature = "ai")]
mod openrouter;

#[cfg(feature = "ai")]
pub use openrouter::{OpenRouterConfig, OpenRouterConfigBuilder, OpenRouterProvider};
