//! Bootstrap configuration.

use chirp_registry::DuplicatePolicy;
#[cfg(feature = "widgets")]
use chirp_widgets::WidgetTimings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration JSON could not be read.
    #[error("invalid islands config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// How [`Islands::bootstrap`](crate::Islands::bootstrap) sets up a page.
///
/// Every field has a default; `{}` is a complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandsConfig {
    /// What a second registration under the same name does.
    pub duplicate_policy: DuplicatePolicy,
    /// Delays and pacing for the stock timed widgets.
    #[cfg(feature = "widgets")]
    pub timings: WidgetTimings,
}

impl IslandsConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Set the duplicate registration policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the widget timings.
    #[cfg(feature = "widgets")]
    pub fn with_timings(mut self, timings: WidgetTimings) -> Self {
        self.timings = timings;
        self
    }
}
