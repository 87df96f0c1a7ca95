// File: crates/streamline-core/src/error.rs
// Summary: Error type for the fallible edges of the core (options, colours, config files).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("invalid colour `{0}`")]
    InvalidColor(String),

    #[error("failed to parse chart config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChartError {
    pub(crate) fn option(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption { name, reason: reason.into() }
    }
}
