//! Error types for quote generation.

use thiserror::Error;

/// Result type for quote operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors that can abort a quote render.
///
/// Projection and substitution never fail; only template retrieval,
/// details-body extraction, and configuration handling raise errors.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Template source could not be retrieved.
    #[error("failed to load template '{source_name}': {reason}")]
    TemplateFetch { source_name: String, reason: String },

    /// The details template has no `<body>` block.
    #[error("could not find body content in the details template")]
    MissingBody,

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QuoteError {
    /// Stable numeric code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            QuoteError::TemplateFetch { .. } => 20,
            QuoteError::MissingBody => 21,
            QuoteError::IoError(_) => 60,
            QuoteError::JsonError(_) => 61,
            QuoteError::InvalidConfig(_) => 10,
        }
    }

    /// Whether the failure happened while composing the document rather than
    /// while loading inputs.
    pub fn is_composition_error(&self) -> bool {
        matches!(self, QuoteError::MissingBody)
    }
}
