//! Error types for tfcost
//!
//! This module defines the error handling strategy for tfcost. There are two
//! error types: `TfcostError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `TfcostError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The conversion
//! happens at the CLI boundary using `anyhow::Error::from` to preserve error chains.
//!
//! The parsing and pricing core is deliberately infallible: `parse_terraform`
//! and `calculate_costs` return plain values and degrade to empty or shorter
//! output on malformed input. Errors only arise at the edges (file I/O,
//! configuration, the Gemini API boundary).
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: Configuration parsing and validation issues
//!   - Automatically converted to `TfcostError::Config` via `#[from]`
//!
//! - `MissingApiKey`: Precondition failure for `advise` - reported before any
//!   network call is made
//!
//! - `Advisor`: Any failure on the Gemini boundary (network, HTTP status,
//!   malformed or non-JSON response body). Collapsed into one opaque message;
//!   the underlying cause is preserved as `source` for debugging but no
//!   structured taxonomy is exposed to the user.

use thiserror::Error;

/// Main error type for tfcost
#[derive(Error, Debug)]
pub enum TfcostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API key is required for AI analysis: pass --api-key, set GEMINI_API_KEY, or add it to the config file")]
    MissingApiKey,

    #[error("Failed to analyze configuration with Gemini: {message}")]
    Advisor {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TfcostError>;

impl TfcostError {
    /// Wrap a failure on the Gemini boundary into the single opaque
    /// advisor error.
    pub(crate) fn advisor<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TfcostError::Advisor {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
