//! Error types for the FMP provider crate.
//!
//! [`FmpError`] covers every failure a fetcher or the registry can surface.
//! Nothing here is retried: the host decides what to do with an error.

use thiserror::Error;

/// Errors that can occur while validating, fetching or transforming FMP data.
#[derive(Error, Debug)]
pub enum FmpError {
    /// Query parameters were missing or malformed, or a raw record could not
    /// be mapped onto the output schema.
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of the validation failure
        message: String,
    },

    /// Every requested symbol came back without data.
    #[error("No data returned for symbols: {}", symbols.join(","))]
    EmptyData {
        /// The symbols that were requested
        symbols: Vec<String>,
    },

    /// The registry has no fetcher under the requested name.
    #[error("Unknown fetcher: {0}")]
    UnknownFetcher(String),

    /// FMP answered with a non-success status or an error payload.
    #[error("Provider error: {status:?} - {message}")]
    Provider {
        /// HTTP status, when the failure came with one
        status: Option<u16>,
        /// The error message from the provider
        message: String,
    },

    /// A response body was not JSON of the expected shape.
    #[error("Failed to parse response for {symbol}: {message}")]
    Parse {
        /// Symbol whose response could not be parsed
        symbol: String,
        /// Parser message
        message: String,
    },

    /// Environment configuration could not be read.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of the bad setting
        message: String,
    },

    /// Output records could not be converted to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A network error occurred while communicating with FMP.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FmpError {
    /// Shorthand for a [`FmpError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than upstream data.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether the call failed because no symbol produced any record.
    pub fn is_empty_data(&self) -> bool {
        matches!(self, Self::EmptyData { .. })
    }
}
