//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Empty queries, empty collections and "nothing matched" are not errors;
/// they produce empty or unfiltered results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed matcher configuration (no fields, non-positive weight, bad threshold)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Caller-supplied value that cannot be used (NaN bound, malformed date)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with foodsave-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Malformed matcher configuration
    InvalidConfiguration = 11001,
    /// Unusable caller input
    InvalidInput = 11002,
    /// JSON parsing error
    JsonParsing = 11003,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidConfiguration(_) => SearchErrorCode::InvalidConfiguration,
            SearchError::InvalidInput(_) => SearchErrorCode::InvalidInput,
            SearchError::JsonError(_) => SearchErrorCode::JsonParsing,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        SearchError::InvalidConfiguration(message.into())
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        SearchError::InvalidInput(message.into())
    }
}
