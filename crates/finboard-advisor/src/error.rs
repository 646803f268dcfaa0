//! Error types for finboard-advisor

use finboard_store::StoreError;
use thiserror::Error;

/// Text generator call failures
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Generator returned status {status}")]
    Status { status: u16 },

    #[error("Generator returned no choices")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeneratorError {
    fn from(error: reqwest::Error) -> Self {
        GeneratorError::Request { message: error.to_string() }
    }
}

/// Recommendation preparation failures
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Generator output could not be parsed as a recommendation array.
    /// Callers treat this as "no recommendations produced".
    #[error("Malformed generator response")]
    MalformedResponse,

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type with AdvisorError
pub type AdvisorResult<T> = Result<T, AdvisorError>;
