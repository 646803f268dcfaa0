//! Error types for finboard-store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Data service returned status {status}")]
    Status { status: u16 },

    #[error("Invalid row in response: {message}")]
    InvalidRow { message: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        StoreError::Request { message: error.to_string() }
    }
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
