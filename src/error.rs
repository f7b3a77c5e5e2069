//! Error types for the rust-sign-codec library.

use crate::encoding::InputEncoding;
use thiserror::Error;

/// The main error type for rust-sign-codec operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The cryptographic engine could not be initialized.
    #[error("Unable to initialize crypto engine: {0}")]
    Initialization(String),

    /// A value does not have the shape its declared encoding requires.
    #[error("Invalid value provided when {expected} encoding was expected: {reason}")]
    EncodingMismatch {
        expected: InputEncoding,
        reason: String,
    },

    /// An encoding name that is not supported in this position.
    #[error("No valid encoding given! Encoding: {0}")]
    UnsupportedEncoding(String),

    /// The engine returned output of the wrong length.
    #[error("Invalid engine output: {0}")]
    EngineOutput(String),

    /// Invalid key material.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Error with JSON deserialization of options.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CryptoError {
    pub(crate) fn mismatch(expected: InputEncoding, reason: impl Into<String>) -> Self {
        Self::EncodingMismatch {
            expected,
            reason: reason.into(),
        }
    }

    /// Whether retrying the same call later may succeed.
    ///
    /// Only engine initialization failures are environmental; everything
    /// else is a caller error that will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Initialization(_))
    }
}

/// Result type alias for rust-sign-codec operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
