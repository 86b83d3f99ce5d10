//! Error type definitions for signature operations

use thiserror::Error;

/// Primary error type returned by the signature traits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid or malformed key
    #[error("Invalid key: {context}: {message}")]
    InvalidKey {
        /// Where the error was raised
        context: &'static str,
        /// Details
        message: String,
    },

    /// Signature rejected or malformed
    #[error("Invalid signature: {context}")]
    InvalidSignature {
        /// Where the error was raised
        context: &'static str,
        /// Details; empty for verification failures
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        /// Where the error was raised
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        /// Where the error was raised
        context: &'static str,
        /// Details
        message: String,
    },

    /// Random generation error
    #[error("Random generation error: {context}: {message}")]
    RandomGenerationError {
        /// Where the error was raised
        context: &'static str,
        /// Details
        message: String,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        /// Where the error was raised
        context: &'static str,
        /// Details
        message: String,
    },
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns true for a rejected signature
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, Self::InvalidSignature { .. })
    }
}
