//! Error types for the signature crate

use mldsa_algorithms::error::Error as AlgoError;
use thiserror::Error;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Context string longer than 255 bytes
    #[error("Context string too long: {length} bytes (maximum 255)")]
    ContextTooLong {
        /// Length of the rejected context
        length: usize,
    },

    /// Invalid key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Invalid signature size
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Secret key whose stored `tr` does not match its public key
    #[error("Invalid key: {0}")]
    InvalidKey(&'static str),

    /// Verification failed; carries no detail about the cause
    #[error("{algorithm} verification failed")]
    Verification {
        /// Parameter set name
        algorithm: &'static str,
    },

    /// Non-canonical encoding
    #[error("Deserialization error: {0}")]
    Deserialization(&'static str),

    /// RNG error
    #[error("RNG error: {0}")]
    Rng(String),

    /// Error from the arithmetic / symmetric layer
    #[error("Algorithm error: {0}")]
    Algorithm(#[from] AlgoError),
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::Rng(err.to_string())
    }
}

// Convert to the API-level error
impl From<Error> for mldsa_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::ContextTooLong { length } => mldsa_api::Error::InvalidParameter {
                context: "context",
                message: format!("{} bytes exceeds the 255 byte limit", length),
            },
            Error::InvalidKeySize { expected, actual } => mldsa_api::Error::InvalidLength {
                context: "key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => mldsa_api::Error::InvalidLength {
                context: "signature",
                expected,
                actual,
            },
            Error::InvalidKey(msg) => mldsa_api::Error::InvalidKey {
                context: "secret key",
                message: msg.to_string(),
            },
            Error::Verification { algorithm } => mldsa_api::Error::InvalidSignature {
                context: algorithm,
                message: String::new(),
            },
            Error::Deserialization(msg) => mldsa_api::Error::InvalidSignature {
                context: "deserialization",
                message: msg.to_string(),
            },
            Error::Rng(msg) => mldsa_api::Error::RandomGenerationError {
                context: "sign",
                message: msg,
            },
            Error::Algorithm(e) => e.into(),
        }
    }
}
