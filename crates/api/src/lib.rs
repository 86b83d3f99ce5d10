//! Public API traits and types for the mldsa library
//!
//! This crate provides the public API surface for the mldsa workspace: the
//! signature traits implemented by every parameter set, the error type those
//! traits return, and the secret seed holder used by key generation.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use types::SecretBytes;

pub use traits::{Signature, SignatureDerive, SignatureSerialize};

// Re-export trait modules for direct access
pub use traits::signature;
