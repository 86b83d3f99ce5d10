//! Error handling for the mldsa API surface

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};
