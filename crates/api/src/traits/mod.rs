//! Trait definitions for the mldsa API

pub mod signature;

pub use signature::{Signature, SignatureDerive, SignatureSerialize};
