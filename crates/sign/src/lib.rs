//! ML-DSA digital signatures
//!
//! This crate implements the module-lattice signature scheme standardized as
//! ML-DSA (FIPS 204, formerly CRYSTALS-Dilithium) at all three security
//! levels, on top of the arithmetic and symmetric layers of
//! `mldsa-algorithms`.

#![forbid(unsafe_code)]

pub mod error;
pub mod pq;

pub use error::{Error, Result};

pub use pq::mldsa::{
    AesBackend, MlDsa, MlDsaPublicKey, MlDsaSecretKey, MlDsaSignatureData, ShakeBackend,
    SymmetricBackend,
};
pub use pq::{MlDsa44, MlDsa44Aes, MlDsa65, MlDsa65Aes, MlDsa87, MlDsa87Aes};
