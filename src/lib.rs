//! # mldsa
//!
//! A pure Rust implementation of ML-DSA (FIPS 204, formerly
//! CRYSTALS-Dilithium), the module-lattice digital signature scheme.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mldsa = "0.3"
//! ```
//!
//! ```
//! use mldsa::prelude::*;
//!
//! let (pk, sk) = MlDsa65::keypair(&mut rand::rngs::OsRng).unwrap();
//! let sig = MlDsa65::sign_with_context(b"hello", b"app-v1", &sk).unwrap();
//! assert!(MlDsa65::verify_with_context(b"hello", b"app-v1", &sig, &pk).is_ok());
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support and OS randomness
//! - `randomized-signing`: make `Signature::sign` hedged instead of deterministic
//! - `serde`: serde support for public keys and signatures
//! - `full`: all of the above except `randomized-signing`
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`mldsa-api`]: error type and the signature traits
//! - [`mldsa-params`]: parameter sets and encoded sizes
//! - [`mldsa-algorithms`]: field arithmetic, NTT, SHAKE and AES streams
//! - [`mldsa-sign`]: the signature scheme itself

pub use mldsa_algorithms as algorithms;
pub use mldsa_api as api;
pub use mldsa_params as params;
pub use mldsa_sign as sign;

pub use mldsa_sign::{MlDsa44, MlDsa44Aes, MlDsa65, MlDsa65Aes, MlDsa87, MlDsa87Aes};

/// Common imports for mldsa users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Signature, SignatureDerive, SignatureSerialize};

    // Parameter sets and key types
    pub use crate::sign::{
        MlDsa, MlDsa44, MlDsa44Aes, MlDsa65, MlDsa65Aes, MlDsa87, MlDsa87Aes, MlDsaPublicKey,
        MlDsaSecretKey, MlDsaSignatureData,
    };

    pub use rand::{CryptoRng, RngCore};
    pub use zeroize::Zeroizing;
}
