//! Arithmetic and symmetric building blocks for the mldsa library
//!
//! This crate provides the layers below the signature scheme:
//!
//! - [`poly`]: reduction primitives over q = 8380417, the 256-point NTT,
//!   generic polynomials and fixed-width coefficient packing
//! - [`xof`]: SHAKE256 with an incremental absorb / squeeze API
//! - [`stream`]: seeded byte streams (SHAKE or AES-256-CTR) feeding the
//!   rejection samplers
//!
//! All arithmetic is branch-free on coefficient values.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub use error::{validate, Error, Result};

pub mod poly;
pub use poly::params::{MlDsaField, Modulus, NttModulus};
pub use poly::polynomial::Polynomial;

pub mod xof;
pub use xof::{ExtendableOutputFunction, ShakeXof256};

pub mod stream;
pub use stream::{Aes256CtrStream, SeededStream, Shake128Stream, Shake256Stream};
