//! Seeded pseudorandom byte streams
//!
//! Each sampled polynomial of the signature scheme is expanded from a seed and
//! a 16-bit domain nonce. A [`SeededStream`] produces the bytes for one such
//! expansion. Two families are provided:
//!
//! - SHAKE128 / SHAKE256 absorbing `seed || nonce_le16` (the standard choice)
//! - AES-256 in counter mode keyed with the first 32 seed bytes (the
//!   alternate "AES" configuration)
//!
//! # Security Considerations
//!
//! A stream must never be initialised twice with the same seed and nonce for
//! two different purposes; the nonce is what separates the polynomials of a
//! vector and the entries of the public matrix.

pub mod aes256ctr;
pub mod shake;

pub use aes256ctr::Aes256CtrStream;
pub use shake::{Shake128Stream, Shake256Stream};

use crate::error::Result;

/// A deterministic byte stream derived from `(seed, nonce)`
pub trait SeededStream: Sized {
    /// Natural output block size in bytes
    const BLOCK_BYTES: usize;

    /// Minimum number of seed bytes accepted by [`SeededStream::init`]
    const MIN_SEED_BYTES: usize;

    /// Starts a new stream for the given seed and domain nonce
    fn init(seed: &[u8], nonce: u16) -> Result<Self>;

    /// Fills `out` with the next stream bytes
    ///
    /// Callers normally request whole blocks; a partial block simply
    /// continues where the previous call stopped.
    fn squeeze_blocks(&mut self, out: &mut [u8]);
}
