//! AES-256-CTR seeded stream
//!
//! The 16-byte counter block is `nonce_le16 || 0^10 || ctr_be32` with the
//! counter starting at zero. Only the first 32 bytes of the seed are used as
//! the key.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr32BE;

use super::SeededStream;
use crate::error::{validate, Error, Result};

/// AES-256 key size in bytes
pub const AES256_KEY_BYTES: usize = 32;

/// Output block size; four AES blocks
pub const AES256CTR_BLOCK_BYTES: usize = 64;

/// AES-256 in counter mode as a seeded stream
pub struct Aes256CtrStream {
    cipher: Ctr32BE<Aes256>,
}

impl SeededStream for Aes256CtrStream {
    const BLOCK_BYTES: usize = AES256CTR_BLOCK_BYTES;
    const MIN_SEED_BYTES: usize = AES256_KEY_BYTES;

    fn init(seed: &[u8], nonce: u16) -> Result<Self> {
        validate::min_length("AES-256-CTR seed", seed.len(), AES256_KEY_BYTES)?;

        let mut iv = [0u8; 16];
        iv[..2].copy_from_slice(&nonce.to_le_bytes());
        let cipher = Ctr32BE::<Aes256>::new_from_slices(&seed[..AES256_KEY_BYTES], &iv)
            .map_err(|_| Error::Length {
                context: "AES-256-CTR key",
                expected: AES256_KEY_BYTES,
                actual: seed.len(),
            })?;
        Ok(Self { cipher })
    }

    fn squeeze_blocks(&mut self, out: &mut [u8]) {
        out.fill(0);
        self.cipher.apply_keystream(out);
    }
}
