//! AES-256 CTR_DRBG as used by the NIST PQC known-answer generators
//!
//! Instantiated from a 48-byte entropy input with no derivation function and
//! no personalization string. Every `randombytes` call is followed by an
//! update with no additional input, so two 32-byte requests give different
//! output from a single 64-byte request.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Entropy input length in bytes
pub const KAT_SEED_BYTES: usize = 48;

const KEY_BYTES: usize = 32;
const BLOCK_BYTES: usize = 16;

/// Deterministic generator reproducing the reference `randombytes`
#[derive(Clone)]
pub struct KatDrbg {
    key: [u8; KEY_BYTES],
    v: [u8; BLOCK_BYTES],
}

impl KatDrbg {
    /// Instantiate from a 48-byte entropy input
    pub fn new(entropy: &[u8; KAT_SEED_BYTES]) -> Self {
        let mut drbg = Self {
            key: [0u8; KEY_BYTES],
            v: [0u8; BLOCK_BYTES],
        };
        drbg.update(Some(entropy));
        drbg
    }

    /// Fill `out` and advance the internal state
    pub fn randombytes(&mut self, out: &mut [u8]) {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        for chunk in out.chunks_mut(BLOCK_BYTES) {
            self.increment_v();
            let mut block = GenericArray::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block[..chunk.len()]);
            block.as_mut_slice().zeroize();
        }
        self.update(None);
    }

    fn increment_v(&mut self) {
        for byte in self.v.iter_mut().rev() {
            if *byte == 0xff {
                *byte = 0;
            } else {
                *byte += 1;
                break;
            }
        }
    }

    fn update(&mut self, provided: Option<&[u8; KAT_SEED_BYTES]>) {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut temp = [0u8; KAT_SEED_BYTES];
        for chunk in temp.chunks_mut(BLOCK_BYTES) {
            self.increment_v();
            let mut block = GenericArray::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..KEY_BYTES]);
        self.v.copy_from_slice(&temp[KEY_BYTES..]);
        temp.zeroize();
    }
}

impl Drop for KatDrbg {
    fn drop(&mut self) {
        self.key.zeroize();
        self.v.zeroize();
    }
}

impl RngCore for KatDrbg {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.randombytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.randombytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.randombytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.randombytes(dest);
        Ok(())
    }
}

// Deterministic by construction; only the KAT harness uses it.
impl CryptoRng for KatDrbg {}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_entropy() -> [u8; KAT_SEED_BYTES] {
        let mut entropy = [0u8; KAT_SEED_BYTES];
        for (i, b) in entropy.iter_mut().enumerate() {
            *b = i as u8;
        }
        entropy
    }

    #[test]
    fn test_first_output_matches_reference() {
        let mut drbg = KatDrbg::new(&counting_entropy());
        let mut out = [0u8; KAT_SEED_BYTES];
        drbg.randombytes(&mut out);
        assert_eq!(
            hex::encode(out),
            "061550234d158c5ec95595fe04ef7a25767f2e24cc2bc479d09d86dc9abcfde7\
             056a8c266f9ef97ed08541dbd2e1ffa1"
        );
    }

    #[test]
    fn test_update_between_calls() {
        let mut split = KatDrbg::new(&counting_entropy());
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        split.randombytes(&mut a);
        split.randombytes(&mut b);

        let mut whole = KatDrbg::new(&counting_entropy());
        let mut c = [0u8; 64];
        whole.randombytes(&mut c);

        assert_eq!(a, c[..32]);
        assert_ne!(b, c[32..]);
    }

    #[test]
    fn test_counter_carries() {
        let mut drbg = KatDrbg::new(&counting_entropy());
        drbg.v = [0xff; BLOCK_BYTES];
        drbg.increment_v();
        assert_eq!(drbg.v, [0u8; BLOCK_BYTES]);

        drbg.v[BLOCK_BYTES - 1] = 0xff;
        drbg.increment_v();
        assert_eq!(drbg.v[BLOCK_BYTES - 2..], [1, 0]);
    }
}
