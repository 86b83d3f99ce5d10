//! SHAKE-based seeded streams

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

use super::SeededStream;
use crate::error::Result;

/// SHAKE128 rate in bytes
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate in bytes
pub const SHAKE256_RATE: usize = 136;

/// SHAKE128 over `seed || nonce_le16`, used for matrix expansion
pub struct Shake128Stream {
    reader: Shake128Reader,
}

/// SHAKE256 over `seed || nonce_le16`, used for secret and mask expansion
pub struct Shake256Stream {
    reader: Shake256Reader,
}

impl SeededStream for Shake128Stream {
    const BLOCK_BYTES: usize = SHAKE128_RATE;
    const MIN_SEED_BYTES: usize = 0;

    fn init(seed: &[u8], nonce: u16) -> Result<Self> {
        let mut hasher = Shake128::default();
        hasher.update(seed);
        hasher.update(&nonce.to_le_bytes());
        Ok(Self {
            reader: hasher.finalize_xof(),
        })
    }

    fn squeeze_blocks(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

impl SeededStream for Shake256Stream {
    const BLOCK_BYTES: usize = SHAKE256_RATE;
    const MIN_SEED_BYTES: usize = 0;

    fn init(seed: &[u8], nonce: u16) -> Result<Self> {
        let mut hasher = Shake256::default();
        hasher.update(seed);
        hasher.update(&nonce.to_le_bytes());
        Ok(Self {
            reader: hasher.finalize_xof(),
        })
    }

    fn squeeze_blocks(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}
