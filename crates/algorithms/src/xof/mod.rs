//! Extendable Output Functions (XOF)
//!
//! Incremental absorb / squeeze interface over SHAKE256. The
//! signature scheme uses SHAKE256 for every hash (public-key digest, message
//! representative, challenge seed, key expansion); the per-polynomial seeded
//! byte streams live in [`crate::stream`].

use crate::error::{validate, Result};

pub mod shake;

pub use shake::ShakeXof256;

/// Trait for extendable output functions
pub trait ExtendableOutputFunction {
    /// Creates a new instance of the XOF
    fn new() -> Self;

    /// Absorbs more input; fails once squeezing has started
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Ends the absorb phase; idempotent
    fn finalize(&mut self) -> Result<()>;

    /// Squeezes output bytes into the provided buffer, finalizing if needed
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeezes the specified number of output bytes into a new vector
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out)?;
        Ok(out)
    }

    /// Resets the XOF to an empty absorb state
    fn reset(&mut self);

    /// Returns the security level in bits
    fn security_level() -> usize;

    /// Convenience method to generate output in a single call
    fn generate(data: &[u8], len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        validate::parameter(len > 0, "output_length", "XOF output length must be greater than 0")?;

        let mut xof = Self::new();
        xof.update(data)?;
        xof.squeeze_into_vec(len)
    }

    /// Absorbs the concatenation of `parts` and fills `output`
    fn generate_into(parts: &[&[u8]], output: &mut [u8]) -> Result<()>
    where
        Self: Sized,
    {
        let mut xof = Self::new();
        for part in parts {
            xof.update(part)?;
        }
        xof.squeeze(output)
    }
}
