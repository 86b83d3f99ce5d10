//! Secret-holding types
//!
//! Seeds drawn for key generation are held in [`SecretBytes`], which clears
//! itself when dropped and never prints its contents.

use core::fmt;
use core::ops::Deref;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// A fixed-size array of bytes that is securely zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBytes<N> {
    /// Fill a new instance from the given RNG
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut out = Self { data: [0u8; N] };
        rng.try_fill_bytes(&mut out.data)
            .map_err(|e| Error::RandomGenerationError {
                context: "SecretBytes::random",
                message: e.to_string(),
            })?;
        Ok(out)
    }
}

impl<const N: usize> Deref for SecretBytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{}>[REDACTED]", N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_debug_is_redacted() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let secret = SecretBytes::<8>::random(&mut rng).unwrap();
        let shown = format!("{:?}", secret);
        assert_eq!(shown, "SecretBytes<8>[REDACTED]");
    }

    #[test]
    fn test_random_fills_from_rng() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let a = SecretBytes::<32>::random(&mut rng).unwrap();
        let b = SecretBytes::<32>::random(&mut rng).unwrap();
        assert_ne!(*a, *b);

        let mut expected = [0u8; 32];
        rand::rngs::StdRng::seed_from_u64(7).fill_bytes(&mut expected);
        assert_eq!(*a, expected);
    }

    #[test]
    fn test_random_reports_rng_failure() {
        let err = SecretBytes::<32>::random(&mut FailingRng).unwrap_err();
        assert!(matches!(
            err,
            Error::RandomGenerationError {
                context: "SecretBytes::random",
                ..
            }
        ));
    }
}
