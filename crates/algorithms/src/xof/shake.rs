//! SHAKE extendable output functions (FIPS 202), backed by the `sha3` crate

use sha3::digest::{ExtendableOutputReset, Update, XofReader};
use sha3::{Shake256, Shake256Reader};

use super::ExtendableOutputFunction;
use crate::error::{Error, Result};

enum ShakeState<H, R> {
    Absorbing(H),
    Squeezing(R),
}

macro_rules! shake_xof {
    ($name:ident, $hasher:ty, $reader:ty, $level:expr, $label:expr) => {
        #[doc = concat!($label, " with an incremental absorb / squeeze interface")]
        pub struct $name {
            state: ShakeState<$hasher, $reader>,
        }

        impl $name {
            fn begin_squeeze(&mut self) -> &mut $reader {
                if let ShakeState::Absorbing(hasher) = &mut self.state {
                    self.state = ShakeState::Squeezing(hasher.finalize_xof_reset());
                }
                match &mut self.state {
                    ShakeState::Squeezing(reader) => reader,
                    ShakeState::Absorbing(_) => unreachable!("state switched above"),
                }
            }
        }

        impl ExtendableOutputFunction for $name {
            fn new() -> Self {
                Self {
                    state: ShakeState::Absorbing(<$hasher>::default()),
                }
            }

            fn update(&mut self, data: &[u8]) -> Result<()> {
                match &mut self.state {
                    ShakeState::Absorbing(hasher) => {
                        hasher.update(data);
                        Ok(())
                    }
                    ShakeState::Squeezing(_) => Err(Error::Processing {
                        operation: concat!($label, " update"),
                        details: "cannot absorb after squeezing has started",
                    }),
                }
            }

            fn finalize(&mut self) -> Result<()> {
                self.begin_squeeze();
                Ok(())
            }

            fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
                self.begin_squeeze().read(output);
                Ok(())
            }

            fn reset(&mut self) {
                self.state = ShakeState::Absorbing(<$hasher>::default());
            }

            fn security_level() -> usize {
                $level
            }
        }
    };
}

shake_xof!(ShakeXof256, Shake256, Shake256Reader, 256, "SHAKE256");
