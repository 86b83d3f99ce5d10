//! Generic Polynomial Engine
//!
//! Arithmetic in R_q = Z_q[X]/(X^256 + 1): scalar reductions, the NTT,
//! polynomials and fixed-width coefficient packing. Everything is generic over
//! the modulus traits in [`params`]; the signature scheme instantiates it with
//! [`params::MlDsaField`].

pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod reduce;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and traits.
pub mod prelude {
    pub use super::ntt::{CooleyTukeyNtt, InverseNttOperator, NttOperator, RingArithmeticBackend};
    pub use super::params::{MlDsaField, Modulus, NttModulus, N};
    pub use super::polynomial::Polynomial;
    pub use super::reduce::{caddq, freeze, montgomery_reduce, reduce32};
    pub use super::serialize::{
        bytes_required, CoefficientPacker, CoefficientUnpacker, DefaultCoefficientSerde,
    };
}
