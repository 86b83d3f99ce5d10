//! reduce.rs - Scalar reduction primitives over Z_q
//!
//! All functions are branch-free. The domain each one accepts and the range it
//! returns are part of its contract:
//!
//! | function | input | output |
//! |---|---|---|
//! | [`montgomery_reduce`] | `-2^31 q <= a <= 2^31 q` | `a * 2^-32 mod q` in `(-q, q)` |
//! | [`reduce32`] | `a <= 2^31 - 2^22 - 1` | `a mod q` in `[-6283008, 6283008]` |
//! | [`caddq`] | `(-q, q)` | `[0, q)` |
//! | [`freeze`] | as [`reduce32`] | `[0, q)` |

use super::params::{Modulus, NttModulus};

/// Montgomery reduction: computes `a * 2^-32 mod Q`
#[inline(always)]
pub fn montgomery_reduce<M: NttModulus>(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(M::QINV);
    ((a - (t as i64) * (M::Q as i64)) >> 32) as i32
}

/// Montgomery multiplication: computes `a * b * 2^-32 mod Q`
#[inline(always)]
pub fn montgomery_mul<M: NttModulus>(a: i32, b: i32) -> i32 {
    montgomery_reduce::<M>(a as i64 * b as i64)
}

/// Single-step rounding reduction to a representative of small magnitude
#[inline(always)]
pub fn reduce32<M: Modulus>(a: i32) -> i32 {
    let t = (a + (1 << (M::BITS - 1))) >> M::BITS;
    a - t * M::Q
}

/// Conditionally add Q if the input is negative
#[inline(always)]
pub fn caddq<M: Modulus>(a: i32) -> i32 {
    a + ((a >> 31) & M::Q)
}

/// Canonical representative in `[0, Q)`
#[inline(always)]
pub fn freeze<M: Modulus>(a: i32) -> i32 {
    caddq::<M>(reduce32::<M>(a))
}

/// Move a standard representative into the Montgomery domain
#[inline(always)]
pub fn to_montgomery<M: NttModulus>(a: i32) -> i32 {
    montgomery_mul::<M>(a, M::MONT_R2)
}
