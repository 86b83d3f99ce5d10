//! ntt.rs - Number Theoretic Transform over Z_q[X]/(X^256 + 1)
//!
//! The forward transform is an in-place Cooley-Tukey butterfly network that
//! takes normal-order coefficients to bit-reversed NTT order. The inverse is a
//! Gentleman-Sande network that undoes it.
//!
//! ## Domains
//! - [`NttOperator::ntt`]: input coefficients of magnitude below q, output
//!   magnitude below 9q. No reduction is applied between layers.
//! - [`InverseNttOperator::inv_ntt_tomont`]: input magnitude below q, output
//!   `a * 2^32 mod q` with magnitude below q. The extra Montgomery factor
//!   cancels the `2^-32` left behind by a preceding pointwise product.
//! - [`RingArithmeticBackend::pointwise_montgomery`]: both inputs in NTT order,
//!   output `a * b * 2^-32` per coordinate.

use super::params::{NttModulus, N};
use super::polynomial::Polynomial;
use super::reduce::{montgomery_mul, montgomery_reduce};

/// Trait for forward Number Theoretic Transform
pub trait NttOperator<M: NttModulus> {
    /// Performs the forward NTT on a polynomial in place
    fn ntt(poly: &mut Polynomial<M>);
}

/// Trait for inverse Number Theoretic Transform
pub trait InverseNttOperator<M: NttModulus> {
    /// Performs the inverse NTT in place and multiplies by the Montgomery factor
    fn inv_ntt_tomont(poly: &mut Polynomial<M>);
}

/// Ring arithmetic needed by the signature scheme
///
/// Alternative implementations (vectorized, streaming) must produce the same
/// outputs as [`CooleyTukeyNtt`] for every input in the documented domains.
pub trait RingArithmeticBackend<M: NttModulus>: NttOperator<M> + InverseNttOperator<M> {
    /// Coordinate-wise Montgomery product of two NTT-domain polynomials
    fn pointwise_montgomery(a: &Polynomial<M>, b: &Polynomial<M>) -> Polynomial<M> {
        let mut out = Polynomial::zero();
        for ((o, &x), &y) in out.coeffs.iter_mut().zip(a.coeffs.iter()).zip(b.coeffs.iter()) {
            *o = montgomery_mul::<M>(x, y);
        }
        out
    }

    /// Accumulating variant: `acc += a * b * 2^-32` per coordinate
    fn pointwise_acc_montgomery(acc: &mut Polynomial<M>, a: &Polynomial<M>, b: &Polynomial<M>) {
        for ((o, &x), &y) in acc.coeffs.iter_mut().zip(a.coeffs.iter()).zip(b.coeffs.iter()) {
            *o += montgomery_mul::<M>(x, y);
        }
    }
}

/// Portable reference backend
#[derive(Clone, Copy, Debug, Default)]
pub struct CooleyTukeyNtt;

impl<M: NttModulus> NttOperator<M> for CooleyTukeyNtt {
    fn ntt(poly: &mut Polynomial<M>) {
        let a = &mut poly.coeffs;
        let mut k = 0usize;
        let mut len = N / 2;
        while len > 0 {
            let mut start = 0;
            while start < N {
                k += 1;
                let zeta = M::ZETAS[k] as i64;
                for j in start..start + len {
                    let t = montgomery_reduce::<M>(zeta * a[j + len] as i64);
                    a[j + len] = a[j] - t;
                    a[j] += t;
                }
                start += 2 * len;
            }
            len >>= 1;
        }
    }
}

impl<M: NttModulus> InverseNttOperator<M> for CooleyTukeyNtt {
    fn inv_ntt_tomont(poly: &mut Polynomial<M>) {
        let a = &mut poly.coeffs;
        let mut k = N;
        let mut len = 1;
        while len < N {
            let mut start = 0;
            while start < N {
                k -= 1;
                let zeta = -(M::ZETAS[k] as i64);
                for j in start..start + len {
                    let t = a[j];
                    a[j] = t + a[j + len];
                    a[j + len] = t - a[j + len];
                    a[j + len] = montgomery_reduce::<M>(zeta * a[j + len] as i64);
                }
                start += 2 * len;
            }
            len <<= 1;
        }

        let f = M::INV_NTT_SCALE as i64;
        for c in a.iter_mut() {
            *c = montgomery_reduce::<M>(f * *c as i64);
        }
    }
}

impl<M: NttModulus> RingArithmeticBackend<M> for CooleyTukeyNtt {}
