//! polynomial.rs - Elements of R_q = Z_q[X]/(X^256 + 1)
//!
//! Coefficients are kept as signed 32-bit representatives. Arithmetic does not
//! reduce on its own; callers decide when to apply [`Polynomial::reduce`],
//! [`Polynomial::caddq`] or [`Polynomial::freeze`], following the ranges
//! documented in [`super::reduce`].

use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use mldsa_internal::ct_abs_i32;
use zeroize::Zeroize;

use super::ntt::{CooleyTukeyNtt, InverseNttOperator, NttOperator, RingArithmeticBackend};
use super::params::{Modulus, NttModulus, N};
use super::reduce::{caddq, freeze, reduce32};
use crate::error::{validate, Result};

/// A polynomial in the ring R_q, in normal or NTT order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<M: Modulus> {
    /// Coefficients of the polynomial
    pub coeffs: [i32; N],
    _marker: PhantomData<M>,
}

impl<M: Modulus> Polynomial<M> {
    /// Creates a new polynomial with all coefficients set to zero
    pub fn zero() -> Self {
        Self {
            coeffs: [0; N],
            _marker: PhantomData,
        }
    }

    /// Creates a polynomial from a slice of exactly N coefficients
    pub fn from_coeffs(coeffs_slice: &[i32]) -> Result<Self> {
        validate::length("polynomial coefficients", coeffs_slice.len(), N)?;
        let mut poly = Self::zero();
        poly.coeffs.copy_from_slice(coeffs_slice);
        Ok(poly)
    }

    /// Returns the degree bound N of the ring
    pub fn degree() -> usize {
        N
    }

    /// Returns a slice view of the coefficients
    pub fn as_coeffs_slice(&self) -> &[i32] {
        &self.coeffs
    }

    /// Returns a mutable slice view of the coefficients
    pub fn as_mut_coeffs_slice(&mut self) -> &mut [i32] {
        &mut self.coeffs
    }

    /// Applies `f` to every coefficient, returning a new polynomial
    pub fn map_coeffs<F: Fn(i32) -> i32>(&self, f: F) -> Self {
        let mut out = Self::zero();
        for (o, &c) in out.coeffs.iter_mut().zip(self.coeffs.iter()) {
            *o = f(c);
        }
        out
    }

    /// Reduces every coefficient to magnitude at most 6283008
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce32::<M>(*c);
        }
    }

    /// Adds Q to every negative coefficient
    pub fn caddq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = caddq::<M>(*c);
        }
    }

    /// Brings every coefficient into `[0, Q)`
    pub fn freeze(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = freeze::<M>(*c);
        }
    }

    /// Multiplies every coefficient by `2^d` without reduction
    pub fn shiftl(&mut self, d: u32) {
        for c in self.coeffs.iter_mut() {
            *c <<= d;
        }
    }

    /// Infinity-norm check on a reduced polynomial
    ///
    /// Returns `true` if some coefficient has magnitude `>= bound`, or if the
    /// bound itself is larger than `(Q - 1) / 8`. Coefficients are expected in
    /// the output range of [`Polynomial::reduce`]. The absolute value is taken
    /// without branching on the sign.
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        if bound > (M::Q - 1) / 8 {
            return true;
        }
        self.coeffs.iter().any(|&c| ct_abs_i32(c) >= bound)
    }
}

impl<M: NttModulus> Polynomial<M> {
    /// Forward NTT in place
    pub fn ntt_inplace(&mut self) {
        CooleyTukeyNtt::ntt(self);
    }

    /// Inverse NTT in place, leaving the result scaled by `2^32`
    pub fn inv_ntt_tomont_inplace(&mut self) {
        CooleyTukeyNtt::inv_ntt_tomont(self);
    }

    /// Coordinate-wise Montgomery product of two NTT-domain polynomials
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        CooleyTukeyNtt::pointwise_montgomery(self, other)
    }

    /// `self += a * b` coordinate-wise, in the Montgomery domain
    pub fn pointwise_acc_montgomery(&mut self, a: &Self, b: &Self) {
        CooleyTukeyNtt::pointwise_acc_montgomery(self, a, b);
    }
}

impl<M: Modulus> Default for Polynomial<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<M: Modulus> Zeroize for Polynomial<M> {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl<M: Modulus> AddAssign<&Polynomial<M>> for Polynomial<M> {
    fn add_assign(&mut self, other: &Polynomial<M>) {
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += b;
        }
    }
}

impl<M: Modulus> SubAssign<&Polynomial<M>> for Polynomial<M> {
    fn sub_assign(&mut self, other: &Polynomial<M>) {
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= b;
        }
    }
}

impl<M: Modulus> Add for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn add(self, other: Self) -> Self::Output {
        let mut result = Polynomial {
            coeffs: self.coeffs,
            _marker: PhantomData,
        };
        result += other;
        result
    }
}

impl<M: Modulus> Sub for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn sub(self, other: Self) -> Self::Output {
        let mut result = Polynomial {
            coeffs: self.coeffs,
            _marker: PhantomData,
        };
        result -= other;
        result
    }
}
