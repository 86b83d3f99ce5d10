//! Rounding and hint functions for ML-DSA.
//!
//! Inputs to [`power2round`] and [`decompose`] are standard representatives in
//! `[0, Q)`. Both branch only on `gamma2`, a public parameter.

use mldsa_algorithms::poly::params::{MlDsaField, Modulus};
use mldsa_params::pqc::mldsa::{MlDsaSchemeParams, GAMMA2_32, GAMMA2_88, MLDSA_D};

use super::polyvec::{Poly, PolyVecK};

const Q: i32 = MlDsaField::Q;

/// Split `a` into `a1 * 2^D + a0` with `a0` in `(-2^(D-1), 2^(D-1)]`.
#[inline(always)]
pub(crate) fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (MLDSA_D - 1)) - 1) >> MLDSA_D;
    let a0 = a - (a1 << MLDSA_D);
    (a1, a0)
}

/// Split `a` into `a1 * 2 * gamma2 + a0` with `a0` in `(-gamma2, gamma2]`.
///
/// When `a1` would reach `(Q - 1) / (2 * gamma2)` it wraps to 0 and `a0`
/// becomes `a - Q`.
#[inline(always)]
pub(crate) fn decompose(a: i32, gamma2: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    if gamma2 == GAMMA2_32 {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    } else {
        debug_assert_eq!(gamma2, GAMMA2_88);
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }

    let mut a0 = a - a1 * 2 * gamma2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Whether adding the low part `a0` to high part `a1` leaves its bucket.
#[inline(always)]
pub(crate) fn make_hint(a0: i32, a1: i32, gamma2: i32) -> bool {
    a0 > gamma2 || a0 < -gamma2 || (a0 == -gamma2 && a1 != 0)
}

/// Corrected high bits of `a` given its hint bit.
#[inline(always)]
pub(crate) fn use_hint(a: i32, hint: bool, gamma2: i32) -> i32 {
    let (a1, a0) = decompose(a, gamma2);
    if !hint {
        return a1;
    }

    if gamma2 == GAMMA2_32 {
        if a0 > 0 {
            (a1 + 1) & 15
        } else {
            (a1 - 1) & 15
        }
    } else if a0 > 0 {
        if a1 == 43 {
            0
        } else {
            a1 + 1
        }
    } else if a1 == 0 {
        43
    } else {
        a1 - 1
    }
}

fn split_poly(p: &Poly, f: impl Fn(i32) -> (i32, i32)) -> (Poly, Poly) {
    let mut hi = Poly::zero();
    let mut lo = Poly::zero();
    for ((h, l), &c) in hi.coeffs.iter_mut().zip(lo.coeffs.iter_mut()).zip(p.coeffs.iter()) {
        (*h, *l) = f(c);
    }
    (hi, lo)
}

/// Power2Round of every coefficient; returns `(t1, t0)`.
pub(crate) fn power2round_polyveck<P: MlDsaSchemeParams>(
    t: &PolyVecK<P>,
) -> (PolyVecK<P>, PolyVecK<P>) {
    let (hi, lo): (Vec<_>, Vec<_>) = t.polys.iter().map(|p| split_poly(p, power2round)).unzip();
    (PolyVecK::from_polys(hi), PolyVecK::from_polys(lo))
}

/// Decompose every coefficient; returns `(w1, w0)`.
pub(crate) fn decompose_polyveck<P: MlDsaSchemeParams>(
    w: &PolyVecK<P>,
) -> (PolyVecK<P>, PolyVecK<P>) {
    let (hi, lo): (Vec<_>, Vec<_>) = w
        .polys
        .iter()
        .map(|p| split_poly(p, |c| decompose(c, P::GAMMA2)))
        .unzip();
    (PolyVecK::from_polys(hi), PolyVecK::from_polys(lo))
}

/// Hint vector for `(a0, a1)` and its number of set bits.
pub(crate) fn make_hint_polyveck<P: MlDsaSchemeParams>(
    a0: &PolyVecK<P>,
    a1: &PolyVecK<P>,
) -> (PolyVecK<P>, usize) {
    let mut h = PolyVecK::<P>::zero();
    let mut count = 0;
    for ((hp, p0), p1) in h.polys.iter_mut().zip(a0.polys.iter()).zip(a1.polys.iter()) {
        for ((hc, &c0), &c1) in hp.coeffs.iter_mut().zip(p0.coeffs.iter()).zip(p1.coeffs.iter()) {
            let bit = make_hint(c0, c1, P::GAMMA2);
            *hc = bit as i32;
            count += bit as usize;
        }
    }
    (h, count)
}

/// Apply hints to every coefficient of `a`.
pub(crate) fn use_hint_polyveck<P: MlDsaSchemeParams>(
    a: &PolyVecK<P>,
    h: &PolyVecK<P>,
) -> PolyVecK<P> {
    let polys = a
        .polys
        .iter()
        .zip(h.polys.iter())
        .map(|(pa, ph)| {
            let mut out = Poly::zero();
            for ((o, &c), &hint) in out.coeffs.iter_mut().zip(pa.coeffs.iter()).zip(ph.coeffs.iter()) {
                *o = use_hint(c, hint != 0, P::GAMMA2);
            }
            out
        })
        .collect();
    PolyVecK::from_polys(polys)
}
