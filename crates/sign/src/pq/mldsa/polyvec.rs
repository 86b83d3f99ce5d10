//! Polynomial vector types and operations specific to ML-DSA.

use core::fmt;
use core::marker::PhantomData;

use mldsa_algorithms::poly::params::MlDsaField;
use mldsa_algorithms::poly::polynomial::Polynomial;
use mldsa_params::pqc::mldsa::{MlDsaSchemeParams, SEED_BYTES};
use zeroize::Zeroize;

use super::backend::SymmetricBackend;
use super::sampling::uniform_poly;
use crate::error::Result;

/// A ring element over the ML-DSA field
pub(crate) type Poly = Polynomial<MlDsaField>;

macro_rules! polyvec {
    ($name:ident, $dim:ident, $doc:expr) => {
        #[doc = $doc]
        pub struct $name<P: MlDsaSchemeParams> {
            pub(crate) polys: Vec<Poly>,
            _params: PhantomData<P>,
        }

        // Manual impls keep `P` free of Clone / Debug / PartialEq bounds
        impl<P: MlDsaSchemeParams> Clone for $name<P> {
            fn clone(&self) -> Self {
                Self {
                    polys: self.polys.clone(),
                    _params: PhantomData,
                }
            }
        }

        impl<P: MlDsaSchemeParams> PartialEq for $name<P> {
            fn eq(&self, other: &Self) -> bool {
                self.polys == other.polys
            }
        }

        impl<P: MlDsaSchemeParams> Eq for $name<P> {}

        impl<P: MlDsaSchemeParams> fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("params", &P::NAME)
                    .field("polys", &self.polys)
                    .finish()
            }
        }

        impl<P: MlDsaSchemeParams> Zeroize for $name<P> {
            fn zeroize(&mut self) {
                for poly in self.polys.iter_mut() {
                    poly.zeroize();
                }
            }
        }

        impl<P: MlDsaSchemeParams> $name<P> {
            /// Creates a vector with all polynomial coefficients set to zero.
            pub fn zero() -> Self {
                Self {
                    polys: vec![Poly::zero(); P::$dim],
                    _params: PhantomData,
                }
            }

            pub(crate) fn from_polys(polys: Vec<Poly>) -> Self {
                debug_assert_eq!(polys.len(), P::$dim);
                Self {
                    polys,
                    _params: PhantomData,
                }
            }

            /// Forward NTT of every component.
            pub fn ntt_inplace(&mut self) {
                self.polys.iter_mut().for_each(Poly::ntt_inplace);
            }

            /// Inverse NTT of every component, scaled by the Montgomery factor.
            pub fn inv_ntt_tomont_inplace(&mut self) {
                self.polys.iter_mut().for_each(Poly::inv_ntt_tomont_inplace);
            }

            /// Reduce every coefficient to magnitude at most 6283008.
            pub fn reduce(&mut self) {
                self.polys.iter_mut().for_each(Poly::reduce);
            }

            /// Component-wise `self += other` without reduction.
            pub fn add_assign(&mut self, other: &Self) {
                for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
                    *a += b;
                }
            }

            /// Multiply every component by one NTT-domain polynomial.
            pub fn pointwise_poly_montgomery(&self, a: &Poly) -> Self {
                Self::from_polys(self.polys.iter().map(|p| a.pointwise_montgomery(p)).collect())
            }

            /// True if any coefficient has magnitude `>= bound`.
            pub fn exceeds_norm(&self, bound: i32) -> bool {
                self.polys.iter().any(|p| p.exceeds_norm(bound))
            }
        }
    };
}

polyvec!(
    PolyVecL,
    L_DIM,
    "A vector of L polynomials (columns of A): `s1`, `y`, `z`"
);
polyvec!(
    PolyVecK,
    K_DIM,
    "A vector of K polynomials (rows of A): `s2`, `t`, `w`, `h`"
);

impl<P: MlDsaSchemeParams> PolyVecL<P> {
    /// Inner product of two NTT-domain vectors in the Montgomery domain.
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> Poly {
        let mut acc = Poly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc.pointwise_acc_montgomery(a, b);
        }
        acc
    }
}

impl<P: MlDsaSchemeParams> PolyVecK<P> {
    /// Add Q to every negative coefficient.
    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    /// Component-wise `self -= other` without reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            *a -= b;
        }
    }

    /// Multiply every coefficient by `2^d`.
    pub fn shiftl(&mut self, d: u32) {
        for p in self.polys.iter_mut() {
            p.shiftl(d);
        }
    }
}

/// ExpandA: the K x L public matrix in NTT domain, one row per entry.
///
/// Entry `(i, j)` is sampled from the matrix stream with nonce `(i << 8) + j`.
pub(crate) fn expand_matrix<P, B>(rho: &[u8; SEED_BYTES]) -> Result<Vec<PolyVecL<P>>>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    (0..P::K_DIM)
        .map(|i| {
            let row = (0..P::L_DIM)
                .map(|j| uniform_poly::<B::MatrixStream>(rho, ((i as u16) << 8) + j as u16))
                .collect::<Result<Vec<_>>>()?;
            Ok(PolyVecL::from_polys(row))
        })
        .collect()
}

/// `A * v` for NTT-domain `A` and `v`; output in NTT domain, Montgomery-scaled.
pub(crate) fn matrix_pointwise_montgomery<P: MlDsaSchemeParams>(
    mat: &[PolyVecL<P>],
    v: &PolyVecL<P>,
) -> PolyVecK<P> {
    PolyVecK::from_polys(mat.iter().map(|row| row.pointwise_acc_montgomery(v)).collect())
}
