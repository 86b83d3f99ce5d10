//! serialize.rs - Fixed-width coefficient packing
//!
//! Coefficients are written least-significant bit first into a continuous
//! little-endian bitstream. Callers map signed coefficients to the
//! non-negative range first (see the codec in the signing crate).

use super::params::{Modulus, N};
use super::polynomial::Polynomial;
use crate::error::{validate, Result};

/// Largest supported width
pub const MAX_BITS_PER_COEFF: usize = 24;

/// Trait for packing polynomial coefficients into bytes
pub trait CoefficientPacker<M: Modulus> {
    /// Packs the low `bits_per_coeff` bits of every coefficient into `out`,
    /// which must be exactly [`bytes_required`] long
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize, out: &mut [u8]) -> Result<()>;
}

/// Trait for unpacking polynomial coefficients from bytes
pub trait CoefficientUnpacker<M: Modulus> {
    /// Unpacks N coefficients of `bits_per_coeff` bits each
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>>;
}

/// Default implementation for coefficient serialization
pub struct DefaultCoefficientSerde;

/// Number of bytes for one packed polynomial
pub const fn bytes_required(bits_per_coeff: usize) -> usize {
    (N * bits_per_coeff).div_ceil(8)
}

fn check_width(bits_per_coeff: usize) -> Result<()> {
    validate::parameter(
        bits_per_coeff > 0 && bits_per_coeff <= MAX_BITS_PER_COEFF,
        "bits_per_coeff",
        "must be in range [1, 24]",
    )
}

impl<M: Modulus> CoefficientPacker<M> for DefaultCoefficientSerde {
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize, out: &mut [u8]) -> Result<()> {
        check_width(bits_per_coeff)?;
        validate::length("packed polynomial", out.len(), bytes_required(bits_per_coeff))?;

        let mask = (1u64 << bits_per_coeff) - 1;
        let mut acc: u64 = 0;
        let mut acc_bits = 0;
        let mut pos = 0;
        for &c in poly.coeffs.iter() {
            acc |= (c as u32 as u64 & mask) << acc_bits;
            acc_bits += bits_per_coeff;
            while acc_bits >= 8 {
                out[pos] = acc as u8;
                pos += 1;
                acc >>= 8;
                acc_bits -= 8;
            }
        }
        if acc_bits > 0 {
            out[pos] = acc as u8;
        }
        Ok(())
    }
}

impl<M: Modulus> CoefficientUnpacker<M> for DefaultCoefficientSerde {
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>> {
        check_width(bits_per_coeff)?;
        validate::length("packed polynomial", bytes.len(), bytes_required(bits_per_coeff))?;

        let mask = (1u64 << bits_per_coeff) - 1;
        let mut poly = Polynomial::zero();
        let mut acc: u64 = 0;
        let mut acc_bits = 0;
        let mut input = bytes.iter();
        for c in poly.coeffs.iter_mut() {
            while acc_bits < bits_per_coeff {
                let byte = input.next().copied().unwrap_or(0);
                acc |= (byte as u64) << acc_bits;
                acc_bits += 8;
            }
            *c = (acc & mask) as i32;
            acc >>= bits_per_coeff;
            acc_bits -= bits_per_coeff;
        }
        Ok(poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::params::MlDsaField;

    type Poly = Polynomial<MlDsaField>;

    #[test]
    fn test_bytes_required() {
        assert_eq!(bytes_required(10), 320);
        assert_eq!(bytes_required(13), 416);
        assert_eq!(bytes_required(3), 96);
        assert_eq!(bytes_required(18), 576);
        assert_eq!(bytes_required(20), 640);
    }

    #[test]
    fn test_lsb_first_layout() {
        // 10-bit values 0x3FF, 0x001, 0x000, 0x2AA -> 40 bits
        let mut p = Poly::zero();
        p.coeffs[0] = 0x3FF;
        p.coeffs[1] = 0x001;
        p.coeffs[3] = 0x2AA;
        let mut out = [0u8; 320];
        DefaultCoefficientSerde::pack_coeffs(&p, 10, &mut out).unwrap();
        assert_eq!(&out[..5], &[0xFF, 0x07, 0x00, 0x80, 0xAA]);
        assert!(out[5..].iter().all(|&b| b == 0));

        let back: Poly = DefaultCoefficientSerde::unpack_coeffs(&out, 10).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_pack_masks_high_bits() {
        let mut p = Poly::zero();
        p.coeffs[0] = 0b1111_1101;
        let mut out = [0u8; 128];
        DefaultCoefficientSerde::pack_coeffs(&p, 4, &mut out).unwrap();
        assert_eq!(out[0], 0x0D);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let p = Poly::zero();
        let mut short = [0u8; 319];
        assert!(DefaultCoefficientSerde::pack_coeffs(&p, 10, &mut short).is_err());
        assert!(
            <DefaultCoefficientSerde as CoefficientUnpacker<MlDsaField>>::unpack_coeffs(&short, 10)
                .is_err()
        );
        let mut out = [0u8; 1024];
        assert!(DefaultCoefficientSerde::pack_coeffs(&p, 0, &mut out).is_err());
        assert!(DefaultCoefficientSerde::pack_coeffs(&p, 32, &mut out).is_err());
    }
}
