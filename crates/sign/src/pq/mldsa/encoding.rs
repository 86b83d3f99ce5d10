//! Byte encodings of ML-DSA keys and signatures (FIPS 204 final)
//!
//! - `pk = rho || t1`
//! - `sk = rho || key || tr || s1 || s2 || t0`
//! - `sig = c̃ || z || h`
//!
//! Signed coefficients are stored with an offset so that every packed value is
//! non-negative: `eta - c` for `s1` / `s2`, `2^(D-1) - c` for `t0` and
//! `gamma1 - c` for `z`. Decoding is strict: every length is checked, packed
//! η-values above `2 * eta` are refused and the hint section must be the
//! unique canonical encoding of its hint vector.

use mldsa_algorithms::poly::serialize::{
    CoefficientPacker, CoefficientUnpacker, DefaultCoefficientSerde,
};
use mldsa_params::pqc::mldsa::{
    MlDsaSchemeParams, MLDSA_D, POLYT0_PACKED_BYTES, POLYT1_PACKED_BYTES, SEED_BYTES, TR_BYTES,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::polyvec::{Poly, PolyVecK, PolyVecL};
use crate::error::{Error, Result};

const T1_BITS: usize = 10;
const T0_BITS: usize = MLDSA_D as usize;
const T0_OFFSET: i32 = 1 << (MLDSA_D - 1);

// ---------------------------------------------------------------------------
// Polynomial level
// ---------------------------------------------------------------------------

/// Packs `offset - c` for every coefficient; the shifted copy is wiped afterwards.
fn pack_offset(poly: &Poly, offset: i32, bits: usize, out: &mut [u8]) -> Result<()> {
    let mut shifted = poly.map_coeffs(|c| offset - c);
    let res = DefaultCoefficientSerde::pack_coeffs(&shifted, bits, out);
    shifted.zeroize();
    Ok(res?)
}

/// Inverse of [`pack_offset`].
fn unpack_offset(bytes: &[u8], offset: i32, bits: usize) -> Result<Poly> {
    let mut raw: Poly = DefaultCoefficientSerde::unpack_coeffs(bytes, bits)?;
    let poly = raw.map_coeffs(|t| offset - t);
    raw.zeroize();
    Ok(poly)
}

/// `t1` coefficients in `[0, 2^10)`.
pub(crate) fn pack_t1(poly: &Poly, out: &mut [u8]) -> Result<()> {
    Ok(DefaultCoefficientSerde::pack_coeffs(poly, T1_BITS, out)?)
}

pub(crate) fn unpack_t1(bytes: &[u8]) -> Result<Poly> {
    Ok(DefaultCoefficientSerde::unpack_coeffs(bytes, T1_BITS)?)
}

/// `t0` coefficients in `(-2^12, 2^12]`.
pub(crate) fn pack_t0(poly: &Poly, out: &mut [u8]) -> Result<()> {
    pack_offset(poly, T0_OFFSET, T0_BITS, out)
}

pub(crate) fn unpack_t0(bytes: &[u8]) -> Result<Poly> {
    unpack_offset(bytes, T0_OFFSET, T0_BITS)
}

/// Coefficients in `[-eta, eta]`.
pub(crate) fn pack_eta<P: MlDsaSchemeParams>(poly: &Poly, out: &mut [u8]) -> Result<()> {
    pack_offset(poly, P::ETA, P::ETA_BITS, out)
}

/// Rejects packed values above `2 * eta`.
pub(crate) fn unpack_eta<P: MlDsaSchemeParams>(bytes: &[u8]) -> Result<Poly> {
    let poly = unpack_offset(bytes, P::ETA, P::ETA_BITS)?;
    if poly.coeffs.iter().any(|&c| c < -P::ETA) {
        return Err(Error::Deserialization("secret coefficient out of range"));
    }
    Ok(poly)
}

/// `z` coefficients in `(-gamma1, gamma1]`.
pub(crate) fn pack_z<P: MlDsaSchemeParams>(poly: &Poly, out: &mut [u8]) -> Result<()> {
    pack_offset(poly, P::GAMMA1, P::Z_BITS, out)
}

/// Every bit pattern decodes; the norm check happens at verification.
pub(crate) fn unpack_z<P: MlDsaSchemeParams>(bytes: &[u8]) -> Result<Poly> {
    unpack_offset(bytes, P::GAMMA1, P::Z_BITS)
}

/// `w1` coefficients in `[0, (q-1) / (2 * gamma2))`.
pub(crate) fn pack_w1<P: MlDsaSchemeParams>(poly: &Poly, out: &mut [u8]) -> Result<()> {
    Ok(DefaultCoefficientSerde::pack_coeffs(poly, P::W1_BITS, out)?)
}

/// Concatenated `w1` encoding hashed into the challenge seed.
pub(crate) fn pack_w1_vec<P: MlDsaSchemeParams>(w1: &PolyVecK<P>) -> Result<Vec<u8>> {
    let mut out = vec![0u8; P::K_DIM * P::POLYW1_PACKED_BYTES];
    for (poly, chunk) in w1
        .polys
        .iter()
        .zip(out.chunks_exact_mut(P::POLYW1_PACKED_BYTES))
    {
        pack_w1::<P>(poly, chunk)?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Hint section (HintBitPack / HintBitUnpack)
// ---------------------------------------------------------------------------

/// Writes the positions of the set hint bits followed by K cumulative counts.
///
/// The caller guarantees at most OMEGA set bits; `out` is `OMEGA + K` bytes.
pub(crate) fn pack_hint<P: MlDsaSchemeParams>(h: &PolyVecK<P>, out: &mut [u8]) -> Result<()> {
    if out.len() != P::POLYVECH_PACKED_BYTES {
        return Err(Error::InvalidSignatureSize {
            expected: P::POLYVECH_PACKED_BYTES,
            actual: out.len(),
        });
    }
    out.fill(0);

    let mut k = 0usize;
    for (i, poly) in h.polys.iter().enumerate() {
        for (j, &bit) in poly.coeffs.iter().enumerate() {
            if bit != 0 {
                if k == P::OMEGA {
                    return Err(Error::Deserialization("too many hint bits"));
                }
                out[k] = j as u8;
                k += 1;
            }
        }
        out[P::OMEGA + i] = k as u8;
    }
    Ok(())
}

/// Strict inverse of [`pack_hint`].
///
/// Rejects decreasing or oversized counts, indices that are not strictly
/// increasing within a row and nonzero padding.
pub(crate) fn unpack_hint<P: MlDsaSchemeParams>(bytes: &[u8]) -> Result<PolyVecK<P>> {
    if bytes.len() != P::POLYVECH_PACKED_BYTES {
        return Err(Error::InvalidSignatureSize {
            expected: P::POLYVECH_PACKED_BYTES,
            actual: bytes.len(),
        });
    }

    let mut h = PolyVecK::<P>::zero();
    let mut k = 0usize;
    for (i, poly) in h.polys.iter_mut().enumerate() {
        let end = bytes[P::OMEGA + i] as usize;
        if end < k || end > P::OMEGA {
            return Err(Error::Deserialization("malformed hint counts"));
        }
        for j in k..end {
            if j > k && bytes[j] <= bytes[j - 1] {
                return Err(Error::Deserialization("hint indices not increasing"));
            }
            poly.coeffs[bytes[j] as usize] = 1;
        }
        k = end;
    }

    if bytes[k..P::OMEGA].iter().any(|&b| b != 0) {
        return Err(Error::Deserialization("nonzero hint padding"));
    }
    Ok(h)
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Packs `rho || t1`.
pub(crate) fn pack_public_key<P: MlDsaSchemeParams>(
    rho: &[u8; SEED_BYTES],
    t1: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    let mut pk = vec![0u8; P::PUBLIC_KEY_BYTES];
    let (head, body) = pk.split_at_mut(SEED_BYTES);
    head.copy_from_slice(rho);
    for (poly, chunk) in t1.polys.iter().zip(body.chunks_exact_mut(POLYT1_PACKED_BYTES)) {
        pack_t1(poly, chunk)?;
    }
    Ok(pk)
}

/// Splits a public key into `rho` and `t1`.
pub(crate) fn unpack_public_key<P: MlDsaSchemeParams>(
    pk: &[u8],
) -> Result<([u8; SEED_BYTES], PolyVecK<P>)> {
    if pk.len() != P::PUBLIC_KEY_BYTES {
        return Err(Error::InvalidKeySize {
            expected: P::PUBLIC_KEY_BYTES,
            actual: pk.len(),
        });
    }

    let (head, body) = pk.split_at(SEED_BYTES);
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(head);
    let t1 = body
        .chunks_exact(POLYT1_PACKED_BYTES)
        .map(unpack_t1)
        .collect::<Result<Vec<_>>>()?;
    Ok((rho, PolyVecK::from_polys(t1)))
}

/// Decoded secret key; wiped on drop.
pub(crate) struct SecretKeyParts<P: MlDsaSchemeParams> {
    pub rho: [u8; SEED_BYTES],
    pub key: [u8; SEED_BYTES],
    pub tr: [u8; TR_BYTES],
    pub s1: PolyVecL<P>,
    pub s2: PolyVecK<P>,
    pub t0: PolyVecK<P>,
}

impl<P: MlDsaSchemeParams> Zeroize for SecretKeyParts<P> {
    fn zeroize(&mut self) {
        self.rho.zeroize();
        self.key.zeroize();
        self.tr.zeroize();
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
    }
}

impl<P: MlDsaSchemeParams> Drop for SecretKeyParts<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: MlDsaSchemeParams> ZeroizeOnDrop for SecretKeyParts<P> {}

/// Packs `rho || key || tr || s1 || s2 || t0`.
pub(crate) fn pack_secret_key<P: MlDsaSchemeParams>(parts: &SecretKeyParts<P>) -> Result<Vec<u8>> {
    let mut sk = vec![0u8; P::SECRET_KEY_BYTES];
    if let Err(e) = fill_secret_key(parts, &mut sk) {
        sk.zeroize();
        return Err(e);
    }
    Ok(sk)
}

fn fill_secret_key<P: MlDsaSchemeParams>(parts: &SecretKeyParts<P>, sk: &mut [u8]) -> Result<()> {
    let (seeds, rest) = sk.split_at_mut(2 * SEED_BYTES + TR_BYTES);
    seeds[..SEED_BYTES].copy_from_slice(&parts.rho);
    seeds[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&parts.key);
    seeds[2 * SEED_BYTES..].copy_from_slice(&parts.tr);

    let (s1_bytes, rest) = rest.split_at_mut(P::L_DIM * P::POLYETA_PACKED_BYTES);
    let (s2_bytes, t0_bytes) = rest.split_at_mut(P::K_DIM * P::POLYETA_PACKED_BYTES);
    for (poly, chunk) in parts
        .s1
        .polys
        .iter()
        .zip(s1_bytes.chunks_exact_mut(P::POLYETA_PACKED_BYTES))
    {
        pack_eta::<P>(poly, chunk)?;
    }
    for (poly, chunk) in parts
        .s2
        .polys
        .iter()
        .zip(s2_bytes.chunks_exact_mut(P::POLYETA_PACKED_BYTES))
    {
        pack_eta::<P>(poly, chunk)?;
    }
    for (poly, chunk) in parts
        .t0
        .polys
        .iter()
        .zip(t0_bytes.chunks_exact_mut(POLYT0_PACKED_BYTES))
    {
        pack_t0(poly, chunk)?;
    }
    Ok(())
}

/// Decodes a secret key, refusing out-of-range η coefficients.
pub(crate) fn unpack_secret_key<P: MlDsaSchemeParams>(sk: &[u8]) -> Result<SecretKeyParts<P>> {
    if sk.len() != P::SECRET_KEY_BYTES {
        return Err(Error::InvalidKeySize {
            expected: P::SECRET_KEY_BYTES,
            actual: sk.len(),
        });
    }

    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: [0u8; TR_BYTES],
        s1: PolyVecL::zero(),
        s2: PolyVecK::zero(),
        t0: PolyVecK::zero(),
    };

    let (seeds, rest) = sk.split_at(2 * SEED_BYTES + TR_BYTES);
    parts.rho.copy_from_slice(&seeds[..SEED_BYTES]);
    parts.key.copy_from_slice(&seeds[SEED_BYTES..2 * SEED_BYTES]);
    parts.tr.copy_from_slice(&seeds[2 * SEED_BYTES..]);

    let (s1_bytes, rest) = rest.split_at(P::L_DIM * P::POLYETA_PACKED_BYTES);
    let (s2_bytes, t0_bytes) = rest.split_at(P::K_DIM * P::POLYETA_PACKED_BYTES);
    for (poly, chunk) in parts
        .s1
        .polys
        .iter_mut()
        .zip(s1_bytes.chunks_exact(P::POLYETA_PACKED_BYTES))
    {
        *poly = unpack_eta::<P>(chunk)?;
    }
    for (poly, chunk) in parts
        .s2
        .polys
        .iter_mut()
        .zip(s2_bytes.chunks_exact(P::POLYETA_PACKED_BYTES))
    {
        *poly = unpack_eta::<P>(chunk)?;
    }
    for (poly, chunk) in parts
        .t0
        .polys
        .iter_mut()
        .zip(t0_bytes.chunks_exact(POLYT0_PACKED_BYTES))
    {
        *poly = unpack_t0(chunk)?;
    }
    Ok(parts)
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Packs `c̃ || z || h`.
pub(crate) fn pack_signature<P: MlDsaSchemeParams>(
    c_tilde: &[u8],
    z: &PolyVecL<P>,
    h: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    if c_tilde.len() != P::CTILDE_BYTES {
        return Err(Error::InvalidSignatureSize {
            expected: P::CTILDE_BYTES,
            actual: c_tilde.len(),
        });
    }

    let mut sig = vec![0u8; P::SIGNATURE_SIZE];
    let (head, rest) = sig.split_at_mut(P::CTILDE_BYTES);
    head.copy_from_slice(c_tilde);
    let (z_bytes, h_bytes) = rest.split_at_mut(P::L_DIM * P::POLYZ_PACKED_BYTES);
    for (poly, chunk) in z.polys.iter().zip(z_bytes.chunks_exact_mut(P::POLYZ_PACKED_BYTES)) {
        pack_z::<P>(poly, chunk)?;
    }
    pack_hint::<P>(h, h_bytes)?;
    Ok(sig)
}

/// Splits a signature into `c̃`, `z` and `h`; the hint section is decoded strictly.
pub(crate) fn unpack_signature<P: MlDsaSchemeParams>(
    sig: &[u8],
) -> Result<(Vec<u8>, PolyVecL<P>, PolyVecK<P>)> {
    if sig.len() != P::SIGNATURE_SIZE {
        return Err(Error::InvalidSignatureSize {
            expected: P::SIGNATURE_SIZE,
            actual: sig.len(),
        });
    }

    let (c_tilde, rest) = sig.split_at(P::CTILDE_BYTES);
    let (z_bytes, h_bytes) = rest.split_at(P::L_DIM * P::POLYZ_PACKED_BYTES);
    let z = z_bytes
        .chunks_exact(P::POLYZ_PACKED_BYTES)
        .map(unpack_z::<P>)
        .collect::<Result<Vec<_>>>()?;
    let h = unpack_hint::<P>(h_bytes)?;
    Ok((c_tilde.to_vec(), PolyVecL::from_polys(z), h))
}

/// Number of set bits in a decoded hint vector.
#[cfg(test)]
pub(crate) fn hint_weight<P: MlDsaSchemeParams>(h: &PolyVecK<P>) -> usize {
    h.polys
        .iter()
        .map(|p| p.coeffs.iter().filter(|&&c| c != 0).count())
        .sum()
}

/// Offset into the hint section where row counts start
#[cfg(test)]
pub(crate) fn hint_counts_offset<P: MlDsaSchemeParams>() -> usize {
    P::SIGNATURE_SIZE - P::K_DIM
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldsa_params::pqc::mldsa::{MlDsa44Params, MlDsa65Params};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    type P44 = MlDsa44Params;

    fn random_poly(rng: &mut ChaCha20Rng, lo: i32, hi: i32) -> Poly {
        let mut p = Poly::zero();
        for c in p.coeffs.iter_mut() {
            *c = rng.gen_range(lo..=hi);
        }
        p
    }

    #[test]
    fn test_offset_codecs_recover_ranges() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let t0 = random_poly(&mut rng, -(1 << 12) + 1, 1 << 12);
        let mut buf = [0u8; POLYT0_PACKED_BYTES];
        pack_t0(&t0, &mut buf).unwrap();
        assert_eq!(unpack_t0(&buf).unwrap(), t0);

        let g1 = MlDsa65Params::GAMMA1;
        let z = random_poly(&mut rng, -g1 + 1, g1);
        let mut buf = vec![0u8; MlDsa65Params::POLYZ_PACKED_BYTES];
        pack_z::<MlDsa65Params>(&z, &mut buf).unwrap();
        assert_eq!(unpack_z::<MlDsa65Params>(&buf).unwrap(), z);

        let s = random_poly(&mut rng, -4, 4);
        let mut buf = vec![0u8; MlDsa65Params::POLYETA_PACKED_BYTES];
        pack_eta::<MlDsa65Params>(&s, &mut buf).unwrap();
        assert_eq!(unpack_eta::<MlDsa65Params>(&buf).unwrap(), s);
    }

    #[test]
    fn test_eta_decode_rejects_large_values() {
        // eta = 2 uses 3 bits; packed 5 would mean -3
        let mut buf = vec![0u8; P44::POLYETA_PACKED_BYTES];
        buf[0] = 0b101;
        assert_eq!(
            unpack_eta::<P44>(&buf).unwrap_err(),
            Error::Deserialization("secret coefficient out of range")
        );
        buf[0] = 0b100;
        assert_eq!(unpack_eta::<P44>(&buf).unwrap().coeffs[0], -2);
    }

    #[test]
    fn test_t0_layout() {
        // coefficient 0 is stored as 2^12
        let mut buf = [0u8; POLYT0_PACKED_BYTES];
        pack_t0(&Poly::zero(), &mut buf).unwrap();
        assert_eq!(&buf[..2], &[0x00, 0x10]);
    }

    fn hints(rows: &[&[usize]]) -> PolyVecK<P44> {
        let mut h = PolyVecK::<P44>::zero();
        for (i, idx) in rows.iter().enumerate() {
            for &j in idx.iter() {
                h.polys[i].coeffs[j] = 1;
            }
        }
        h
    }

    #[test]
    fn test_hint_layout() {
        let h = hints(&[&[3, 200], &[], &[0], &[255]]);
        let mut buf = vec![0u8; P44::POLYVECH_PACKED_BYTES];
        pack_hint::<P44>(&h, &mut buf).unwrap();
        assert_eq!(&buf[..4], &[3, 200, 0, 255]);
        assert!(buf[4..P44::OMEGA].iter().all(|&b| b == 0));
        assert_eq!(&buf[P44::OMEGA..], &[2, 2, 3, 4]);
        assert_eq!(unpack_hint::<P44>(&buf).unwrap(), h);
        assert_eq!(hint_weight(&h), 4);
    }

    #[test]
    fn test_hint_decode_is_strict() {
        let h = hints(&[&[3, 200], &[], &[0], &[255]]);
        let mut good = vec![0u8; P44::POLYVECH_PACKED_BYTES];
        pack_hint::<P44>(&h, &mut good).unwrap();

        // swapped indices within a row
        let mut bad = good.clone();
        bad.swap(0, 1);
        assert!(unpack_hint::<P44>(&bad).is_err());

        // repeated index
        let mut bad = good.clone();
        bad[1] = 3;
        assert!(unpack_hint::<P44>(&bad).is_err());

        // decreasing cumulative count
        let mut bad = good.clone();
        bad[P44::OMEGA + 1] = 1;
        assert!(unpack_hint::<P44>(&bad).is_err());

        // count beyond omega
        let mut bad = good.clone();
        bad[P44::OMEGA + 3] = (P44::OMEGA + 1) as u8;
        assert!(unpack_hint::<P44>(&bad).is_err());

        // nonzero padding
        let mut bad = good.clone();
        bad[P44::OMEGA - 1] = 1;
        assert!(unpack_hint::<P44>(&bad).is_err());

        // ordering across rows is free: row 2 may restart at 0
        assert!(unpack_hint::<P44>(&good).is_ok());
    }

    #[test]
    fn test_hint_pack_refuses_overflow() {
        let mut h = PolyVecK::<P44>::zero();
        for j in 0..=P44::OMEGA {
            h.polys[0].coeffs[j] = 1;
        }
        let mut buf = vec![0u8; P44::POLYVECH_PACKED_BYTES];
        assert!(pack_hint::<P44>(&h, &mut buf).is_err());
    }

    #[test]
    fn test_key_and_signature_layouts() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let rho = [0xA5u8; SEED_BYTES];
        let t1 = PolyVecK::<P44>::from_polys((0..4).map(|_| random_poly(&mut rng, 0, 1023)).collect());
        let pk = pack_public_key::<P44>(&rho, &t1).unwrap();
        assert_eq!(pk.len(), P44::PUBLIC_KEY_BYTES);
        let (rho2, t1b) = unpack_public_key::<P44>(&pk).unwrap();
        assert_eq!(rho2, rho);
        assert_eq!(t1b, t1);
        assert!(unpack_public_key::<P44>(&pk[1..]).is_err());

        let parts = SecretKeyParts::<P44> {
            rho,
            key: [1u8; SEED_BYTES],
            tr: [2u8; TR_BYTES],
            s1: PolyVecL::from_polys((0..4).map(|_| random_poly(&mut rng, -2, 2)).collect()),
            s2: PolyVecK::from_polys((0..4).map(|_| random_poly(&mut rng, -2, 2)).collect()),
            t0: PolyVecK::from_polys(
                (0..4)
                    .map(|_| random_poly(&mut rng, -(1 << 12) + 1, 1 << 12))
                    .collect(),
            ),
        };
        let sk = pack_secret_key(&parts).unwrap();
        assert_eq!(sk.len(), P44::SECRET_KEY_BYTES);
        assert_eq!(&sk[..SEED_BYTES], &rho);
        let back = unpack_secret_key::<P44>(&sk).unwrap();
        assert_eq!(back.key, parts.key);
        assert_eq!(back.tr, parts.tr);
        assert_eq!(back.s1, parts.s1);
        assert_eq!(back.s2, parts.s2);
        assert_eq!(back.t0, parts.t0);

        let g1 = P44::GAMMA1;
        let z = PolyVecL::<P44>::from_polys((0..4).map(|_| random_poly(&mut rng, -g1 + 1, g1)).collect());
        let h = hints(&[&[1], &[2, 3], &[], &[]]);
        let c_tilde = [7u8; 32];
        let sig = pack_signature::<P44>(&c_tilde, &z, &h).unwrap();
        assert_eq!(sig.len(), P44::SIGNATURE_SIZE);
        assert_eq!(&sig[hint_counts_offset::<P44>()..], &[1, 3, 3, 3]);
        let (ct, z2, h2) = unpack_signature::<P44>(&sig).unwrap();
        assert_eq!(ct, c_tilde);
        assert_eq!(z2, z);
        assert_eq!(h2, h);
        assert!(unpack_signature::<P44>(&sig[..sig.len() - 1]).is_err());
    }
}
