//! Rejection samplers for ML-DSA.
//!
//! Every sampler consumes its byte source strictly in order. Candidates are
//! rejected on range alone; the accepted values never steer control flow.

use mldsa_algorithms::poly::params::{MlDsaField, Modulus, N};
use mldsa_algorithms::poly::serialize::{CoefficientUnpacker, DefaultCoefficientSerde};
use mldsa_algorithms::stream::SeededStream;
use mldsa_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use mldsa_params::pqc::mldsa::MlDsaSchemeParams;
use zeroize::Zeroize;

use super::polyvec::{Poly, PolyVecK, PolyVecL};
use crate::error::Result;

/// SHAKE256 squeezes this many bytes at a time for the challenge
const CHALLENGE_BLOCK_BYTES: usize = 136;

/// Something that yields consecutive blocks of pseudorandom bytes
trait BlockSource {
    fn next_block(&mut self, out: &mut [u8]) -> Result<()>;
}

struct Stream<S: SeededStream>(S);

impl<S: SeededStream> BlockSource for Stream<S> {
    fn next_block(&mut self, out: &mut [u8]) -> Result<()> {
        self.0.squeeze_blocks(out);
        Ok(())
    }
}

impl BlockSource for ShakeXof256 {
    fn next_block(&mut self, out: &mut [u8]) -> Result<()> {
        self.squeeze(out)?;
        Ok(())
    }
}

/// Buffered byte reader over a block source
struct ByteReader<B: BlockSource> {
    source: B,
    buf: Vec<u8>,
    pos: usize,
}

impl<B: BlockSource> ByteReader<B> {
    fn new(source: B, block_bytes: usize) -> Self {
        Self {
            source,
            buf: vec![0u8; block_bytes],
            pos: block_bytes,
        }
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pos == self.buf.len() {
            self.source.next_block(&mut self.buf)?;
            self.pos = 0;
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn read(&mut self, out: &mut [u8]) -> Result<()> {
        for o in out.iter_mut() {
            *o = self.next_byte()?;
        }
        Ok(())
    }
}

impl<B: BlockSource> Drop for ByteReader<B> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

fn stream_reader<S: SeededStream>(seed: &[u8], nonce: u16) -> Result<ByteReader<Stream<S>>> {
    Ok(ByteReader::new(Stream(S::init(seed, nonce)?), S::BLOCK_BYTES))
}

/// Uniform polynomial mod Q (one entry of A, already in NTT domain).
///
/// Reads 3-byte little-endian candidates, keeps the low 23 bits and accepts
/// values below Q.
pub(crate) fn uniform_poly<S: SeededStream>(seed: &[u8], nonce: u16) -> Result<Poly> {
    let mut reader = stream_reader::<S>(seed, nonce)?;
    let mut poly = Poly::zero();
    let mut ctr = 0;
    let mut b = [0u8; 3];
    while ctr < N {
        reader.read(&mut b)?;
        let t = (b[0] as i32 | (b[1] as i32) << 8 | (b[2] as i32) << 16) & 0x7F_FFFF;
        if t < MlDsaField::Q {
            poly.coeffs[ctr] = t;
            ctr += 1;
        }
    }
    Ok(poly)
}

/// Map a nibble to `[-eta, eta]`, or `None` if it is rejected
#[inline(always)]
fn eta_from_nibble(eta: i32, t: u8) -> Option<i32> {
    let t = t as i32;
    match eta {
        2 if t < 15 => Some(2 - (t - ((205 * t) >> 10) * 5)),
        4 if t < 9 => Some(4 - t),
        _ => None,
    }
}

/// Polynomial with coefficients uniform in `[-eta, eta]`.
///
/// Each byte supplies two nibble candidates, low nibble first.
pub(crate) fn uniform_eta<P: MlDsaSchemeParams, S: SeededStream>(
    seed: &[u8],
    nonce: u16,
) -> Result<Poly> {
    let mut reader = stream_reader::<S>(seed, nonce)?;
    let mut poly = Poly::zero();
    let mut ctr = 0;
    while ctr < N {
        let b = reader.next_byte()?;
        for t in [b & 0x0F, b >> 4] {
            if ctr < N {
                if let Some(c) = eta_from_nibble(P::ETA, t) {
                    poly.coeffs[ctr] = c;
                    ctr += 1;
                }
            }
        }
    }
    Ok(poly)
}

/// Masking polynomial with coefficients in `(-gamma1, gamma1]`.
///
/// No rejection: the first `N * Z_BITS / 8` stream bytes are read as
/// `Z_BITS`-wide values `t` and mapped to `gamma1 - t`.
pub(crate) fn uniform_gamma1<P: MlDsaSchemeParams, S: SeededStream>(
    seed: &[u8],
    nonce: u16,
) -> Result<Poly> {
    let mut reader = stream_reader::<S>(seed, nonce)?;
    let mut bytes = vec![0u8; P::POLYZ_PACKED_BYTES];
    reader.read(&mut bytes)?;
    let mut raw: Poly = DefaultCoefficientSerde::unpack_coeffs(&bytes, P::Z_BITS)?;
    bytes.zeroize();
    let poly = raw.map_coeffs(|t| P::GAMMA1 - t);
    raw.zeroize();
    Ok(poly)
}

/// SampleInBall: exactly TAU coefficients set to ±1, all others zero.
///
/// The first 8 bytes of `SHAKE256(c_tilde)` give the signs; the positions come
/// from an inside-out Fisher-Yates shuffle with rejection-sampled indices.
pub(crate) fn challenge<P: MlDsaSchemeParams>(c_tilde: &[u8]) -> Result<Poly> {
    let mut xof = ShakeXof256::new();
    xof.update(c_tilde)?;
    let mut reader = ByteReader::new(xof, CHALLENGE_BLOCK_BYTES);

    let mut sign_bytes = [0u8; 8];
    reader.read(&mut sign_bytes)?;
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = Poly::zero();
    for i in (N - P::TAU)..N {
        let b = loop {
            let b = reader.next_byte()? as usize;
            if b <= i {
                break b;
            }
        };
        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    Ok(c)
}

/// ExpandS: `s1` with nonces `0..L`, `s2` with nonces `L..L+K`.
pub(crate) fn expand_secrets<P: MlDsaSchemeParams, S: SeededStream>(
    rhoprime: &[u8],
) -> Result<(PolyVecL<P>, PolyVecK<P>)> {
    let s1 = (0..P::L_DIM)
        .map(|i| uniform_eta::<P, S>(rhoprime, i as u16))
        .collect::<Result<Vec<_>>>()?;
    let s2 = (0..P::K_DIM)
        .map(|i| uniform_eta::<P, S>(rhoprime, (P::L_DIM + i) as u16))
        .collect::<Result<Vec<_>>>()?;
    Ok((PolyVecL::from_polys(s1), PolyVecK::from_polys(s2)))
}

/// ExpandMask: `y` for attempt `kappa`, polynomial `i` uses nonce `L * kappa + i`.
pub(crate) fn expand_mask<P: MlDsaSchemeParams, S: SeededStream>(
    rhoprime: &[u8],
    kappa: u16,
) -> Result<PolyVecL<P>> {
    let base = (P::L_DIM as u16).wrapping_mul(kappa);
    let y = (0..P::L_DIM)
        .map(|i| uniform_gamma1::<P, S>(rhoprime, base.wrapping_add(i as u16)))
        .collect::<Result<Vec<_>>>()?;
    Ok(PolyVecL::from_polys(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldsa_algorithms::stream::{Aes256CtrStream, Shake128Stream, Shake256Stream};
    use mldsa_params::pqc::mldsa::{MlDsa44Params, MlDsa65Params, MlDsa87Params};

    #[test]
    fn test_eta_nibble_mapping() {
        // eta = 2: t mod 5 folded onto [-2, 2]
        assert_eq!(eta_from_nibble(2, 0), Some(2));
        assert_eq!(eta_from_nibble(2, 4), Some(-2));
        assert_eq!(eta_from_nibble(2, 5), Some(2));
        assert_eq!(eta_from_nibble(2, 14), Some(-2));
        assert_eq!(eta_from_nibble(2, 15), None);
        for t in 0..15u8 {
            assert_eq!(eta_from_nibble(2, t), Some(2 - (t as i32 % 5)));
        }
        // eta = 4: direct offset
        assert_eq!(eta_from_nibble(4, 0), Some(4));
        assert_eq!(eta_from_nibble(4, 8), Some(-4));
        assert_eq!(eta_from_nibble(4, 9), None);
    }

    #[test]
    fn test_uniform_is_below_q_and_deterministic() {
        let seed = [0x42u8; 32];
        let a = uniform_poly::<Shake128Stream>(&seed, 0x0102).unwrap();
        let b = uniform_poly::<Shake128Stream>(&seed, 0x0102).unwrap();
        let c = uniform_poly::<Shake128Stream>(&seed, 0x0201).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.coeffs.iter().all(|&x| (0..MlDsaField::Q).contains(&x)));

        let d = uniform_poly::<Aes256CtrStream>(&seed, 0x0102).unwrap();
        assert_ne!(a, d);
        assert!(d.coeffs.iter().all(|&x| (0..MlDsaField::Q).contains(&x)));
    }

    #[test]
    fn test_uniform_eta_bounds() {
        let seed = [7u8; 64];
        for nonce in 0..4 {
            let p = uniform_eta::<MlDsa44Params, Shake256Stream>(&seed, nonce).unwrap();
            assert!(p.coeffs.iter().all(|&c| (-2..=2).contains(&c)));
            let p = uniform_eta::<MlDsa65Params, Shake256Stream>(&seed, nonce).unwrap();
            assert!(p.coeffs.iter().all(|&c| (-4..=4).contains(&c)));
            // every value of the range shows up in 256 samples
            assert!((-4..=4).all(|v| p.coeffs.contains(&v)));
        }
    }

    #[test]
    fn test_uniform_gamma1_bounds() {
        let seed = [1u8; 64];
        let g1 = MlDsa44Params::GAMMA1;
        let p = uniform_gamma1::<MlDsa44Params, Shake256Stream>(&seed, 3).unwrap();
        assert!(p.coeffs.iter().all(|&c| c > -g1 && c <= g1));
        let g1 = MlDsa87Params::GAMMA1;
        let p = uniform_gamma1::<MlDsa87Params, Aes256CtrStream>(&seed, 3).unwrap();
        assert!(p.coeffs.iter().all(|&c| c > -g1 && c <= g1));
    }

    #[test]
    fn test_challenge_weight() {
        for (i, tau) in [(0u8, 39usize), (1, 49), (2, 60)] {
            let seed = [i; 48];
            let c = match tau {
                39 => challenge::<MlDsa44Params>(&seed[..32]),
                49 => challenge::<MlDsa65Params>(&seed),
                _ => challenge::<MlDsa87Params>(&seed),
            }
            .unwrap();
            let nonzero = c.coeffs.iter().filter(|&&x| x != 0).count();
            assert_eq!(nonzero, tau);
            assert!(c.coeffs.iter().all(|&x| (-1..=1).contains(&x)));
        }
        let a = challenge::<MlDsa44Params>(&[5u8; 32]).unwrap();
        let b = challenge::<MlDsa44Params>(&[5u8; 32]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mask_nonces_advance_per_attempt() {
        let rhoprime = [9u8; 64];
        let y0 = expand_mask::<MlDsa44Params, Shake256Stream>(&rhoprime, 0).unwrap();
        let y1 = expand_mask::<MlDsa44Params, Shake256Stream>(&rhoprime, 1).unwrap();
        // attempt 1, polynomial 0 uses nonce L = 4
        let p = uniform_gamma1::<MlDsa44Params, Shake256Stream>(&rhoprime, 4).unwrap();
        assert_eq!(y1.polys[0], p);
        assert_ne!(y0.polys[0], y1.polys[0]);
    }
}
