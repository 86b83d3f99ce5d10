//! ML-DSA key generation, signing and verification (FIPS 204 final).
//!
//! Fiat-Shamir with aborts over module lattices. Signing retries until
//!
//! - `||z||∞ < γ1 - β`
//! - `||LowBits(w - c·s2)||∞ < γ2 - β`
//! - `||c·t0||∞ < γ2`
//! - the hint has at most ω set bits
//!
//! Domains: `A` is sampled directly in NTT form; every product goes through
//! `pointwise_*_montgomery` followed by `inv_ntt_tomont`, whose extra 2^32
//! factor cancels the Montgomery factor of the product.
//!
//! Internal module - use the public `MlDsa44/65/87` types instead.

use log::{debug, trace};
use mldsa_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use mldsa_internal::ct_eq;
use mldsa_params::pqc::mldsa::{
    MlDsaSchemeParams, CRH_BYTES, MAX_CONTEXT_BYTES, MLDSA_D, RND_BYTES, SEED_BYTES, TR_BYTES,
};
use zeroize::{Zeroize, Zeroizing};

use super::arithmetic::{
    decompose_polyveck, make_hint_polyveck, power2round_polyveck, use_hint_polyveck,
};
use super::backend::SymmetricBackend;
use super::encoding::{
    pack_public_key, pack_secret_key, pack_signature, pack_w1_vec, unpack_public_key,
    unpack_secret_key, unpack_signature, SecretKeyParts,
};
use super::polyvec::{expand_matrix, matrix_pointwise_montgomery, PolyVecK, PolyVecL};
use super::sampling::{challenge, expand_mask, expand_secrets};
use crate::error::{Error, Result};

/// `tr = H(pk)`
fn public_key_digest(pk: &[u8]) -> Result<[u8; TR_BYTES]> {
    let mut tr = [0u8; TR_BYTES];
    ShakeXof256::generate_into(&[pk], &mut tr)?;
    Ok(tr)
}

/// `mu = H(tr || 0 || |ctx| || ctx || M)`
fn message_representative(tr: &[u8], ctx: &[u8], message: &[u8]) -> Result<[u8; CRH_BYTES]> {
    if ctx.len() > MAX_CONTEXT_BYTES {
        return Err(Error::ContextTooLong { length: ctx.len() });
    }
    let mut mu = [0u8; CRH_BYTES];
    ShakeXof256::generate_into(&[tr, &[0u8, ctx.len() as u8], ctx, message], &mut mu)?;
    Ok(mu)
}

/// `t = A·s1 + s2`, coefficients in `[0, Q)`.
fn compute_t<P, B>(
    rho: &[u8; SEED_BYTES],
    s1: &PolyVecL<P>,
    s2: &PolyVecK<P>,
) -> Result<PolyVecK<P>>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    let mat = expand_matrix::<P, B>(rho)?;
    let mut s1_hat = Zeroizing::new(s1.clone());
    s1_hat.ntt_inplace();

    let mut t = matrix_pointwise_montgomery(&mat, &*s1_hat);
    t.reduce();
    t.inv_ntt_tomont_inplace();
    t.add_assign(s2);
    t.caddq();
    Ok(t)
}

/// Key generation from a 32-byte seed (ML-DSA.KeyGen_internal).
///
/// Returns `(pk, sk)`.
pub(crate) fn keypair_internal<P, B>(
    seed: &[u8; SEED_BYTES],
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    debug!("{} key generation ({} backend)", P::NAME, B::NAME);

    // Step 1: (rho, rhoprime, key) = H(seed || K || L)
    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    ShakeXof256::generate_into(
        &[seed, &[P::K_DIM as u8, P::L_DIM as u8]],
        expanded.as_mut_slice(),
    )?;
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&expanded[..SEED_BYTES]);
    let rhoprime = &expanded[SEED_BYTES..SEED_BYTES + CRH_BYTES];
    let mut key = [0u8; SEED_BYTES];
    key.copy_from_slice(&expanded[SEED_BYTES + CRH_BYTES..]);

    // Step 2: secrets s1, s2
    let (s1, s2) = expand_secrets::<P, B::SecretStream>(rhoprime)?;

    // Step 3: t = A·s1 + s2 and its split into (t1, t0)
    let mut t = compute_t::<P, B>(&rho, &s1, &s2)?;
    let (t1, t0) = power2round_polyveck(&t);
    t.zeroize();

    // Step 4: pk = rho || t1, tr = H(pk)
    let pk = pack_public_key::<P>(&rho, &t1)?;
    let tr = public_key_digest(&pk)?;

    // Step 5: sk = rho || key || tr || s1 || s2 || t0
    let parts = SecretKeyParts {
        rho,
        key,
        tr,
        s1,
        s2,
        t0,
    };
    key.zeroize();
    let sk = Zeroizing::new(pack_secret_key(&parts)?);

    Ok((pk, sk))
}

/// Signing (ML-DSA.Sign_internal with the context-prefixed message).
///
/// `rnd` is all zeros for deterministic signatures and fresh randomness for
/// hedged ones.
pub(crate) fn sign_internal<P, B>(
    sk: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; RND_BYTES],
) -> Result<Vec<u8>>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    debug!("{} signing ({} backend)", P::NAME, B::NAME);

    // Step 1: decode the secret key
    let parts = unpack_secret_key::<P>(sk)?;

    // Step 2: mu = H(tr || 0 || |ctx| || ctx || M), rhoprime = H(key || rnd || mu)
    let mu = message_representative(&parts.tr, ctx, message)?;
    let mut rhoprime = Zeroizing::new([0u8; CRH_BYTES]);
    ShakeXof256::generate_into(&[&parts.key, rnd, &mu], rhoprime.as_mut_slice())?;

    // Step 3: A, and s1, s2, t0 in NTT form
    let mat = expand_matrix::<P, B>(&parts.rho)?;
    let mut s1_hat = Zeroizing::new(parts.s1.clone());
    s1_hat.ntt_inplace();
    let mut s2_hat = Zeroizing::new(parts.s2.clone());
    s2_hat.ntt_inplace();
    let mut t0_hat = Zeroizing::new(parts.t0.clone());
    t0_hat.ntt_inplace();

    let mut c_tilde = vec![0u8; P::CTILDE_BYTES];
    let mut kappa: u16 = 0;
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;

        // Step 4: y = ExpandMask(rhoprime, kappa), w = A·y
        let y = Zeroizing::new(expand_mask::<P, B::SecretStream>(rhoprime.as_slice(), kappa)?);
        kappa = kappa.wrapping_add(1);
        let mut y_hat = Zeroizing::new((*y).clone());
        y_hat.ntt_inplace();
        let mut w = Zeroizing::new(matrix_pointwise_montgomery(&mat, &*y_hat));
        w.reduce();
        w.inv_ntt_tomont_inplace();
        w.caddq();

        // Step 5: (w1, w0) = Decompose(w), c̃ = H(mu || w1)
        let (w1, w0) = decompose_polyveck(&*w);
        let mut w0 = Zeroizing::new(w0);
        let w1_packed = pack_w1_vec::<P>(&w1)?;
        ShakeXof256::generate_into(&[&mu, &w1_packed], &mut c_tilde)?;
        let mut cp = challenge::<P>(&c_tilde)?;
        cp.ntt_inplace();

        // Step 6: z = y + c·s1
        let mut z = Zeroizing::new(s1_hat.pointwise_poly_montgomery(&cp));
        z.inv_ntt_tomont_inplace();
        z.add_assign(&y);
        z.reduce();
        if z.exceeds_norm(P::GAMMA1 - P::BETA) {
            continue;
        }

        // Step 7: r0 = LowBits(w - c·s2)
        let mut cs2 = Zeroizing::new(s2_hat.pointwise_poly_montgomery(&cp));
        cs2.inv_ntt_tomont_inplace();
        w0.sub_assign(&cs2);
        w0.reduce();
        if w0.exceeds_norm(P::GAMMA2 - P::BETA) {
            continue;
        }

        // Step 8: hints for w1 from r0 + c·t0
        let mut ct0 = Zeroizing::new(t0_hat.pointwise_poly_montgomery(&cp));
        ct0.inv_ntt_tomont_inplace();
        ct0.reduce();
        if ct0.exceeds_norm(P::GAMMA2) {
            continue;
        }
        w0.add_assign(&ct0);
        let (h, n) = make_hint_polyveck(&*w0, &w1);
        if n > P::OMEGA {
            continue;
        }

        // Step 9: sig = c̃ || z || h
        trace!("{} signature after {} attempt(s)", P::NAME, attempts);
        return pack_signature::<P>(&c_tilde, &z, &h);
    }
}

/// Verification (ML-DSA.Verify_internal with the context-prefixed message).
///
/// Every failure, whatever its cause, is reported as the same
/// [`Error::Verification`].
pub(crate) fn verify_internal<P, B>(
    pk: &[u8],
    message: &[u8],
    ctx: &[u8],
    sig: &[u8],
) -> Result<()>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    debug!("{} verification ({} backend)", P::NAME, B::NAME);

    match check_signature::<P, B>(pk, message, ctx, sig) {
        Ok(true) => Ok(()),
        _ => Err(Error::Verification { algorithm: P::NAME }),
    }
}

fn check_signature<P, B>(pk: &[u8], message: &[u8], ctx: &[u8], sig: &[u8]) -> Result<bool>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    // Step 1: decode; the hint section is checked for canonical form here
    let (rho, mut t1) = unpack_public_key::<P>(pk)?;
    let (c_tilde, mut z, h) = unpack_signature::<P>(sig)?;
    if z.exceeds_norm(P::GAMMA1 - P::BETA) {
        return Ok(false);
    }

    // Step 2: mu = H(H(pk) || 0 || |ctx| || ctx || M)
    let tr = public_key_digest(pk)?;
    let mu = message_representative(&tr, ctx, message)?;

    // Step 3: w' = A·z - c·t1·2^d
    let mut cp = challenge::<P>(&c_tilde)?;
    cp.ntt_inplace();
    let mat = expand_matrix::<P, B>(&rho)?;
    z.ntt_inplace();
    let mut w = matrix_pointwise_montgomery(&mat, &z);

    t1.shiftl(MLDSA_D);
    t1.ntt_inplace();
    let ct1 = t1.pointwise_poly_montgomery(&cp);
    w.sub_assign(&ct1);
    w.reduce();
    w.inv_ntt_tomont_inplace();
    w.caddq();

    // Step 4: w1 = UseHint(h, w'), c̃' = H(mu || w1)
    let w1 = use_hint_polyveck(&w, &h);
    let w1_packed = pack_w1_vec::<P>(&w1)?;
    let mut expected = vec![0u8; P::CTILDE_BYTES];
    ShakeXof256::generate_into(&[&mu, &w1_packed], &mut expected)?;

    // Step 5: c̃ == c̃'
    Ok(ct_eq(&c_tilde, &expected))
}

/// Recompute `pk` from the secret part of `sk`.
///
/// Fails with [`Error::InvalidKey`] if the stored `tr` is not `H(pk)`.
pub(crate) fn public_key_from_secret<P, B>(sk: &[u8]) -> Result<Vec<u8>>
where
    P: MlDsaSchemeParams,
    B: SymmetricBackend,
{
    let parts = unpack_secret_key::<P>(sk)?;
    let mut t = compute_t::<P, B>(&parts.rho, &parts.s1, &parts.s2)?;
    let (t1, mut t0) = power2round_polyveck(&t);
    t.zeroize();
    t0.zeroize();

    let pk = pack_public_key::<P>(&parts.rho, &t1)?;
    if !ct_eq(public_key_digest(&pk)?, parts.tr) {
        return Err(Error::InvalidKey("stored tr does not match the public key"));
    }
    Ok(pk)
}
