//! ML-DSA digital signatures (CRYSTALS-Dilithium, FIPS 204)
//!
//! This module provides ML-DSA-44, ML-DSA-65 and ML-DSA-87, lattice-based
//! signature schemes whose security rests on Module-LWE and Module-SIS.
//! Signing follows the Fiat-Shamir with aborts paradigm.
//!
//! Submodules:
//! - `polyvec.rs`: `PolyVecL`, `PolyVecK` and matrix expansion
//! - `arithmetic.rs`: `Power2Round`, `Decompose`, `MakeHint`, `UseHint`
//! - `sampling.rs`: rejection samplers for `A`, `s1`/`s2`, `y` and `c`
//! - `encoding.rs`: strict byte formats of keys and signatures
//! - `sign.rs`: `keypair_internal`, `sign_internal`, `verify_internal`
//! - `backend.rs`: choice of SHAKE or AES-256-CTR for the seeded streams
//!
//! Keys and signatures are opaque byte wrappers. A key generated for one
//! parameter set or backend is refused by the others.

use core::fmt;
use core::marker::PhantomData;

use mldsa_api::{
    Result as ApiResult, SecretBytes, Signature as SignatureTrait, SignatureDerive,
    SignatureSerialize,
};
use mldsa_params::pqc::mldsa::{
    MlDsa44Params, MlDsa65Params, MlDsa87Params, MlDsaSchemeParams, RND_BYTES, SEED_BYTES,
};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::Error as SignError;

mod arithmetic;
mod backend;
mod encoding;
mod polyvec;
mod sampling;
mod sign;


pub use backend::{AesBackend, ShakeBackend, SymmetricBackend};

/// ML-DSA public key.
///
/// Packed `(rho, t1)`: the 32-byte matrix seed followed by the high bits of
/// `t = A·s1 + s2`, 10 bits per coefficient.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MlDsaPublicKey(Vec<u8>);

/// ML-DSA secret key.
///
/// Packed `(rho, key, tr, s1, s2, t0)`. Wiped on drop; `Debug` never prints
/// the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MlDsaSecretKey(Vec<u8>);

/// ML-DSA signature.
///
/// Packed `(c̃, z, h)`: challenge seed, response vector and hint positions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MlDsaSignatureData(Vec<u8>);

impl AsRef<[u8]> for MlDsaPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for MlDsaSignatureData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MlDsaSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MlDsaSecretKey({} bytes, [REDACTED])", self.0.len())
    }
}

// Secret keys expose no AsRef / AsMut; use SignatureSerialize to export them.

impl MlDsaPublicKey {
    /// Wrap a public key, checking that its length matches a parameter set
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        match bytes.len() {
            n if n == MlDsa44Params::PUBLIC_KEY_BYTES
                || n == MlDsa65Params::PUBLIC_KEY_BYTES
                || n == MlDsa87Params::PUBLIC_KEY_BYTES => {}
            _ => return Err(SignError::Deserialization("unknown public key size")),
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Get the serialized bytes of this public key
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl MlDsaSecretKey {
    /// Decode a secret key, checking its length and the range of `s1` / `s2`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        match bytes.len() {
            n if n == MlDsa44Params::SECRET_KEY_BYTES => {
                encoding::unpack_secret_key::<MlDsa44Params>(bytes)?;
            }
            n if n == MlDsa65Params::SECRET_KEY_BYTES => {
                encoding::unpack_secret_key::<MlDsa65Params>(bytes)?;
            }
            n if n == MlDsa87Params::SECRET_KEY_BYTES => {
                encoding::unpack_secret_key::<MlDsa87Params>(bytes)?;
            }
            _ => return Err(SignError::Deserialization("unknown secret key size")),
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Export the packed secret key; the copy is wiped when dropped
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.clone())
    }
}

impl MlDsaSignatureData {
    /// Decode a signature, checking its length, hint encoding and `z` range
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        match bytes.len() {
            n if n == MlDsa44Params::SIGNATURE_SIZE => check_signature_bytes::<MlDsa44Params>(bytes)?,
            n if n == MlDsa65Params::SIGNATURE_SIZE => check_signature_bytes::<MlDsa65Params>(bytes)?,
            n if n == MlDsa87Params::SIGNATURE_SIZE => check_signature_bytes::<MlDsa87Params>(bytes)?,
            _ => return Err(SignError::Deserialization("unknown signature size")),
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Get the serialized bytes of this signature
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }
}

fn check_signature_bytes<P: MlDsaSchemeParams>(bytes: &[u8]) -> Result<(), SignError> {
    let (_, z, _) = encoding::unpack_signature::<P>(bytes)?;
    if z.exceeds_norm(P::GAMMA1 - P::BETA) {
        return Err(SignError::Deserialization("response vector out of range"));
    }
    Ok(())
}

/// ML-DSA over parameter set `P` and stream backend `B`.
///
/// `B` defaults to [`ShakeBackend`], the FIPS 204 instantiation.
pub struct MlDsa<P: MlDsaSchemeParams, B: SymmetricBackend = ShakeBackend> {
    _params: PhantomData<(P, B)>,
}

impl<P: MlDsaSchemeParams, B: SymmetricBackend> MlDsa<P, B> {
    /// Deterministic key generation from a 32-byte seed
    pub fn keypair_from_seed(
        seed: &[u8; SEED_BYTES],
    ) -> ApiResult<(MlDsaPublicKey, MlDsaSecretKey)> {
        let (pk, sk) = sign::keypair_internal::<P, B>(seed)?;
        Ok((MlDsaPublicKey(pk), MlDsaSecretKey(sk.to_vec())))
    }

    /// Deterministic signature over `message` under context string `ctx`
    ///
    /// # Errors
    ///
    /// Fails if `ctx` is longer than 255 bytes or the key has the wrong size.
    pub fn sign_with_context(
        message: &[u8],
        ctx: &[u8],
        secret_key: &MlDsaSecretKey,
    ) -> ApiResult<MlDsaSignatureData> {
        let rnd = [0u8; RND_BYTES];
        let sig = sign::sign_internal::<P, B>(&secret_key.0, message, ctx, &rnd)?;
        Ok(MlDsaSignatureData(sig))
    }

    /// Hedged signature: mixes 32 fresh bytes from `rng` into the mask seed
    pub fn sign_randomized<R: RngCore + CryptoRng>(
        message: &[u8],
        ctx: &[u8],
        secret_key: &MlDsaSecretKey,
        rng: &mut R,
    ) -> ApiResult<MlDsaSignatureData> {
        let mut rnd = Zeroizing::new([0u8; RND_BYTES]);
        rng.try_fill_bytes(rnd.as_mut_slice()).map_err(SignError::from)?;
        let sig = sign::sign_internal::<P, B>(&secret_key.0, message, ctx, &rnd)?;
        Ok(MlDsaSignatureData(sig))
    }

    /// Verify a signature over `message` under context string `ctx`
    ///
    /// Every failure returns the same opaque error.
    pub fn verify_with_context(
        message: &[u8],
        ctx: &[u8],
        signature: &MlDsaSignatureData,
        public_key: &MlDsaPublicKey,
    ) -> ApiResult<()> {
        sign::verify_internal::<P, B>(&public_key.0, message, ctx, &signature.0)?;
        Ok(())
    }

    /// Deterministic signature followed by the message: `sig || message`
    pub fn sign_embed(message: &[u8], ctx: &[u8], secret_key: &MlDsaSecretKey) -> ApiResult<Vec<u8>> {
        let sig = Self::sign_with_context(message, ctx, secret_key)?;
        let mut signed = Vec::with_capacity(P::SIGNATURE_SIZE + message.len());
        signed.extend_from_slice(&sig.0);
        signed.extend_from_slice(message);
        Ok(signed)
    }

    /// Check `sig || message` and return the message
    ///
    /// Nothing of the message is returned unless the signature verifies.
    pub fn open(signed_message: &[u8], ctx: &[u8], public_key: &MlDsaPublicKey) -> ApiResult<Vec<u8>> {
        if signed_message.len() < P::SIGNATURE_SIZE {
            return Err(SignError::Verification { algorithm: P::NAME }.into());
        }
        let (sig, message) = signed_message.split_at(P::SIGNATURE_SIZE);
        sign::verify_internal::<P, B>(&public_key.0, message, ctx, sig)?;
        Ok(message.to_vec())
    }
}

impl<P: MlDsaSchemeParams, B: SymmetricBackend> SignatureTrait for MlDsa<P, B> {
    type PublicKey = MlDsaPublicKey;
    type SecretKey = MlDsaSecretKey;
    type SignatureData = MlDsaSignatureData;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let seed = SecretBytes::<SEED_BYTES>::random(rng)?;
        Self::keypair_from_seed(&seed)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    #[cfg(not(feature = "randomized-signing"))]
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        Self::sign_with_context(message, &[], secret_key)
    }

    #[cfg(feature = "randomized-signing")]
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        Self::sign_randomized(message, &[], secret_key, &mut rand::rngs::OsRng)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        Self::verify_with_context(message, &[], signature, public_key)
    }
}

impl<P: MlDsaSchemeParams, B: SymmetricBackend> SignatureSerialize for MlDsa<P, B> {
    const PUBLIC_KEY_SIZE: usize = P::PUBLIC_KEY_BYTES;
    const SECRET_KEY_SIZE: usize = P::SECRET_KEY_BYTES;
    const SIGNATURE_SIZE: usize = P::SIGNATURE_SIZE;

    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
        key.0.clone()
    }

    fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
        encoding::unpack_public_key::<P>(bytes)?;
        Ok(MlDsaPublicKey(bytes.to_vec()))
    }

    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
        key.to_bytes()
    }

    fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
        encoding::unpack_secret_key::<P>(bytes)?;
        Ok(MlDsaSecretKey(bytes.to_vec()))
    }

    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
        sig.0.clone()
    }

    fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
        check_signature_bytes::<P>(bytes)?;
        Ok(MlDsaSignatureData(bytes.to_vec()))
    }
}

impl<P: MlDsaSchemeParams, B: SymmetricBackend> SignatureDerive for MlDsa<P, B> {
    const MIN_SEED_SIZE: usize = SEED_BYTES;

    /// The seed must be exactly 32 bytes
    fn derive_keypair(seed: &[u8]) -> ApiResult<Self::KeyPair> {
        let seed: &[u8; SEED_BYTES] =
            seed.try_into().map_err(|_| mldsa_api::Error::InvalidLength {
                context: "ML-DSA seed",
                expected: SEED_BYTES,
                actual: seed.len(),
            })?;
        Self::keypair_from_seed(seed)
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        let pk = sign::public_key_from_secret::<P, B>(&secret_key.0)?;
        Ok(MlDsaPublicKey(pk))
    }
}

/// ML-DSA-44 (NIST category 2)
pub type MlDsa44 = MlDsa<MlDsa44Params>;
/// ML-DSA-65 (NIST category 3)
pub type MlDsa65 = MlDsa<MlDsa65Params>;
/// ML-DSA-87 (NIST category 5)
pub type MlDsa87 = MlDsa<MlDsa87Params>;

/// ML-DSA-44 with AES-256-CTR streams
pub type MlDsa44Aes = MlDsa<MlDsa44Params, AesBackend>;
/// ML-DSA-65 with AES-256-CTR streams
pub type MlDsa65Aes = MlDsa<MlDsa65Params, AesBackend>;
/// ML-DSA-87 with AES-256-CTR streams
pub type MlDsa87Aes = MlDsa<MlDsa87Params, AesBackend>;
