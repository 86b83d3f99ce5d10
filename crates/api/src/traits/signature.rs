//! Digital signature traits
//!
//! Every parameter set of the scheme implements these traits. The design does
//! not require mutable byte access to secret keys.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque types that cannot be manipulated as bytes through
/// this trait. Explicit serialization lives in [`SignatureSerialize`].
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type, zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    ///
    /// The RNG is only used for the initial key generation seed.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key and an empty context
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key with an empty context
    ///
    /// Every failure reason maps to the same error so callers cannot tell
    /// a malformed signature from a mismatching one.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}

/// Signature algorithms with a fixed wire encoding for keys and signatures
pub trait SignatureSerialize: Signature {
    /// Size of serialized public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// Size of serialized secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// Size of serialized signatures in bytes
    const SIGNATURE_SIZE: usize;

    /// Export a public key to bytes
    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8>;

    /// Import a public key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length does not match `PUBLIC_KEY_SIZE`
    fn deserialize_public_key(bytes: &[u8]) -> Result<Self::PublicKey>;

    /// Export a secret key to bytes
    ///
    /// The returned bytes are cleared from memory when dropped.
    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>>;

    /// Import a secret key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are malformed
    fn deserialize_secret_key(bytes: &[u8]) -> Result<Self::SecretKey>;

    /// Export a signature to bytes
    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8>;

    /// Import a signature from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a canonical encoding
    fn deserialize_signature(bytes: &[u8]) -> Result<Self::SignatureData>;
}

/// Signature algorithms that derive keys deterministically from a seed
pub trait SignatureDerive: Signature {
    /// Seed size in bytes
    const MIN_SEED_SIZE: usize;

    /// Derive a key pair from seed material
    ///
    /// The same seed always produces the same key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed has the wrong length
    fn derive_keypair(seed: &[u8]) -> Result<Self::KeyPair>;

    /// Recompute the public key belonging to a secret key
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is inconsistent
    fn derive_public_key(secret_key: &Self::SecretKey) -> Result<Self::PublicKey>;
}
