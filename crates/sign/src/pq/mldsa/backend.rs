//! Symmetric primitive selection
//!
//! Matrix expansion and secret / mask expansion read from seeded streams. The
//! backend chooses which stream family is used; every hash (`tr`, `mu`, `c̃`,
//! `rhoprime`, the KeyGen seed expansion and the challenge) stays SHAKE256.

use mldsa_algorithms::stream::{Aes256CtrStream, SeededStream, Shake128Stream, Shake256Stream};

/// Stream families used by the samplers
pub trait SymmetricBackend: Send + Sync + 'static {
    /// Human-readable backend name
    const NAME: &'static str;

    /// Stream over `(rho, nonce)` feeding the uniform matrix sampler
    type MatrixStream: SeededStream;

    /// Stream over `(rhoprime, nonce)` feeding the η and γ1 samplers
    type SecretStream: SeededStream;
}

/// SHAKE128 for the matrix, SHAKE256 for secrets and masks (FIPS 204)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShakeBackend;

impl SymmetricBackend for ShakeBackend {
    const NAME: &'static str = "SHAKE";
    type MatrixStream = Shake128Stream;
    type SecretStream = Shake256Stream;
}

/// AES-256-CTR for every seeded stream
///
/// Keys and signatures produced with this backend only verify against the same
/// backend; they are not interoperable with FIPS 204 implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AesBackend;

impl SymmetricBackend for AesBackend {
    const NAME: &'static str = "AES";
    type MatrixStream = Aes256CtrStream;
    type SecretStream = Aes256CtrStream;
}
