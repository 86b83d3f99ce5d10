//! Constants for the ML-DSA (CRYSTALS-Dilithium, FIPS 204) signature scheme

/// Polynomial degree
pub const MLDSA_N: usize = 256;

/// Prime modulus q = 2^23 - 2^13 + 1
pub const MLDSA_Q: i32 = 8_380_417;

/// Dropped bits of `t`
pub const MLDSA_D: u32 = 13;

/// Seed size for `rho`, `key` and the KeyGen seed
pub const SEED_BYTES: usize = 32;

/// Output size of the collision-resistant hash used for `mu` and `rhoprime`
pub const CRH_BYTES: usize = 64;

/// Size of `tr = H(pk)`
pub const TR_BYTES: usize = 64;

/// Size of the per-signature randomness in hedged mode
pub const RND_BYTES: usize = 32;

/// Maximum length of a context string
pub const MAX_CONTEXT_BYTES: usize = 255;

/// Packed size of one `t1` polynomial (10 bits per coefficient)
pub const POLYT1_PACKED_BYTES: usize = 320;

/// Packed size of one `t0` polynomial (13 bits per coefficient)
pub const POLYT0_PACKED_BYTES: usize = 416;

/// `(q - 1) / 88`, rounding granularity of ML-DSA-44
pub const GAMMA2_88: i32 = (MLDSA_Q - 1) / 88;

/// `(q - 1) / 32`, rounding granularity of ML-DSA-65 and ML-DSA-87
pub const GAMMA2_32: i32 = (MLDSA_Q - 1) / 32;

/// Common trait for ML-DSA parameter sets
pub trait MlDsaSchemeParams: Send + Sync + 'static {
    /// Algorithm name
    const NAME: &'static str;

    /// Number of polynomials in `t`, `s2`, `w` (rows of A)
    const K_DIM: usize;
    /// Number of polynomials in `s1`, `y`, `z` (columns of A)
    const L_DIM: usize;

    /// Coefficient bound of `s1` and `s2`
    const ETA: i32;
    /// Number of ±1 coefficients in the challenge
    const TAU: usize;
    /// Rejection slack, `TAU * ETA`
    const BETA: i32;
    /// Range of the masking vector `y`
    const GAMMA1: i32;
    /// Low-order rounding range
    const GAMMA2: i32;
    /// Maximum number of set hint bits
    const OMEGA: usize;
    /// Size of the challenge seed `c̃`
    const CTILDE_BYTES: usize;

    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key size in bytes
    const SECRET_KEY_BYTES: usize;
    /// Signature size in bytes
    const SIGNATURE_SIZE: usize;

    /// Bits per packed `z` coefficient
    const Z_BITS: usize = if Self::GAMMA1 == (1 << 17) { 18 } else { 20 };
    /// Bits per packed `w1` coefficient
    const W1_BITS: usize = if Self::GAMMA2 == GAMMA2_88 { 6 } else { 4 };
    /// Bits per packed η-bounded coefficient
    const ETA_BITS: usize = if Self::ETA == 2 { 3 } else { 4 };

    /// Packed size of one `z` polynomial
    const POLYZ_PACKED_BYTES: usize = MLDSA_N * Self::Z_BITS / 8;
    /// Packed size of one `w1` polynomial
    const POLYW1_PACKED_BYTES: usize = MLDSA_N * Self::W1_BITS / 8;
    /// Packed size of one η-bounded polynomial
    const POLYETA_PACKED_BYTES: usize = MLDSA_N * Self::ETA_BITS / 8;
    /// Packed size of the hint vector
    const POLYVECH_PACKED_BYTES: usize = Self::OMEGA + Self::K_DIM;
}

/// ML-DSA-44 (NIST security category 2)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa44Params;

impl MlDsaSchemeParams for MlDsa44Params {
    const NAME: &'static str = "ML-DSA-44";
    const K_DIM: usize = 4;
    const L_DIM: usize = 4;
    const ETA: i32 = 2;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const GAMMA1: i32 = 1 << 17;
    const GAMMA2: i32 = GAMMA2_88;
    const OMEGA: usize = 80;
    const CTILDE_BYTES: usize = 32;
    const PUBLIC_KEY_BYTES: usize = 1312;
    const SECRET_KEY_BYTES: usize = 2560;
    const SIGNATURE_SIZE: usize = 2420;
}

/// ML-DSA-65 (NIST security category 3)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa65Params;

impl MlDsaSchemeParams for MlDsa65Params {
    const NAME: &'static str = "ML-DSA-65";
    const K_DIM: usize = 6;
    const L_DIM: usize = 5;
    const ETA: i32 = 4;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = GAMMA2_32;
    const OMEGA: usize = 55;
    const CTILDE_BYTES: usize = 48;
    const PUBLIC_KEY_BYTES: usize = 1952;
    const SECRET_KEY_BYTES: usize = 4032;
    const SIGNATURE_SIZE: usize = 3309;
}

/// ML-DSA-87 (NIST security category 5)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa87Params;

impl MlDsaSchemeParams for MlDsa87Params {
    const NAME: &'static str = "ML-DSA-87";
    const K_DIM: usize = 8;
    const L_DIM: usize = 7;
    const ETA: i32 = 2;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = GAMMA2_32;
    const OMEGA: usize = 75;
    const CTILDE_BYTES: usize = 64;
    const PUBLIC_KEY_BYTES: usize = 2592;
    const SECRET_KEY_BYTES: usize = 4896;
    const SIGNATURE_SIZE: usize = 4627;
}
