//! Known-answer vectors for ML-DSA
//!
//! The vectors live in `vectors/mldsa_kat.json`. Each entry records the
//! 48-byte DRBG seed of a NIST KAT round together with SHAKE256 digests
//! (first 32 bytes) of the resulting public key, secret key and signature,
//! which keeps the file small while still pinning every output byte.

use serde::Deserialize;

const KAT_JSON: &str = include_str!("../vectors/mldsa_kat.json");

/// Self-check for the DRBG: first 48 output bytes for a given entropy input
#[derive(Debug, Clone, Deserialize)]
pub struct DrbgVector {
    /// Entropy input (hex)
    pub entropy: String,
    /// Expected first `randombytes(48)` output (hex)
    pub output: String,
}

/// One known-answer round
#[derive(Debug, Clone, Deserialize)]
pub struct KatVector {
    /// Parameter set name, e.g. `ML-DSA-65`
    pub algorithm: String,
    /// Round number in the response file
    pub count: u32,
    /// 48-byte DRBG seed for this round (hex)
    pub seed: String,
    /// Message (hex)
    pub message: String,
    /// SHAKE256 digest of the public key (hex)
    pub pk_digest: String,
    /// SHAKE256 digest of the secret key (hex)
    pub sk_digest: String,
    /// SHAKE256 digest of the signature (hex)
    pub sig_digest: String,
}

/// Top-level layout of the vector file
#[derive(Debug, Clone, Deserialize)]
pub struct KatFile {
    /// DRBG self-check
    pub drbg: DrbgVector,
    /// Per-parameter-set rounds
    pub vectors: Vec<KatVector>,
}

/// Parse the bundled vector file
pub fn load_kat_vectors() -> Result<KatFile, serde_json::Error> {
    serde_json::from_str(KAT_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_file_parses() {
        let file = load_kat_vectors().unwrap();
        assert_eq!(file.vectors.len(), 3);
        for v in &file.vectors {
            assert_eq!(hex::decode(&v.seed).unwrap().len(), 48);
            assert_eq!(hex::decode(&v.pk_digest).unwrap().len(), 32);
        }
    }
}
