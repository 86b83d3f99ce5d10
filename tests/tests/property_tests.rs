//! Property tests for ML-DSA signing, verification and key encoding

use mldsa_api::{Signature, SignatureSerialize};
use mldsa_params::pqc::mldsa::MAX_CONTEXT_BYTES;
use mldsa_sign::{MlDsa44, MlDsa65, MlDsaPublicKey, MlDsaSecretKey};
use proptest::prelude::*;
use std::sync::OnceLock;

fn keys_44() -> &'static (MlDsaPublicKey, MlDsaSecretKey) {
    static KEYS: OnceLock<(MlDsaPublicKey, MlDsaSecretKey)> = OnceLock::new();
    KEYS.get_or_init(|| MlDsa44::keypair_from_seed(&[0x42; 32]).unwrap())
}

fn keys_65() -> &'static (MlDsaPublicKey, MlDsaSecretKey) {
    static KEYS: OnceLock<(MlDsaPublicKey, MlDsaSecretKey)> = OnceLock::new();
    KEYS.get_or_init(|| MlDsa65::keypair_from_seed(&[0x24; 32]).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_sign_verify_with_context(
        message in proptest::collection::vec(any::<u8>(), 0..512),
        ctx in proptest::collection::vec(any::<u8>(), 0..=MAX_CONTEXT_BYTES),
    ) {
        let (pk, sk) = keys_44();
        let sig = MlDsa44::sign_with_context(&message, &ctx, sk).unwrap();
        prop_assert!(MlDsa44::verify_with_context(&message, &ctx, &sig, pk).is_ok());
    }

    #[test]
    fn prop_signing_is_deterministic(message in proptest::collection::vec(any::<u8>(), 0..256)) {
        let (_, sk) = keys_65();
        let a = MlDsa65::sign_with_context(&message, &[], sk).unwrap();
        let b = MlDsa65::sign_with_context(&message, &[], sk).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_flipped_signature_bit_rejected(
        message in proptest::collection::vec(any::<u8>(), 1..128),
        bit in any::<proptest::sample::Index>(),
    ) {
        let (pk, sk) = keys_44();
        let sig = MlDsa44::sign(&message, sk).unwrap();
        let mut bytes = sig.to_bytes().to_vec();
        let bit = bit.index(bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
        // Either the strict decoder or verification must refuse it
        let rejected = match MlDsa44::deserialize_signature(&bytes) {
            Ok(tampered) => MlDsa44::verify(&message, &tampered, pk).is_err(),
            Err(_) => true,
        };
        prop_assert!(rejected);
    }

    #[test]
    fn prop_flipped_message_bit_rejected(
        message in proptest::collection::vec(any::<u8>(), 1..128),
        bit in any::<proptest::sample::Index>(),
    ) {
        let (pk, sk) = keys_65();
        let sig = MlDsa65::sign(&message, sk).unwrap();
        let mut tampered = message.clone();
        let bit = bit.index(tampered.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(MlDsa65::verify(&tampered, &sig, pk).is_err());
    }

    #[test]
    fn prop_seeded_keys_survive_serialization(seed in any::<[u8; 32]>()) {
        let (pk, sk) = MlDsa44::keypair_from_seed(&seed).unwrap();
        let pk2 = MlDsa44::deserialize_public_key(&MlDsa44::serialize_public_key(&pk)).unwrap();
        let sk2 = MlDsa44::deserialize_secret_key(&MlDsa44::serialize_secret_key(&sk)).unwrap();
        prop_assert_eq!(&pk, &pk2);
        prop_assert_eq!(&*sk.to_bytes(), &*sk2.to_bytes());
    }
}
