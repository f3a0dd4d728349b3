//! Property tests for secp256r1 signing over digests.

use neo_cryptography::{hash256, sha256, KeyPair, Signature};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sign_then_verify(secret in prop::array::uniform32(1u8..), message in prop::collection::vec(any::<u8>(), 0..256)) {
        let key = KeyPair::from_private_key(&secret).unwrap();
        let digest = sha256(&message);
        let signature = key.sign_prehash(&digest).unwrap();
        prop_assert!(key.public_key().verify_prehash(&digest, &signature));
    }

    #[test]
    fn prop_tampered_signature_fails(secret in prop::array::uniform32(1u8..), flip in 0usize..64) {
        let key = KeyPair::from_private_key(&secret).unwrap();
        let digest = hash256(b"tamper");
        let mut bytes = *key.sign_prehash(&digest).unwrap().as_bytes();
        bytes[flip] ^= 0x01;
        prop_assert!(!key.public_key().verify_prehash(&digest, &Signature::new(bytes)));
    }
}
