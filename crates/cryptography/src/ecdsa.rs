//! ECDSA over secp256r1 (P-256), NEO's signature curve.
//!
//! Transactions are signed over a precomputed SHA-256 digest, so the key pair
//! exposes prehash signing only. Signatures are the raw 64-byte `r ‖ s` form
//! carried by invocation scripts, and nonces are deterministic (RFC 6979).

use crate::{Error, Result};
use p256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature as P256Signature, SigningKey, VerifyingKey,
};
use rand::rngs::OsRng;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_SIZE: usize = 33;
/// Length of a raw `r ‖ s` signature.
pub const SIGNATURE_SIZE: usize = 64;

/// A secp256r1 public key, kept in its 33-byte compressed encoding.
#[derive(Clone, Copy)]
pub struct PublicKey {
    key: VerifyingKey,
    encoded: [u8; PUBLIC_KEY_SIZE],
}

impl PublicKey {
    /// Parses a compressed (33 bytes) or uncompressed (65 bytes) SEC1 key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| Error::InvalidKey(format!("Invalid public key: {e}")))?;
        Ok(Self::from_verifying_key(key))
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim_start_matches("0x"))
            .map_err(|e| Error::InvalidKey(format!("Invalid public key hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    fn from_verifying_key(key: VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut encoded = [0u8; PUBLIC_KEY_SIZE];
        encoded.copy_from_slice(point.as_bytes());
        Self { key, encoded }
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.encoded
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.encoded
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encoded)
    }

    /// Checks `signature` against a SHA-256 `digest`.
    pub fn verify_prehash(&self, digest: &[u8; 32], signature: &Signature) -> bool {
        match P256Signature::from_slice(signature.as_bytes()) {
            Ok(sig) => self.key.verify_prehash(digest, &sig).is_ok(),
            Err(_) => false,
        }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded.cmp(&other.encoded)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A raw 64-byte `r ‖ s` ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    #[inline]
    pub const fn new(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut buf = [0u8; SIGNATURE_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim_start_matches("0x"))
            .map_err(|e| Error::InvalidSignature(format!("Invalid signature hex: {e}")))?;
        Self::from_slice(&bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Verifies `signature` over `digest` for the compressed or uncompressed key `public_key`.
pub fn verify_prehash(digest: &[u8; 32], signature: &Signature, public_key: &[u8]) -> bool {
    PublicKey::from_bytes(public_key)
        .map(|key| key.verify_prehash(digest, signature))
        .unwrap_or(false)
}

/// A secp256r1 private key with its public key.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Creates a key pair from a 32-byte private key.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        if private_key.len() != 32 {
            return Err(Error::InvalidLength {
                expected: 32,
                actual: private_key.len(),
            });
        }
        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|e| Error::InvalidKey(format!("Invalid private key: {e}")))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Generates a new random key pair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey::from_verifying_key(*signing_key.verifying_key());
        Self {
            signing_key,
            public_key,
        }
    }

    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Signs a precomputed SHA-256 digest.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Result<Signature> {
        let signature: P256Signature = self
            .signing_key
            .sign_prehash(digest)
            .map_err(|e| Error::SigningFailed(e.to_string()))?;
        Signature::from_slice(&signature.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
