//! Cryptographic primitives for the legacy NEO ledger.
//!
//! - SHA-256, RIPEMD-160 and the NEO combinations Hash160 / Hash256
//! - base58check used by addresses
//! - secp256r1 public keys, 64-byte signatures and a key pair that signs
//!   precomputed digests

pub mod base58;
pub mod ecdsa;
pub mod hash;

pub use base58::{from_base58_check, to_base58_check};
pub use ecdsa::{verify_prehash, KeyPair, PublicKey, Signature};
pub use hash::{hash160, hash256, ripemd160, sha256};

use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cryptography errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Base58 decode error: {0}")]
    Base58Decode(String),

    #[error("Invalid base58check checksum")]
    InvalidChecksum,

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
