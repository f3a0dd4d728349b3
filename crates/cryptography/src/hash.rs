//! Hash functions for NEO cryptography.
//!
//! SHA-256, RIPEMD-160 and the two NEO combinations: Hash160 (script hashes)
//! and Hash256 (transaction ids, base58check checksums).

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes Hash160 (RIPEMD-160 of SHA-256) of the input data.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Computes Hash256 (double SHA-256) of the input data.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Computes the checksum for NEO addresses.
pub fn address_checksum(data: &[u8]) -> [u8; 4] {
    let hash = hash256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sha256() {
        assert_eq!(
            sha256(b"hello world"),
            hex!("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
        );
    }

    #[test]
    fn test_hash256_is_sha256_twice() {
        let data = b"hello world";
        assert_eq!(hash256(data), sha256(&sha256(data)));
    }

    #[test]
    fn test_hash160() {
        let hash = hash160(b"hello world");
        assert_eq!(hash, ripemd160(&sha256(b"hello world")));
    }

    #[test]
    fn test_ripemd160_empty() {
        assert_eq!(ripemd160(b""), hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
    }
}
