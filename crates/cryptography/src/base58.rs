//! base58check: payload followed by the first four bytes of its Hash256.

use crate::hash::address_checksum;
use crate::{Error, Result};

/// Encodes `payload` with a trailing Hash256 checksum.
pub fn to_base58_check(payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&address_checksum(payload));
    bs58::encode(buf).into_string()
}

/// Decodes a base58check string and verifies its checksum.
pub fn from_base58_check(src: &str) -> Result<Vec<u8>> {
    let decoded = bs58::decode(src)
        .into_vec()
        .map_err(|err| Error::Base58Decode(err.to_string()))?;
    if decoded.len() < 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: decoded.len(),
        });
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    if address_checksum(payload) != checksum {
        return Err(Error::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_base58_addr() {
        let addr = "AceQbAj2xuFLiH5hQAHMnV39wtmjUKiVRj";
        let payload = from_base58_check(addr).expect("decode should be ok");

        assert_eq!(hex::encode(&payload), "17e4f124b1c3b23553f07cebfb852b2a60aa6c6d94");
        assert_eq!(to_base58_check(&payload), addr);
    }

    #[test]
    fn test_base58_check_rejects_corruption() {
        let encoded = to_base58_check(b"1234567890");
        assert_eq!(from_base58_check(&encoded).unwrap(), b"1234567890".to_vec());

        let mut corrupted = encoded.clone();
        corrupted.pop();
        corrupted.push(if encoded.ends_with('1') { '2' } else { '1' });
        assert!(from_base58_check(&corrupted).is_err());

        assert!(matches!(
            from_base58_check("0OIl"),
            Err(Error::Base58Decode(_))
        ));
    }
}
