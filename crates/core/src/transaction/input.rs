//! References to previous outputs.

use crate::UInt256;
use neo_io::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use serde::{Deserialize, Serialize};

/// Encoded size of an input: 32-byte hash plus 2-byte index.
pub const INPUT_SIZE: usize = 34;

/// Spends output `prev_index` of transaction `prev_hash`.
///
/// Also used for the claim references of a claim transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub prev_hash: UInt256,
    pub prev_index: u16,
}

impl TransactionInput {
    #[inline]
    pub const fn new(prev_hash: UInt256, prev_index: u16) -> Self {
        Self {
            prev_hash,
            prev_index,
        }
    }
}

impl NeoEncode for TransactionInput {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.prev_hash.neo_encode(writer);
        writer.write_u16(self.prev_index);
    }
}

impl NeoDecode for TransactionInput {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        Ok(Self {
            prev_hash: UInt256::neo_decode(reader)?,
            prev_index: reader.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_layout() {
        let hash = UInt256::from_hex_str(
            "0102030405060708091011121314151617181920212223242526272829303132",
        )
        .unwrap();
        let input = TransactionInput::new(hash, 0x0102);
        let encoded = input.to_vec();

        assert_eq!(encoded.len(), INPUT_SIZE);
        assert_eq!(encoded[0], 0x32);
        assert_eq!(encoded[31], 0x01);
        assert_eq!(&encoded[32..], &[0x02, 0x01]);
        assert_eq!(TransactionInput::decode_all(&encoded).unwrap(), input);
    }
}
