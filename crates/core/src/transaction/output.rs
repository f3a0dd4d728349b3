//! Value transfers to a script hash.

use crate::{CoreError, CoreResult, Fixed8, UInt160, UInt256};
use neo_io::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};

/// Encoded size of an output: asset id, Fixed8 value, script hash.
pub const OUTPUT_SIZE: usize = 60;

/// Pays `value` of `asset_id` to `script_hash`. The value is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionOutput {
    asset_id: UInt256,
    value: Fixed8,
    script_hash: UInt160,
}

impl TransactionOutput {
    pub fn new(asset_id: UInt256, value: Fixed8, script_hash: UInt160) -> CoreResult<Self> {
        if !value.is_positive() {
            return Err(CoreError::NonPositiveOutput(value));
        }
        Ok(Self {
            asset_id,
            value,
            script_hash,
        })
    }

    /// Output paying the owner of a base58 address.
    pub fn to_address(asset_id: UInt256, value: Fixed8, address: &str) -> CoreResult<Self> {
        Self::new(asset_id, value, UInt160::from_address(address)?)
    }

    #[inline]
    pub fn asset_id(&self) -> UInt256 {
        self.asset_id
    }

    #[inline]
    pub fn value(&self) -> Fixed8 {
        self.value
    }

    #[inline]
    pub fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    pub fn address(&self) -> String {
        self.script_hash.to_address()
    }
}

impl NeoEncode for TransactionOutput {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.asset_id.neo_encode(writer);
        self.value.neo_encode(writer);
        self.script_hash.neo_encode(writer);
    }
}

impl NeoDecode for TransactionOutput {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let asset_id = UInt256::neo_decode(reader)?;
        let value = Fixed8::neo_decode(reader)?;
        let script_hash = UInt160::neo_decode(reader)?;
        Self::new(asset_id, value, script_hash)
            .map_err(|_| DecodeError::InvalidValue("output value must be positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GAS_ASSET;

    #[test]
    fn test_output_layout() {
        let script_hash = UInt160::new([0xaa; 20]);
        let output = TransactionOutput::new(*GAS_ASSET, Fixed8::ONE, script_hash).unwrap();
        let encoded = output.to_vec();

        assert_eq!(encoded.len(), OUTPUT_SIZE);
        assert_eq!(&encoded[..32], GAS_ASSET.as_bytes());
        assert_eq!(hex::encode(&encoded[32..40]), "00e1f50500000000");
        assert_eq!(&encoded[40..], &[0xaa; 20]);
        assert_eq!(TransactionOutput::decode_all(&encoded).unwrap(), output);
    }

    #[test]
    fn test_output_value_must_be_positive() {
        let script_hash = UInt160::ZERO;
        assert_eq!(
            TransactionOutput::new(*GAS_ASSET, Fixed8::ZERO, script_hash),
            Err(CoreError::NonPositiveOutput(Fixed8::ZERO))
        );

        let mut encoded = Vec::new();
        GAS_ASSET.neo_encode(&mut encoded);
        Fixed8::from_raw(-1).neo_encode(&mut encoded);
        script_hash.neo_encode(&mut encoded);
        assert!(TransactionOutput::decode_all(&encoded).is_err());
    }
}
