//! Transaction types and the payload each one carries after the version byte.

use super::input::TransactionInput;
use crate::{CoreError, Fixed8};
use neo_config::MAX_SCRIPT_SIZE;
use neo_io::{read_array, write_array, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use std::fmt;

/// Claim references one claim transaction may carry on the wire.
pub const MAX_CLAIM_REFERENCES: usize = u16::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    Claim = 0x02,
    Contract = 0x80,
    Invocation = 0xd1,
}

impl TransactionType {
    /// Version a freshly assembled transaction of this type gets.
    pub const fn default_version(self) -> u8 {
        match self {
            Self::Claim | Self::Contract => 0,
            Self::Invocation => 1,
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x02 => Ok(Self::Claim),
            0x80 => Ok(Self::Contract),
            0xd1 => Ok(Self::Invocation),
            other => Err(CoreError::UnknownTransactionType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claim => f.write_str("ClaimTransaction"),
            Self::Contract => f.write_str("ContractTransaction"),
            Self::Invocation => f.write_str("InvocationTransaction"),
        }
    }
}

/// Type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExclusiveData {
    /// Unclaimed outputs whose GAS is being claimed.
    Claim { claims: Vec<TransactionInput> },
    Contract,
    /// A VM script and the GAS paid for running it.
    Invocation { script: Vec<u8>, gas: Fixed8 },
}

impl ExclusiveData {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            Self::Claim { .. } => TransactionType::Claim,
            Self::Contract => TransactionType::Contract,
            Self::Invocation { .. } => TransactionType::Invocation,
        }
    }

    pub(crate) fn encode<W: NeoWrite>(&self, version: u8, writer: &mut W) {
        match self {
            Self::Claim { claims } => write_array(writer, claims),
            Self::Contract => {}
            Self::Invocation { script, gas } => {
                writer.write_var_bytes(script);
                if version >= 1 {
                    gas.neo_encode(writer);
                }
            }
        }
    }

    pub(crate) fn decode<R: NeoRead>(
        tx_type: TransactionType,
        version: u8,
        reader: &mut R,
    ) -> Result<Self, DecodeError> {
        match tx_type {
            TransactionType::Claim => {
                let claims = read_array(reader, MAX_CLAIM_REFERENCES)?;
                if claims.is_empty() {
                    return Err(DecodeError::InvalidValue("claim transaction without claims"));
                }
                Ok(Self::Claim { claims })
            }
            TransactionType::Contract => Ok(Self::Contract),
            TransactionType::Invocation => {
                let script = reader.read_var_bytes(MAX_SCRIPT_SIZE as u64)?;
                if script.is_empty() {
                    return Err(DecodeError::InvalidValue("empty invocation script"));
                }
                let gas = if version >= 1 {
                    Fixed8::neo_decode(reader)?
                } else {
                    Fixed8::ZERO
                };
                if gas.is_negative() {
                    return Err(DecodeError::InvalidValue("negative invocation gas"));
                }
                Ok(Self::Invocation { script, gas })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UInt256;
    use neo_io::SliceReader;

    fn decode(
        tx_type: TransactionType,
        version: u8,
        data: &[u8],
    ) -> Result<ExclusiveData, DecodeError> {
        ExclusiveData::decode(tx_type, version, &mut SliceReader::new(data))
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(TransactionType::try_from(0x02).unwrap(), TransactionType::Claim);
        assert_eq!(TransactionType::try_from(0x80).unwrap(), TransactionType::Contract);
        assert_eq!(TransactionType::try_from(0xd1).unwrap(), TransactionType::Invocation);
        assert_eq!(
            TransactionType::try_from(0x00),
            Err(CoreError::UnknownTransactionType(0x00))
        );
        assert_eq!(TransactionType::Invocation.default_version(), 1);
    }

    #[test]
    fn test_claim_payload() {
        let data = ExclusiveData::Claim {
            claims: vec![TransactionInput::new(UInt256::new([1u8; 32]), 3)],
        };
        let mut buf = Vec::new();
        data.encode(0, &mut buf);
        assert_eq!(buf.len(), 1 + 34);
        assert_eq!(buf[0], 1);
        assert_eq!(decode(TransactionType::Claim, 0, &buf).unwrap(), data);
        assert!(decode(TransactionType::Claim, 0, &[0x00]).is_err());
    }

    #[test]
    fn test_invocation_gas_depends_on_version() {
        let data = ExclusiveData::Invocation {
            script: vec![0x51],
            gas: Fixed8::ONE,
        };
        let mut v1 = Vec::new();
        data.encode(1, &mut v1);
        assert_eq!(hex::encode(&v1), "015100e1f50500000000");
        assert_eq!(decode(TransactionType::Invocation, 1, &v1).unwrap(), data);

        let mut v0 = Vec::new();
        data.encode(0, &mut v0);
        assert_eq!(v0, vec![0x01, 0x51]);
        assert_eq!(
            decode(TransactionType::Invocation, 0, &v0).unwrap(),
            ExclusiveData::Invocation {
                script: vec![0x51],
                gas: Fixed8::ZERO
            }
        );
    }

    #[test]
    fn test_contract_payload_is_empty() {
        let mut buf = Vec::new();
        ExclusiveData::Contract.encode(0, &mut buf);
        assert!(buf.is_empty());
    }
}
