//! Transaction attributes.
//!
//! The usage byte decides how the data is laid out on the wire: a fixed
//! width, a compressed point stored without its prefix, a one-byte length, or
//! a VarInt length.

use crate::{CoreError, CoreResult, UInt160};
use neo_config::MAX_ATTRIBUTE_DATA_SIZE;
use neo_io::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeUsage(u8);

impl AttributeUsage {
    pub const CONTRACT_HASH: Self = Self(0x00);
    pub const ECDH02: Self = Self(0x02);
    pub const ECDH03: Self = Self(0x03);
    pub const SCRIPT: Self = Self(0x20);
    pub const VOTE: Self = Self(0x30);
    pub const DESCRIPTION_URL: Self = Self(0x81);
    pub const DESCRIPTION: Self = Self(0x90);
    pub const HASH1: Self = Self(0xa1);
    pub const HASH15: Self = Self(0xaf);
    pub const REMARK: Self = Self(0xf0);
    pub const REMARK15: Self = Self(0xff);

    /// Validates a raw usage byte.
    pub fn new(value: u8) -> CoreResult<Self> {
        match AttributeLayout::of(value) {
            Some(_) => Ok(Self(value)),
            None => Err(CoreError::UnknownAttributeUsage(value)),
        }
    }

    /// `HashN` for `n` in `1..=15`.
    pub fn hash(n: u8) -> CoreResult<Self> {
        match n {
            1..=15 => Ok(Self(Self::HASH1.0 + n - 1)),
            _ => Err(CoreError::UnknownAttributeUsage(
                Self::HASH1.0.wrapping_add(n).wrapping_sub(1),
            )),
        }
    }

    /// `Remark` for `n == 0`, `RemarkN` for `n` in `1..=15`.
    pub fn remark(n: u8) -> CoreResult<Self> {
        match n {
            0..=15 => Ok(Self(Self::REMARK.0 + n)),
            _ => Err(CoreError::UnknownAttributeUsage(Self::REMARK.0.wrapping_add(n))),
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    fn layout(self) -> AttributeLayout {
        // usages are validated on construction
        AttributeLayout::of(self.0).unwrap_or(AttributeLayout::VarBytes)
    }
}

impl fmt::Debug for AttributeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeUsage({:#04x})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeLayout {
    Fixed(usize),
    EcPoint,
    ShortBytes,
    VarBytes,
}

impl AttributeLayout {
    fn of(usage: u8) -> Option<Self> {
        match usage {
            0x00 | 0x30 | 0xa1..=0xaf => Some(Self::Fixed(32)),
            0x20 => Some(Self::Fixed(20)),
            0x02 | 0x03 => Some(Self::EcPoint),
            0x81 => Some(Self::ShortBytes),
            0x90 | 0xf0..=0xff => Some(Self::VarBytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionAttribute {
    usage: AttributeUsage,
    data: Vec<u8>,
}

impl TransactionAttribute {
    /// Checks `data` against the layout required by `usage`.
    pub fn new(usage: AttributeUsage, data: Vec<u8>) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidAttribute {
            usage: usage.0,
            reason,
        };
        match usage.layout() {
            AttributeLayout::Fixed(len) if data.len() != len => {
                return Err(invalid(format!("expected {len} bytes, got {}", data.len())));
            }
            AttributeLayout::EcPoint if data.len() != 33 || data[0] != usage.0 => {
                return Err(invalid("expected a 33-byte point with matching prefix".into()));
            }
            AttributeLayout::ShortBytes if data.len() > u8::MAX as usize => {
                return Err(invalid(format!("{} bytes exceeds 255", data.len())));
            }
            AttributeLayout::VarBytes if data.len() > MAX_ATTRIBUTE_DATA_SIZE => {
                return Err(invalid(format!(
                    "{} bytes exceeds {MAX_ATTRIBUTE_DATA_SIZE}",
                    data.len()
                )));
            }
            _ => {}
        }
        Ok(Self { usage, data })
    }

    /// A free-text `Remark` attribute.
    pub fn remark(text: impl AsRef<[u8]>) -> CoreResult<Self> {
        Self::new(AttributeUsage::REMARK, text.as_ref().to_vec())
    }

    /// A `Script` attribute naming an account that must witness the transaction.
    pub fn script(script_hash: UInt160) -> Self {
        Self {
            usage: AttributeUsage::SCRIPT,
            data: script_hash.as_bytes().to_vec(),
        }
    }

    #[inline]
    pub fn usage(&self) -> AttributeUsage {
        self.usage
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl NeoEncode for TransactionAttribute {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.usage.0);
        match self.usage.layout() {
            AttributeLayout::Fixed(_) => writer.write_bytes(&self.data),
            AttributeLayout::EcPoint => writer.write_bytes(&self.data[1..]),
            AttributeLayout::ShortBytes => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            AttributeLayout::VarBytes => writer.write_var_bytes(&self.data),
        }
    }
}

impl NeoDecode for TransactionAttribute {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let usage = reader.read_u8()?;
        let layout = AttributeLayout::of(usage).ok_or(DecodeError::UnknownTag {
            kind: "attribute usage",
            tag: usage,
        })?;
        let data = match layout {
            AttributeLayout::Fixed(len) => {
                let mut data = vec![0u8; len];
                reader.read_into(&mut data)?;
                data
            }
            AttributeLayout::EcPoint => {
                let mut data = vec![0u8; 33];
                data[0] = usage;
                reader.read_into(&mut data[1..])?;
                data
            }
            AttributeLayout::ShortBytes => {
                let len = reader.read_u8()? as usize;
                let mut data = vec![0u8; len];
                reader.read_into(&mut data)?;
                data
            }
            AttributeLayout::VarBytes => reader.read_var_bytes(MAX_ATTRIBUTE_DATA_SIZE as u64)?,
        };
        Ok(Self {
            usage: AttributeUsage(usage),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(attr: &TransactionAttribute) -> Vec<u8> {
        let encoded = attr.to_vec();
        assert_eq!(&TransactionAttribute::decode_all(&encoded).unwrap(), attr);
        encoded
    }

    #[test]
    fn test_fixed_width_usages() {
        let contract =
            TransactionAttribute::new(AttributeUsage::CONTRACT_HASH, vec![7u8; 32]).unwrap();
        assert_eq!(round_trip(&contract).len(), 33);

        let script = TransactionAttribute::script(UInt160::new([9u8; 20]));
        let encoded = round_trip(&script);
        assert_eq!(encoded[0], 0x20);
        assert_eq!(encoded.len(), 21);

        let hash7 =
            TransactionAttribute::new(AttributeUsage::hash(7).unwrap(), vec![1u8; 32]).unwrap();
        assert_eq!(round_trip(&hash7)[0], 0xa7);

        assert!(TransactionAttribute::new(AttributeUsage::VOTE, vec![0u8; 31]).is_err());
    }

    #[test]
    fn test_ecdh_drops_prefix_on_wire() {
        let mut point = vec![0x03];
        point.extend_from_slice(&[5u8; 32]);
        let attr = TransactionAttribute::new(AttributeUsage::ECDH03, point).unwrap();
        let encoded = round_trip(&attr);
        assert_eq!(encoded.len(), 33);
        assert_eq!(encoded[0], 0x03);

        let mut wrong_prefix = vec![0x02];
        wrong_prefix.extend_from_slice(&[5u8; 32]);
        assert!(TransactionAttribute::new(AttributeUsage::ECDH03, wrong_prefix).is_err());
    }

    #[test]
    fn test_length_prefixed_usages() {
        let url =
            TransactionAttribute::new(AttributeUsage::DESCRIPTION_URL, b"https://neo.org".to_vec())
                .unwrap();
        let encoded = round_trip(&url);
        assert_eq!(&encoded[..2], &[0x81, 15]);

        let remark = TransactionAttribute::remark(vec![b'x'; 300]).unwrap();
        let encoded = round_trip(&remark);
        assert_eq!(&encoded[..4], &[0xf0, 0xfd, 0x2c, 0x01]);

        let remark15 =
            TransactionAttribute::new(AttributeUsage::remark(15).unwrap(), b"hi".to_vec()).unwrap();
        assert_eq!(round_trip(&remark15), vec![0xff, 0x02, b'h', b'i']);

        assert!(TransactionAttribute::new(AttributeUsage::DESCRIPTION_URL, vec![0u8; 256]).is_err());
        assert!(TransactionAttribute::remark(vec![0u8; 65536]).is_err());
    }

    #[test]
    fn test_unknown_usage_rejected() {
        assert_eq!(
            AttributeUsage::new(0x01),
            Err(CoreError::UnknownAttributeUsage(0x01))
        );
        assert!(AttributeUsage::hash(16).is_err());
        assert!(AttributeUsage::remark(16).is_err());
        assert_eq!(
            TransactionAttribute::decode_all(&[0x10, 0x00]),
            Err(DecodeError::UnknownTag {
                kind: "attribute usage",
                tag: 0x10
            })
        );
    }
}
