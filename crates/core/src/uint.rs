//! Fixed-width hashes: [`UInt160`] (script hashes) and [`UInt256`] (transaction and asset ids).
//!
//! Both are little-endian in memory and on the wire, and big-endian when
//! formatted as hex.

use crate::{CoreError, CoreResult};
use neo_config::{ADDRESS_SIZE, ADDRESS_VERSION, HASH_SIZE};
use neo_cryptography::{from_base58_check, hash160, to_base58_check};
use neo_io::{decode_rev_hex, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite, ToRevHex};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

macro_rules! impl_uint {
    ($name:ident, $len:expr, $label:literal) => {
        #[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LENGTH: usize = $len;
            pub const ZERO: Self = Self([0u8; $len]);

            /// Wraps little-endian (wire order) bytes.
            #[inline]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(slice: &[u8]) -> Result<Self, DecodeError> {
                if slice.len() != $len {
                    return Err(DecodeError::LengthOutOfRange {
                        len: slice.len() as u64,
                        max: $len as u64,
                    });
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(slice);
                Ok(Self(buf))
            }

            /// Parses the big-endian display form, with or without `0x`.
            pub fn from_hex_str(value: &str) -> Result<Self, DecodeError> {
                let bytes = decode_rev_hex(value)?;
                if bytes.len() != $len {
                    return Err(DecodeError::InvalidValue(concat!($label, " hex length")));
                }
                Self::from_slice(&bytes)
            }

            /// Big-endian lowercase hex, the form shown by explorers and nodes.
            #[inline]
            pub fn to_hex_string(&self) -> String {
                self.0.to_rev_hex_lower()
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[inline]
            pub fn to_array(self) -> [u8; $len] {
                self.0
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline]
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.iter().rev().cmp(other.0.iter().rev())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex_string())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), self.to_hex_string())
            }
        }

        impl FromStr for $name {
            type Err = DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex_str(s)
            }
        }

        impl NeoEncode for $name {
            fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
                writer.write_bytes(&self.0);
            }
        }

        impl NeoDecode for $name {
            fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
                Ok(Self(reader.read_fixed::<{ $len }>()?))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Self::from_hex_str(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_uint!(UInt160, ADDRESS_SIZE, "UInt160");
impl_uint!(UInt256, HASH_SIZE, "UInt256");

impl UInt160 {
    /// Script hash of a verification script: `ripemd160(sha256(script))`.
    #[inline]
    pub fn from_script(script: &[u8]) -> Self {
        Self(hash160(script))
    }

    /// Base58check address with the default address version.
    pub fn to_address(&self) -> String {
        self.to_address_with_version(ADDRESS_VERSION)
    }

    pub fn to_address_with_version(&self, version: u8) -> String {
        let mut payload = Vec::with_capacity(1 + ADDRESS_SIZE);
        payload.push(version);
        payload.extend_from_slice(&self.0);
        to_base58_check(&payload)
    }

    pub fn from_address(address: &str) -> CoreResult<Self> {
        Self::from_address_with_version(address, ADDRESS_VERSION)
    }

    pub fn from_address_with_version(address: &str, version: u8) -> CoreResult<Self> {
        let decoded = from_base58_check(address)
            .map_err(|err| CoreError::InvalidAddress(format!("{address}: {err}")))?;
        if decoded.len() != 1 + ADDRESS_SIZE {
            return Err(CoreError::InvalidAddress(format!(
                "{address}: payload is {} bytes",
                decoded.len()
            )));
        }
        if decoded[0] != version {
            return Err(CoreError::InvalidAddress(format!(
                "{address}: version {:#04x}, expected {version:#04x}",
                decoded[0]
            )));
        }
        let mut buf = [0u8; ADDRESS_SIZE];
        buf.copy_from_slice(&decoded[1..]);
        Ok(Self(buf))
    }
}

impl UInt256 {
    /// Double SHA-256 of `data`, as used for transaction ids.
    #[inline]
    pub fn hash_of(data: &[u8]) -> Self {
        Self(neo_cryptography::hash256(data))
    }
}
