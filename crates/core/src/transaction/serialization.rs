//! Byte-exact transaction encoding.
//!
//! ```text
//! type:u8 version:u8 exclusive attributes inputs outputs [witnesses]
//! ```
//!
//! The witness list is written only in the signed form. The hash and the
//! signing digest are both taken over the unsigned form.

use super::core::Transaction;
use super::exclusive::{ExclusiveData, TransactionType};
use crate::{CoreResult, UInt256};
use neo_config::{MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE};
use neo_cryptography::sha256;
use neo_io::{read_array, write_array, DecodeError, NeoEncode, NeoRead, NeoWrite, SliceReader};

// Inputs, outputs and witnesses are addressed by u16 indexes.
const MAX_ITEMS: usize = u16::MAX as usize;

impl Transaction {
    fn encode_unsigned<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.tx_type() as u8);
        writer.write_u8(self.version);
        self.exclusive.encode(self.version, writer);
        write_array(writer, &self.attributes);
        write_array(writer, &self.inputs);
        write_array(writer, &self.outputs);
    }

    pub fn serialize_unsigned(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_unsigned(&mut buf);
        buf
    }

    /// Wire bytes; witnesses are appended only when `signed` is set.
    pub fn serialize(&self, signed: bool) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_unsigned(&mut buf);
        if signed {
            write_array(&mut buf, &self.witnesses);
        }
        buf
    }

    pub fn to_hex(&self, signed: bool) -> String {
        hex::encode(self.serialize(signed))
    }

    /// Size of the signed serialization in bytes.
    pub fn size(&self) -> usize {
        self.serialize(true).len()
    }

    /// SHA-256 of the unsigned serialization: the message every witness signs.
    pub fn signing_digest(&self) -> [u8; 32] {
        sha256(&self.serialize_unsigned())
    }

    /// Double SHA-256 of the unsigned serialization. Witnesses never change it.
    pub fn hash(&self) -> UInt256 {
        UInt256::new(sha256(&self.signing_digest()))
    }

    pub fn from_hex(value: &str) -> CoreResult<Self> {
        Self::from_bytes(&neo_io::decode_hex(value)?)
    }

    /// Decodes a standalone transaction; trailing bytes are an error.
    pub fn from_bytes(data: &[u8]) -> CoreResult<Self> {
        if data.len() > MAX_TRANSACTION_SIZE {
            return Err(DecodeError::LengthOutOfRange {
                len: data.len() as u64,
                max: MAX_TRANSACTION_SIZE as u64,
            }
            .into());
        }
        let mut reader = SliceReader::new(data);
        let tx = Self::decode_from(&mut reader)?;
        match reader.remaining() {
            0 => Ok(tx),
            left => Err(DecodeError::TrailingBytes(left).into()),
        }
    }

    /// Reads one transaction. Whatever is left in `reader` after the outputs
    /// is taken to be the witness list.
    pub fn decode_from<R: NeoRead>(reader: &mut R) -> CoreResult<Self> {
        let tx_type = TransactionType::try_from(reader.read_u8()?)?;
        let version = reader.read_u8()?;
        let exclusive = ExclusiveData::decode(tx_type, version, reader)?;

        let mut tx = Transaction::new(version, exclusive)?;
        tx.attributes = read_array(reader, MAX_TRANSACTION_ATTRIBUTES)?;
        tx.inputs = read_array(reader, MAX_ITEMS)?;
        tx.outputs = read_array(reader, MAX_ITEMS)?;
        if reader.remaining() > 0 {
            tx.witnesses = read_array(reader, MAX_ITEMS)?;
        }
        Ok(tx)
    }
}

impl NeoEncode for Transaction {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.encode_unsigned(writer);
        write_array(writer, &self.witnesses);
    }
}
