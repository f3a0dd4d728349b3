//! Neo.IO - binary wire format primitives
//!
//! Little-endian integers, variable-length integers, length-prefixed byte
//! strings and the hex helpers used to display hashes in big-endian order.
//! Every transaction component in `neo-core` is encoded through the
//! [`NeoEncode`] / [`NeoDecode`] traits defined here.

mod error;
mod hex;
mod primitives;
mod reader;
mod traits;
mod varint;

pub use error::DecodeError;
pub use hex::{decode_hex, decode_rev_hex, reverse_hex, ToHex, ToRevHex};
pub use reader::SliceReader;
pub use traits::{NeoDecode, NeoEncode, NeoRead, NeoWrite};
pub use varint::{encode_varint, read_varint, var_size, write_varint, MAX_SAFE_INTEGER};

/// Result type for decoding operations
pub type IoResult<T> = Result<T, DecodeError>;

/// Reads a VarInt-prefixed array of at most `max` elements.
pub fn read_array<R, T>(reader: &mut R, max: usize) -> IoResult<Vec<T>>
where
    R: NeoRead,
    T: NeoDecode,
{
    let len = reader.read_varint()?;
    if len > max as u64 {
        return Err(DecodeError::LengthOutOfRange {
            len,
            max: max as u64,
        });
    }
    let mut values = Vec::with_capacity(len as usize);
    for _ in 0..len {
        values.push(T::neo_decode(reader)?);
    }
    Ok(values)
}

/// Writes a VarInt-prefixed array.
pub fn write_array<W, T>(writer: &mut W, values: &[T])
where
    W: NeoWrite,
    T: NeoEncode,
{
    write_varint(writer, values.len() as u64);
    for value in values {
        value.neo_encode(writer);
    }
}
