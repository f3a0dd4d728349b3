use super::DecodeError;

pub trait ToHex {
    fn to_hex_lower(&self) -> String;

    fn to_hex_upper(&self) -> String;
}

impl<T: AsRef<[u8]>> ToHex for T {
    #[inline]
    fn to_hex_lower(&self) -> String {
        hex::encode(self)
    }

    #[inline]
    fn to_hex_upper(&self) -> String {
        hex::encode_upper(self)
    }
}

/// Hex rendering with the byte order flipped, the display form of wire hashes.
pub trait ToRevHex {
    fn to_rev_hex_lower(&self) -> String;

    fn to_rev_hex_upper(&self) -> String;
}

#[inline]
fn encode_hex(data: &[u8], table: &[u8; 16]) -> String {
    let mut h = String::with_capacity(data.len() * 2);
    data.iter().rev().for_each(|b| {
        h.push(table[(b >> 4) as usize] as char);
        h.push(table[(b & 0x0F) as usize] as char);
    });

    h
}

impl<T: AsRef<[u8]>> ToRevHex for T {
    #[inline]
    fn to_rev_hex_lower(&self) -> String {
        encode_hex(self.as_ref(), b"0123456789abcdef")
    }

    #[inline]
    fn to_rev_hex_upper(&self) -> String {
        encode_hex(self.as_ref(), b"0123456789ABCDEF")
    }
}

#[inline]
fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decodes a hex string, accepting an optional `0x` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, DecodeError> {
    let value = strip_0x(value.trim());
    hex::decode(value).map_err(|err| DecodeError::InvalidHex(err.to_string()))
}

/// Decodes a hex string and flips the byte order.
pub fn decode_rev_hex(value: &str) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = decode_hex(value)?;
    bytes.reverse();
    Ok(bytes)
}

/// Flips the byte order of a hex string, e.g. `"0a0b"` becomes `"0b0a"`.
pub fn reverse_hex(value: &str) -> Result<String, DecodeError> {
    Ok(hex::encode(decode_rev_hex(value)?))
}
