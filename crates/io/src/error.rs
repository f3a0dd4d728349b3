use thiserror::Error;

/// Errors raised while decoding the binary wire format or hex input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("non-canonical varint with tag {0:#04x}")]
    InvalidVarIntTag(u8),

    #[error("length {len} out of range (max {max})")]
    LengthOutOfRange { len: u64, max: u64 },

    #[error("value {0} exceeds the safe integer limit")]
    UnsafeInteger(u64),

    #[error("unknown {kind} {tag:#04x}")]
    UnknownTag { kind: &'static str, tag: u8 },

    #[error("invalid {0}")]
    InvalidValue(&'static str),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("{0} trailing bytes after decoding")]
    TrailingBytes(usize),
}
