//! Error types for the transaction core.

use crate::{Fixed8, UInt160};
use neo_io::DecodeError;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cryptography error: {0}")]
    Cryptography(#[from] neo_cryptography::Error),

    #[error("Unknown transaction type: {0:#04x}")]
    UnknownTransactionType(u8),

    #[error("Unknown attribute usage: {0:#04x}")]
    UnknownAttributeUsage(u8),

    #[error("Invalid attribute {usage:#04x}: {reason}")]
    InvalidAttribute { usage: u8, reason: String },

    #[error("Too many attributes: {count} (max {max})")]
    TooManyAttributes { count: usize, max: usize },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid Fixed8 value: {0}")]
    InvalidFixed8(String),

    #[error("Fixed8 overflow")]
    Fixed8Overflow,

    #[error("Output value must be positive, got {0}")]
    NonPositiveOutput(Fixed8),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Transaction is already signed")]
    AlreadySigned,

    #[error("A witness for {0} is already attached")]
    DuplicateWitness(UInt160),

    #[error("Signer {actual} does not match expected account {expected}")]
    SignerMismatch { expected: UInt160, actual: UInt160 },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Duplicate signature for public key {0}")]
    DuplicateSignature(String),

    #[error("Insufficient signatures: expected {required}, got {found}")]
    InsufficientSignatures { required: usize, found: usize },
}
