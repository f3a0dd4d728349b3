//! Transaction model and wire format.
//!
//! - `input` / `output` - UTXO references and value transfers
//! - `attributes` - usage-tagged attributes
//! - `witness` - invocation/verification script pairs
//! - `exclusive` - transaction types and their per-type payload
//! - `core` - the `Transaction` struct and its mutation rules
//! - `serialization` - byte-exact encoding, decoding and hashing

pub mod attributes;
pub mod core;
pub mod exclusive;
pub mod input;
pub mod output;
pub mod serialization;
pub mod witness;

pub use attributes::{AttributeUsage, TransactionAttribute};
pub use self::core::Transaction;
pub use exclusive::{ExclusiveData, TransactionType};
pub use input::{TransactionInput, INPUT_SIZE};
pub use output::{TransactionOutput, OUTPUT_SIZE};
pub use witness::Witness;
