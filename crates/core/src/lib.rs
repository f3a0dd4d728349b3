//! # Neo Core
//!
//! The transaction core of the legacy NEO UTXO ledger.
//!
//! - **Basic types**: [`UInt160`] script hashes, [`UInt256`] transaction and
//!   asset ids, the exact [`Fixed8`] amount type
//! - **Assets**: the NEO and GAS governing/utility token ids
//! - **Scripts**: the opcodes needed for signature and multi-signature
//!   verification scripts, plus their parsers
//! - **Transactions**: inputs, outputs, attributes, witnesses, per-type
//!   exclusive data and the byte-exact wire codec
//! - **Signing**: the [`Signer`](signing::Signer) seam, witness attachment and
//!   multi-signature aggregation
//!
//! ## Example
//!
//! ```rust,no_run
//! use neo_core::{Fixed8, Transaction};
//!
//! let tx = Transaction::contract();
//! let fee: Fixed8 = "0.001".parse().unwrap();
//! println!("{} {}", tx.hash(), fee);
//! ```

pub mod assets;
pub mod error;
pub mod fixed8;
pub mod script;
pub mod signing;
pub mod transaction;
pub mod uint;

pub use assets::{asset_id, asset_symbol, GAS_ASSET, NEO_ASSET};
pub use error::{CoreError, CoreResult};
pub use fixed8::Fixed8;
pub use script::{ScriptBuilder, VerificationScript};
pub use signing::{build_multisig_witness, CallbackSigner, MultiSigInput, Signer};
pub use transaction::{
    AttributeUsage, ExclusiveData, Transaction, TransactionAttribute, TransactionInput,
    TransactionOutput, TransactionType, Witness,
};
pub use uint::{UInt160, UInt256};
