//! Neo Wallets Library
//!
//! The caller-owned view of an account on the UTXO ledger, and everything
//! that turns it into unsigned transactions:
//! - [`Balance`] / [`AssetBalance`] / [`Coin`] and [`Claims`] / [`ClaimItem`]
//! - coin selection with change ([`selection`])
//! - claim, contract and invocation assembly ([`builder`])
//! - [`Balance::apply_tx`], which books a built transaction back into the
//!   balance so several transactions can be chained without re-querying

pub mod balance;
pub mod builder;
pub mod claims;
pub mod selection;

pub use balance::{AssetBalance, Balance, Coin};
pub use builder::{
    create_claim_tx, create_contract_tx, create_invocation_tx, push_attribute, AssemblyOptions,
    TransactionOverrides,
};
pub use claims::{ClaimItem, Claims};
pub use selection::{
    calculate_inputs, calculate_inputs_to, select_coins, InputsAndChange, Selection,
    SelectionStrategy,
};

use neo_core::{CoreError, Fixed8};
use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = std::result::Result<T, WalletError>;

/// Wallet-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Insufficient funds for {asset}: required {required}, available {available}")]
    InsufficientFunds {
        asset: String,
        required: Fixed8,
        available: Fixed8,
    },

    #[error("No claimable GAS")]
    NoClaims,

    #[error("Invalid fee: {0}")]
    InvalidFee(Fixed8),

    #[error("{name} is {actual}, limit is {limit}")]
    LimitExceeded {
        name: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
