//! # neo-tx: client-side transactions for the legacy NEO UTXO ledger
//!
//! Build, sign and relay Claim, Contract and Invocation transactions without
//! running a node.
//!
//! ## Architecture
//!
//! - [`neo_io`] - binary wire primitives and VarInt codec
//! - [`neo_cryptography`] - hashing, base58check and secp256r1 signatures
//! - [`neo_core`] - Fixed8, hashes, the transaction model, scripts and signing
//! - [`neo_wallets`] - balances, coin selection and transaction assembly
//! - [`neo_rpc_client`] - data-provider and relay seams and the end-to-end flows
//! - [`neo_config`] - network and protocol settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neo_tx::prelude::*;
//!
//! fn transfer(balance: &Balance, key: &KeyPair, to: &str) -> Result<String, Error> {
//!     let one = Fixed8::from_integer(1)?;
//!     let intents = vec![TransactionOutput::to_address(*NEO_ASSET, one, to)?];
//!     let mut tx = create_contract_tx(balance, &intents, &AssemblyOptions::default())?;
//!     tx.sign(key)?;
//!     Ok(tx.to_hex(true))
//! }
//! ```

#![warn(missing_docs)]

pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as crypto;
pub use neo_io as io;
pub use neo_rpc_client as rpc_client;
pub use neo_wallets as wallets;

use neo_config::LoggingSettings;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Common imports for building and signing transactions
pub mod prelude {
    pub use crate::Error;
    pub use neo_config::{NetworkType, ProtocolSettings, ToolkitConfig};
    pub use neo_core::{
        build_multisig_witness, Fixed8, Signer, Transaction, TransactionAttribute,
        TransactionOutput, TransactionType, UInt160, UInt256, GAS_ASSET, NEO_ASSET,
    };
    pub use neo_cryptography::{KeyPair, PublicKey, Signature};
    pub use neo_rpc_client::{
        DataProvider, InvokeRequest, RpcRelay, ScriptInvocation, ScriptSource, WalletApi,
    };
    pub use neo_wallets::{
        create_claim_tx, create_contract_tx, create_invocation_tx, AssemblyOptions, Balance,
        Claims,
    };
}

/// Any error raised by the toolkit.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] neo_config::ConfigError),

    /// Encoding, transaction or signature error
    #[error(transparent)]
    Core(#[from] neo_core::CoreError),

    /// Funding or assembly error
    #[error(transparent)]
    Wallet(#[from] neo_wallets::WalletError),

    /// Collaborator error
    #[error(transparent)]
    Rpc(#[from] neo_rpc_client::RpcError),

    /// The configured log format is not one of `text`, `json` or `pretty`
    #[error("Unknown log format: {0}")]
    UnknownLogFormat(String),
}

/// Installs a global `tracing` subscriber configured by `settings`.
///
/// `RUST_LOG` overrides the configured level. Returns `Ok(false)` when logging
/// is disabled or a subscriber was already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<bool, Error> {
    if !settings.active {
        return Ok(false);
    }

    let level = settings.level.as_str();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},neo={level}")));
    let builder = fmt().with_env_filter(env_filter);

    let installed = match settings.format.to_ascii_lowercase().as_str() {
        "text" => builder.try_init().is_ok(),
        "json" => builder.json().try_init().is_ok(),
        "pretty" => builder.pretty().try_init().is_ok(),
        other => return Err(Error::UnknownLogFormat(other.to_string())),
    };
    if installed {
        tracing::info!(
            target: "neo",
            log_level = level,
            format = %settings.format,
            "logging initialized"
        );
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let settings = LoggingSettings {
            active: false,
            ..Default::default()
        };
        assert!(!init_tracing(&settings).unwrap());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let settings = LoggingSettings {
            format: "xml".into(),
            ..Default::default()
        };
        assert!(matches!(
            init_tracing(&settings),
            Err(Error::UnknownLogFormat(format)) if format == "xml"
        ));
    }

    #[test]
    fn test_repeated_init_is_ignored() {
        let settings = LoggingSettings::default();
        let first = init_tracing(&settings).unwrap();
        let second = init_tracing(&settings).unwrap();
        assert!(!(first && second));
    }
}
