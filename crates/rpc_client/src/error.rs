use neo_core::{CoreError, UInt256};
use neo_wallets::WalletError;
use thiserror::Error;

/// Result type for RPC operations
pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// Errors raised while talking to collaborators or preparing what is sent to them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("Data provider error: {0}")]
    Provider(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Script source error: {0}")]
    ScriptSource(String),

    #[error("Transaction {txid} rejected: {message}")]
    Rejected { txid: UInt256, message: String },

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RpcError {
    /// Whether the node received the transaction and refused it.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RpcError::Rejected { .. })
    }
}
