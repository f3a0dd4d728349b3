//! Neo RPC Client Library
//!
//! The seams through which the toolkit talks to the outside world, and the
//! flows built on them:
//! - [`DataProvider`] supplies balances and claimable GAS
//! - [`RpcRelay`] broadcasts signed transactions
//! - [`ScriptSource`] turns a contract call into a VM script
//! - [`WalletApi`] fetches, builds, signs, relays and books transactions

pub mod api;
pub mod collaborators;
mod error;

pub use api::{InvokeRequest, Submission, WalletApi};
pub use collaborators::{DataProvider, RelayResponse, RpcRelay, ScriptInvocation, ScriptSource};
pub use error::{RpcError, RpcResult};
