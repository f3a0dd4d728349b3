//! Collaborator traits.
//!
//! Implementations do network I/O, so every method is async. Nothing here
//! retries or times out; that belongs to the implementation.

use crate::RpcResult;
use async_trait::async_trait;
use neo_config::NetworkType;
use neo_core::UInt160;
use neo_wallets::{Balance, Claims};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of account state.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_balance(&self, net: NetworkType, address: &str) -> RpcResult<Balance>;

    async fn get_claims(&self, net: NetworkType, address: &str) -> RpcResult<Claims>;
}

/// Node answer to `sendrawtransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelayResponse {
    pub fn accepted() -> Self {
        Self {
            result: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            result: false,
            message: Some(message.into()),
        }
    }
}

#[async_trait]
pub trait RpcRelay: Send + Sync {
    /// Broadcasts a signed transaction given as hex.
    async fn send_raw_transaction(&self, hex: &str) -> RpcResult<RelayResponse>;
}

/// A contract call to be compiled into an invocation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptInvocation {
    pub script_hash: UInt160,
    pub operation: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl ScriptInvocation {
    pub fn new(script_hash: UInt160, operation: impl Into<String>) -> Self {
        Self {
            script_hash,
            operation: operation.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<serde_json::Value>) -> Self {
        self.args = args;
        self
    }
}

#[async_trait]
pub trait ScriptSource: Send + Sync {
    /// Returns the VM script for `invocation` as hex.
    async fn create_script(&self, invocation: &ScriptInvocation) -> RpcResult<String>;
}

#[async_trait]
impl<T: DataProvider + ?Sized> DataProvider for Arc<T> {
    async fn get_balance(&self, net: NetworkType, address: &str) -> RpcResult<Balance> {
        self.as_ref().get_balance(net, address).await
    }

    async fn get_claims(&self, net: NetworkType, address: &str) -> RpcResult<Claims> {
        self.as_ref().get_claims(net, address).await
    }
}

#[async_trait]
impl<T: RpcRelay + ?Sized> RpcRelay for Arc<T> {
    async fn send_raw_transaction(&self, hex: &str) -> RpcResult<RelayResponse> {
        self.as_ref().send_raw_transaction(hex).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_response_without_message() {
        let response: RelayResponse = serde_json::from_str(r#"{"result":true}"#).unwrap();
        assert_eq!(response, RelayResponse::accepted());

        let response: RelayResponse =
            serde_json::from_str(r#"{"result":false,"message":"double spend"}"#).unwrap();
        assert_eq!(response, RelayResponse::rejected("double spend"));
    }

    #[test]
    fn test_script_invocation_json() {
        let invocation = ScriptInvocation::new(UInt160::new([1; 20]), "transfer")
            .with_args(vec![serde_json::json!(5)]);
        let json = serde_json::to_value(&invocation).unwrap();
        assert_eq!(json["scriptHash"], "0101010101010101010101010101010101010101");
        assert_eq!(json["operation"], "transfer");
        assert_eq!(json["args"][0], 5);
    }
}
