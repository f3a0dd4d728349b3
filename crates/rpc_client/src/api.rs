//! Fetch, build, sign, relay, apply.
//!
//! Each flow runs its steps strictly in sequence against one freshly fetched
//! [`Balance`]. A transaction is booked into that balance only after the relay
//! accepted it, and the updated balance is handed back so callers can chain
//! further builds without another round trip.

use crate::{
    DataProvider, RelayResponse, RpcError, RpcRelay, RpcResult, ScriptInvocation, ScriptSource,
};
use chrono::{SecondsFormat, Utc};
use neo_config::NetworkType;
use neo_core::{
    CoreError, Fixed8, Signer, Transaction, TransactionAttribute, TransactionOutput, UInt160,
};
use neo_io::{decode_hex, ToHex};
use neo_wallets::{
    create_claim_tx, create_contract_tx, create_invocation_tx, push_attribute, AssemblyOptions,
    Balance,
};
use tracing::{debug, info, warn};

/// Outcome of a relayed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The signed transaction exactly as relayed.
    pub transaction: Transaction,
    /// The fetched balance with the transaction applied as unconfirmed.
    pub balance: Balance,
    pub response: RelayResponse,
}

/// Parameters of [`WalletApi::do_invoke`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeRequest {
    pub invocation: ScriptInvocation,
    /// System fee attached to the invocation.
    pub gas: Fixed8,
    /// Assets sent along with the call; often empty.
    pub intents: Vec<TransactionOutput>,
}

impl InvokeRequest {
    pub fn new(invocation: ScriptInvocation) -> Self {
        Self {
            invocation,
            gas: Fixed8::ZERO,
            intents: Vec::new(),
        }
    }
}

/// Wallet flows over a data provider and a relay.
pub struct WalletApi<P, R> {
    provider: P,
    relay: R,
    net: NetworkType,
    options: AssemblyOptions,
}

impl<P: DataProvider, R: RpcRelay> WalletApi<P, R> {
    pub fn new(provider: P, relay: R, net: NetworkType) -> Self {
        Self {
            provider,
            relay,
            net,
            options: AssemblyOptions::default(),
        }
    }

    /// Assembly options used by every flow.
    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn net(&self) -> NetworkType {
        self.net
    }

    /// Sends `intents` from `address`, signed by `signer`.
    pub async fn send_asset<S: Signer + ?Sized>(
        &self,
        address: &str,
        signer: &S,
        intents: &[TransactionOutput],
    ) -> RpcResult<Submission> {
        let balance = self.provider.get_balance(self.net, address).await?;
        let tx = create_contract_tx(&balance, intents, &self.options)?;
        self.submit(address, signer, tx, balance).await
    }

    /// Claims all claimable GAS of `address`, up to the per-transaction cap.
    pub async fn claim_gas<S: Signer + ?Sized>(
        &self,
        address: &str,
        signer: &S,
    ) -> RpcResult<Submission> {
        let claims = self.provider.get_claims(self.net, address).await?;
        let balance = self.provider.get_balance(self.net, address).await?;
        let tx = create_claim_tx(&claims, &self.options)?;
        self.submit(address, signer, tx, balance).await
    }

    /// Compiles `request.invocation` through `source` and runs it from `address`.
    ///
    /// An invocation that spends no coins gets a remark carrying a timestamp
    /// and a random nonce, so two otherwise identical calls never share a
    /// hash. Overridden attributes replace the remark like any other.
    pub async fn do_invoke<S, C>(
        &self,
        address: &str,
        signer: &S,
        source: &C,
        request: &InvokeRequest,
    ) -> RpcResult<Submission>
    where
        S: Signer + ?Sized,
        C: ScriptSource + ?Sized,
    {
        let balance = self.provider.get_balance(self.net, address).await?;
        let script_hex = source.create_script(&request.invocation).await?;
        let script = decode_hex(&script_hex).map_err(CoreError::from)?;
        debug!(
            target: "neo",
            contract = %request.invocation.script_hash,
            operation = %request.invocation.operation,
            script_len = script.len(),
            "compiled invocation script"
        );

        let mut tx =
            create_invocation_tx(&balance, &request.intents, script, request.gas, &self.options)?;
        if tx.inputs().is_empty() && self.options.overrides.attributes.is_none() {
            let remark = TransactionAttribute::remark(invocation_remark())?;
            push_attribute(&mut tx, remark, &self.options.protocol)?;
        }
        self.submit(address, signer, tx, balance).await
    }

    async fn submit<S: Signer + ?Sized>(
        &self,
        address: &str,
        signer: &S,
        mut tx: Transaction,
        mut balance: Balance,
    ) -> RpcResult<Submission> {
        let version = self.options.protocol.address_version;
        let owner = UInt160::from_address_with_version(address, version)?;
        tx.sign_as(signer, &owner)?;
        let txid = tx.hash();

        let response = self.relay.send_raw_transaction(&tx.to_hex(true)).await?;
        if !response.result {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| "no reason given".to_string());
            warn!(target: "neo", tx = %txid, reason = %message, "relay rejected transaction");
            return Err(RpcError::Rejected { txid, message });
        }

        info!(
            target: "neo",
            tx = %txid,
            kind = %tx.tx_type(),
            address,
            "relayed transaction"
        );
        balance.apply_tx_with_version(&tx, false, version)?;
        Ok(Submission {
            transaction: tx,
            balance,
            response,
        })
    }
}

// Millisecond timestamps alone repeat for calls made in quick succession.
fn invocation_remark() -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let nonce = rand::random::<[u8; 4]>().to_hex_lower();
    format!("Invoked at {now} {nonce}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_remarks_differ() {
        let first = invocation_remark();
        let second = invocation_remark();
        assert!(first.starts_with("Invoked at "));
        assert_ne!(first, second);
    }
}
