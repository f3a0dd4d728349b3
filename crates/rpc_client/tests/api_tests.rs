//! Wallet flow tests against in-memory collaborators.

use async_trait::async_trait;
use neo_config::NetworkType;
use neo_core::{
    AttributeUsage, CoreError, Fixed8, Signer, Transaction, TransactionAttribute, TransactionOutput,
    TransactionType, UInt160, UInt256, GAS_ASSET, NEO_ASSET,
};
use neo_cryptography::KeyPair;
use neo_rpc_client::{
    DataProvider, InvokeRequest, RelayResponse, RpcError, RpcRelay, RpcResult, ScriptInvocation,
    ScriptSource, WalletApi,
};
use neo_wallets::{
    AssemblyOptions, AssetBalance, Balance, ClaimItem, Claims, Coin, TransactionOverrides,
    WalletError,
};
use std::sync::{Arc, Mutex};

fn amount(value: &str) -> Fixed8 {
    value.parse().unwrap()
}

fn pay(asset: UInt256, value: &str) -> TransactionOutput {
    TransactionOutput::new(asset, amount(value), UInt160::new([5; 20])).unwrap()
}

fn key() -> KeyPair {
    KeyPair::from_private_key(&[0x23; 32]).unwrap()
}

struct MockProvider {
    balance: Balance,
    claims: Claims,
    fail: bool,
}

impl MockProvider {
    fn for_key(key: &KeyPair) -> Self {
        let address = key.address();
        let mut balance = Balance::new(address.clone(), NetworkType::TestNet);
        balance.add_asset(
            "NEO",
            AssetBalance::new(vec![Coin::new(UInt256::new([1; 32]), 0, amount("100"))]).unwrap(),
        );
        balance.add_asset(
            "GAS",
            AssetBalance::new(vec![Coin::new(UInt256::new([2; 32]), 1, amount("3"))]).unwrap(),
        );
        let claims = Claims::new(
            address,
            NetworkType::TestNet,
            vec![ClaimItem {
                claim: amount("0.5"),
                txid: UInt256::new([9; 32]),
                index: 0,
                value: amount("100"),
                start: Some(1),
                end: Some(500),
            }],
        );
        Self {
            balance,
            claims,
            fail: false,
        }
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn get_balance(&self, net: NetworkType, address: &str) -> RpcResult<Balance> {
        if self.fail {
            return Err(RpcError::Provider("unreachable".into()));
        }
        assert_eq!(net, NetworkType::TestNet);
        assert_eq!(address, self.balance.address);
        Ok(self.balance.clone())
    }

    async fn get_claims(&self, _net: NetworkType, _address: &str) -> RpcResult<Claims> {
        Ok(self.claims.clone())
    }
}

#[derive(Default)]
struct MockRelay {
    sent: Mutex<Vec<String>>,
    reject: Option<String>,
}

#[async_trait]
impl RpcRelay for MockRelay {
    async fn send_raw_transaction(&self, hex: &str) -> RpcResult<RelayResponse> {
        self.sent.lock().unwrap().push(hex.to_string());
        Ok(match &self.reject {
            Some(reason) => RelayResponse::rejected(reason.clone()),
            None => RelayResponse::accepted(),
        })
    }
}

#[derive(Default)]
struct MockScripts {
    seen: Mutex<Vec<ScriptInvocation>>,
}

#[async_trait]
impl ScriptSource for MockScripts {
    async fn create_script(&self, invocation: &ScriptInvocation) -> RpcResult<String> {
        self.seen.lock().unwrap().push(invocation.clone());
        Ok("00c1076e6f7468696e67".to_string())
    }
}

fn api(provider: MockProvider, relay: Arc<MockRelay>) -> WalletApi<MockProvider, Arc<MockRelay>> {
    WalletApi::new(provider, relay, NetworkType::TestNet)
}

#[tokio::test]
async fn test_send_asset_relays_signed_hex_and_books_it() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let api = api(MockProvider::for_key(&key), relay.clone());
    let intents = vec![pay(*NEO_ASSET, "30")];

    let submission = api.send_asset(&key.address(), &key, &intents).await.unwrap();

    let sent = relay.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], submission.transaction.to_hex(true));
    assert!(submission.transaction.verify_witnesses());
    assert_eq!(Transaction::from_hex(&sent[0]).unwrap(), submission.transaction);

    let neo = submission.balance.asset("NEO").unwrap();
    assert!(neo.unspent.is_empty());
    assert_eq!(neo.spent.len(), 1);
    assert_eq!(neo.unconfirmed.len(), 1);
    assert_eq!(neo.unconfirmed[0].value, amount("70"));
    assert_eq!(neo.unconfirmed[0].txid, submission.transaction.hash());
}

#[tokio::test]
async fn test_rejected_transaction_is_not_booked() {
    let key = key();
    let relay = Arc::new(MockRelay {
        reject: Some("insufficient network fee".into()),
        ..Default::default()
    });
    let api = api(MockProvider::for_key(&key), relay.clone());
    let intents = vec![pay(*GAS_ASSET, "1")];

    let err = api.send_asset(&key.address(), &key, &intents).await.unwrap_err();
    assert!(err.is_rejection());
    assert!(matches!(
        err,
        RpcError::Rejected { ref message, .. } if message == "insufficient network fee"
    ));
    assert_eq!(relay.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_foreign_signer_is_refused_before_relay() {
    let owner = key();
    let stranger = KeyPair::from_private_key(&[0x24; 32]).unwrap();
    let relay = Arc::new(MockRelay::default());
    let api = api(MockProvider::for_key(&owner), relay.clone());
    let intents = vec![pay(*NEO_ASSET, "1")];

    let err = api
        .send_asset(&owner.address(), &stranger, &intents)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Core(CoreError::SignerMismatch { .. })));
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let key = key();
    let mut provider = MockProvider::for_key(&key);
    provider.fail = true;
    let relay = Arc::new(MockRelay::default());
    let api = api(provider, relay.clone());

    let err = api.send_asset(&key.address(), &key, &[]).await.unwrap_err();
    assert_eq!(err, RpcError::Provider("unreachable".into()));
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_insufficient_funds_surface_as_wallet_error() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let api = api(MockProvider::for_key(&key), relay);
    let intents = vec![pay(*NEO_ASSET, "101")];

    let err = api.send_asset(&key.address(), &key, &intents).await.unwrap_err();
    assert!(matches!(
        err,
        RpcError::Wallet(WalletError::InsufficientFunds { .. })
    ));
}

#[tokio::test]
async fn test_claim_gas_credits_claimed_amount() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let api = api(MockProvider::for_key(&key), relay.clone());

    let submission = api.claim_gas(&key.address(), &key).await.unwrap();
    let tx = &submission.transaction;
    assert_eq!(tx.tx_type(), TransactionType::Claim);
    assert_eq!(tx.claims().len(), 1);
    assert_eq!(tx.outputs()[0].value(), amount("0.5"));

    let gas = submission.balance.asset("GAS").unwrap();
    assert_eq!(gas.unconfirmed.len(), 1);
    assert_eq!(gas.unconfirmed[0].value, amount("0.5"));
    assert_eq!(gas.balance, amount("3"));
}

#[tokio::test]
async fn test_free_invocation_gets_script_and_timestamp() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let scripts = MockScripts::default();
    let api = api(MockProvider::for_key(&key), relay.clone());
    let invocation = ScriptInvocation::new(UInt160::new([0xab; 20]), "nothing");

    let submission = api
        .do_invoke(&key.address(), &key, &scripts, &InvokeRequest::new(invocation.clone()))
        .await
        .unwrap();
    let tx = &submission.transaction;

    assert_eq!(scripts.seen.lock().unwrap().as_slice(), &[invocation]);
    assert_eq!(tx.tx_type(), TransactionType::Invocation);
    assert!(tx.inputs().is_empty());
    assert!(tx.outputs().is_empty());
    let usages: Vec<AttributeUsage> = tx.attributes().iter().map(|a| a.usage()).collect();
    assert_eq!(usages, vec![AttributeUsage::SCRIPT, AttributeUsage::REMARK]);
    assert_eq!(tx.attributes()[0].data(), key.script_hash().as_bytes());
    assert!(String::from_utf8_lossy(tx.attributes()[1].data()).starts_with("Invoked at "));
    assert_eq!(relay.sent.lock().unwrap()[0], tx.to_hex(true));
}

#[tokio::test]
async fn test_repeated_free_invocations_hash_differently() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let scripts = MockScripts::default();
    let api = api(MockProvider::for_key(&key), relay.clone());
    let request = InvokeRequest::new(ScriptInvocation::new(UInt160::new([0xab; 20]), "nothing"));

    let mut hashes = Vec::new();
    for _ in 0..20 {
        let submission = api
            .do_invoke(&key.address(), &key, &scripts, &request)
            .await
            .unwrap();
        hashes.push(submission.transaction.hash());
    }
    let mut unique = hashes.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), hashes.len());
    assert_eq!(relay.sent.lock().unwrap().len(), 20);
}

#[tokio::test]
async fn test_invocation_attribute_override_replaces_remark() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let scripts = MockScripts::default();
    let mine = TransactionAttribute::remark("mine").unwrap();
    let options = AssemblyOptions::default().with_overrides(TransactionOverrides {
        attributes: Some(vec![mine.clone()]),
        ..Default::default()
    });
    let api = api(MockProvider::for_key(&key), relay).with_options(options);
    let request = InvokeRequest::new(ScriptInvocation::new(UInt160::new([0xab; 20]), "nothing"));

    let submission = api
        .do_invoke(&key.address(), &key, &scripts, &request)
        .await
        .unwrap();
    assert_eq!(submission.transaction.attributes(), &[mine]);
}

#[tokio::test]
async fn test_paid_invocation_spends_gas_without_remark() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let scripts = MockScripts::default();
    let api = api(MockProvider::for_key(&key), relay);
    let mut request = InvokeRequest::new(ScriptInvocation::new(UInt160::new([0xab; 20]), "run"));
    request.gas = amount("1");

    let submission = api
        .do_invoke(&key.address(), &key, &scripts, &request)
        .await
        .unwrap();
    let tx = &submission.transaction;

    assert_eq!(tx.gas(), amount("1"));
    assert_eq!(tx.inputs().len(), 1);
    assert!(tx.attributes().is_empty());
    assert_eq!(tx.outputs()[0].value(), amount("2"));
}

#[test]
fn test_flows_run_on_any_executor() {
    let key = key();
    let relay = Arc::new(MockRelay::default());
    let api = api(MockProvider::for_key(&key), relay);
    let submission = tokio_test::block_on(api.claim_gas(&key.address(), &key)).unwrap();
    assert!(submission.response.result);
}
