//! In-memory view of an account's unspent outputs.

use crate::{WalletError, WalletResult};
use indexmap::IndexMap;
use neo_config::{NetworkType, ADDRESS_VERSION};
use neo_core::{asset_symbol, CoreError, Fixed8, Transaction, UInt160, UInt256};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One unspent (or spent) output owned by the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub index: u16,
    pub txid: UInt256,
    pub value: Fixed8,
}

impl Coin {
    pub fn new(txid: UInt256, index: u16, value: Fixed8) -> Self {
        Self { index, txid, value }
    }

    #[inline]
    fn same_output(&self, txid: &UInt256, index: u16) -> bool {
        self.txid == *txid && self.index == index
    }
}

/// Coins of one asset. `balance` always equals the sum of `unspent`.
///
/// A `balance` reported by a data provider is not trusted; it is recomputed
/// from `unspent` on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReportedAssetBalance")]
pub struct AssetBalance {
    pub balance: Fixed8,
    pub unspent: Vec<Coin>,
    pub spent: Vec<Coin>,
    pub unconfirmed: Vec<Coin>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ReportedAssetBalance {
    unspent: Vec<Coin>,
    spent: Vec<Coin>,
    unconfirmed: Vec<Coin>,
}

impl TryFrom<ReportedAssetBalance> for AssetBalance {
    type Error = WalletError;

    fn try_from(reported: ReportedAssetBalance) -> WalletResult<Self> {
        let mut asset = Self {
            balance: Fixed8::ZERO,
            unspent: reported.unspent,
            spent: reported.spent,
            unconfirmed: reported.unconfirmed,
        };
        asset.recalculate()?;
        Ok(asset)
    }
}

impl AssetBalance {
    pub fn new(unspent: Vec<Coin>) -> WalletResult<Self> {
        let mut asset = Self {
            unspent,
            ..Self::default()
        };
        asset.recalculate()?;
        Ok(asset)
    }

    /// Sum of the unspent coins.
    pub fn total_unspent(&self) -> WalletResult<Fixed8> {
        self.unspent.iter().try_fold(Fixed8::ZERO, |acc, coin| {
            acc.checked_add(coin.value)
                .ok_or(WalletError::Core(CoreError::Fixed8Overflow))
        })
    }

    pub fn recalculate(&mut self) -> WalletResult<()> {
        self.balance = self.total_unspent()?;
        Ok(())
    }

    fn contains(&self, txid: &UInt256, index: u16) -> bool {
        self.unspent
            .iter()
            .chain(&self.spent)
            .any(|coin| coin.same_output(txid, index))
    }

    fn take_unconfirmed(&mut self, txid: &UInt256, index: u16) -> Option<Coin> {
        let pos = self
            .unconfirmed
            .iter()
            .position(|coin| coin.same_output(txid, index))?;
        Some(self.unconfirmed.remove(pos))
    }

    // Moves the coin an input refers to into `spent`.
    fn spend(&mut self, txid: &UInt256, index: u16) -> bool {
        if let Some(pos) = self
            .unspent
            .iter()
            .position(|coin| coin.same_output(txid, index))
        {
            let coin = self.unspent.remove(pos);
            self.spent.push(coin);
            return true;
        }
        match self.take_unconfirmed(txid, index) {
            Some(coin) => {
                self.spent.push(coin);
                true
            }
            None => false,
        }
    }
}

/// Everything known locally about one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub address: String,
    #[serde(default)]
    pub net: NetworkType,
    #[serde(default)]
    pub asset_symbols: Vec<String>,
    #[serde(default)]
    pub assets: IndexMap<String, AssetBalance>,
    #[serde(default)]
    pub token_symbols: Vec<String>,
    #[serde(default)]
    pub tokens: IndexMap<String, Fixed8>,
}

impl Balance {
    pub fn new(address: impl Into<String>, net: NetworkType) -> Self {
        Self {
            address: address.into(),
            net,
            asset_symbols: Vec::new(),
            assets: IndexMap::new(),
            token_symbols: Vec::new(),
            tokens: IndexMap::new(),
        }
    }

    /// Adds or replaces the coins held for `symbol`.
    pub fn add_asset(&mut self, symbol: impl Into<String>, asset: AssetBalance) {
        let symbol = symbol.into();
        if !self.asset_symbols.contains(&symbol) {
            self.asset_symbols.push(symbol.clone());
        }
        self.assets.insert(symbol, asset);
    }

    pub fn add_token(&mut self, symbol: impl Into<String>, amount: Fixed8) {
        let symbol = symbol.into();
        if !self.token_symbols.contains(&symbol) {
            self.token_symbols.push(symbol.clone());
        }
        self.tokens.insert(symbol, amount);
    }

    pub fn asset(&self, symbol: &str) -> Option<&AssetBalance> {
        self.assets.get(symbol)
    }

    /// Script hash of the owning address; change is paid back to it.
    pub fn script_hash(&self) -> WalletResult<UInt160> {
        self.script_hash_with_version(ADDRESS_VERSION)
    }

    /// As [`Balance::script_hash`], for networks with another address version.
    pub fn script_hash_with_version(&self, version: u8) -> WalletResult<UInt160> {
        Ok(UInt160::from_address_with_version(&self.address, version)?)
    }

    /// Books `tx` into this balance.
    ///
    /// Coins spent by its inputs move to `spent`. Outputs paying this address
    /// become coins keyed by the transaction hash and output index, placed in
    /// `unspent` when `confirmed` and in `unconfirmed` otherwise. Applying the
    /// same transaction again changes nothing, except that a confirmed apply
    /// promotes coins left unconfirmed by an earlier one.
    pub fn apply_tx(&mut self, tx: &Transaction, confirmed: bool) -> WalletResult<()> {
        self.apply_tx_with_version(tx, confirmed, ADDRESS_VERSION)
    }

    /// As [`Balance::apply_tx`], for networks with another address version.
    ///
    /// On error the balance is left exactly as it was.
    pub fn apply_tx_with_version(
        &mut self,
        tx: &Transaction,
        confirmed: bool,
        address_version: u8,
    ) -> WalletResult<()> {
        let owner = self.script_hash_with_version(address_version)?;
        let txid = tx.hash();
        let credited = tx
            .outputs()
            .iter()
            .enumerate()
            .filter(|(_, output)| output.script_hash() == owner)
            .map(|(index, output)| {
                u16::try_from(index)
                    .map(|index| (index, output))
                    .map_err(|_| {
                        WalletError::from(CoreError::InvalidTransaction(format!(
                            "output index {index} exceeds u16"
                        )))
                    })
            })
            .collect::<WalletResult<Vec<_>>>()?;

        // staged on copies, committed only once every total is known
        let mut assets = self.assets.clone();
        let mut symbols = self.asset_symbols.clone();

        for input in tx.inputs() {
            let spent = assets
                .values_mut()
                .any(|asset| asset.spend(&input.prev_hash, input.prev_index));
            if !spent {
                debug!(
                    target: "neo",
                    prev_hash = %input.prev_hash,
                    prev_index = input.prev_index,
                    "input does not spend a known coin"
                );
            }
        }

        for (index, output) in credited {
            let symbol = asset_symbol(&output.asset_id());
            if !symbols.contains(&symbol) {
                symbols.push(symbol.clone());
            }
            let asset = assets.entry(symbol).or_default();
            if asset.contains(&txid, index) {
                continue;
            }

            let coin = Coin::new(txid, index, output.value());
            if confirmed {
                asset.take_unconfirmed(&txid, index);
                asset.unspent.push(coin);
            } else if !asset
                .unconfirmed
                .iter()
                .any(|pending| pending.same_output(&txid, index))
            {
                asset.unconfirmed.push(coin);
            }
        }

        for asset in assets.values_mut() {
            asset.recalculate()?;
        }
        self.assets = assets;
        self.asset_symbols = symbols;
        debug!(
            target: "neo",
            tx = %txid,
            confirmed,
            address = %self.address,
            "applied transaction"
        );
        Ok(())
    }
}
