//! Coin selection.
//!
//! For each asset a transaction spends, pick a subset of the unspent coins
//! covering the requirement and pay the surplus back as one change output.

use crate::{Balance, Coin, WalletError, WalletResult};
use indexmap::IndexMap;
use neo_core::{
    asset_symbol, CoreError, Fixed8, TransactionInput, TransactionOutput, UInt160, UInt256,
    GAS_ASSET,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Order in which coins are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Ascending by value; the consumed prefix is minimal for that order.
    #[default]
    SmallestFirst,
    /// Descending by value; fewest inputs.
    BiggestFirst,
}

/// Coins chosen for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub coins: Vec<Coin>,
    pub total: Fixed8,
    pub change: Fixed8,
}

/// Picks coins from `unspent` until they cover `required`.
///
/// Ties keep their original order. `asset` only labels the error.
pub fn select_coins(
    asset: &str,
    unspent: &[Coin],
    required: Fixed8,
    strategy: SelectionStrategy,
) -> WalletResult<Selection> {
    let available = sum(unspent.iter().map(|coin| coin.value))?;
    if available < required {
        return Err(WalletError::InsufficientFunds {
            asset: asset.to_string(),
            required,
            available,
        });
    }

    let mut ordered: Vec<&Coin> = unspent.iter().collect();
    match strategy {
        SelectionStrategy::SmallestFirst => ordered.sort_by_key(|coin| coin.value),
        SelectionStrategy::BiggestFirst => ordered.sort_by(|a, b| b.value.cmp(&a.value)),
    }

    let mut coins = Vec::new();
    let mut total = Fixed8::ZERO;
    for coin in ordered {
        if total >= required {
            break;
        }
        // cannot overflow: bounded by `available`
        total += coin.value;
        coins.push(*coin);
    }

    Ok(Selection {
        coins,
        total,
        change: total - required,
    })
}

fn sum(values: impl Iterator<Item = Fixed8>) -> WalletResult<Fixed8> {
    let mut total = Fixed8::ZERO;
    for value in values {
        total = total
            .checked_add(value)
            .ok_or(WalletError::Core(CoreError::Fixed8Overflow))?;
    }
    Ok(total)
}

/// Inputs and change computed for a set of payment intents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputsAndChange {
    pub inputs: Vec<TransactionInput>,
    pub change: Vec<TransactionOutput>,
    /// The coins behind `inputs`, in the same order.
    pub coins: Vec<Coin>,
}

/// Funds `intents` plus a GAS `fee` from `balance`.
///
/// Requirements are summed per asset in the order assets first appear in
/// `intents`; a fee for an asset not otherwise paid is selected last. The
/// balance is only read: nothing is marked spent until the transaction is
/// applied with [`Balance::apply_tx`].
pub fn calculate_inputs(
    balance: &Balance,
    intents: &[TransactionOutput],
    fee: Fixed8,
    strategy: SelectionStrategy,
) -> WalletResult<InputsAndChange> {
    calculate_inputs_to(balance, intents, fee, strategy, balance.script_hash()?)
}

/// As [`calculate_inputs`], paying change to `change_to`.
pub fn calculate_inputs_to(
    balance: &Balance,
    intents: &[TransactionOutput],
    fee: Fixed8,
    strategy: SelectionStrategy,
    change_to: UInt160,
) -> WalletResult<InputsAndChange> {
    if fee.is_negative() {
        return Err(WalletError::InvalidFee(fee));
    }

    let mut required: IndexMap<UInt256, Fixed8> = IndexMap::new();
    for intent in intents {
        add_requirement(&mut required, intent.asset_id(), intent.value())?;
    }
    if fee.is_positive() {
        add_requirement(&mut required, *GAS_ASSET, fee)?;
    }

    let mut result = InputsAndChange::default();
    for (asset_id, amount) in required {
        let symbol = asset_symbol(&asset_id);
        let unspent = balance
            .asset(&symbol)
            .map(|asset| asset.unspent.as_slice())
            .unwrap_or_default();
        let selection = select_coins(&symbol, unspent, amount, strategy)?;
        debug!(
            target: "neo",
            asset = %symbol,
            required = %amount,
            selected = selection.coins.len(),
            change = %selection.change,
            "selected coins"
        );

        result.inputs.extend(
            selection
                .coins
                .iter()
                .map(|coin| TransactionInput::new(coin.txid, coin.index)),
        );
        if selection.change.is_positive() {
            result
                .change
                .push(TransactionOutput::new(asset_id, selection.change, change_to)?);
        }
        result.coins.extend(selection.coins);
    }
    Ok(result)
}

fn add_requirement(
    required: &mut IndexMap<UInt256, Fixed8>,
    asset_id: UInt256,
    amount: Fixed8,
) -> WalletResult<()> {
    let entry = required.entry(asset_id).or_insert(Fixed8::ZERO);
    *entry = entry
        .checked_add(amount)
        .ok_or(WalletError::Core(CoreError::Fixed8Overflow))?;
    Ok(())
}
