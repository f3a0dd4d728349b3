//! Pure transaction assembly.
//!
//! The builders read a [`Balance`] or [`Claims`] and return an unsigned
//! [`Transaction`]; nothing is marked spent here.

use crate::selection::{calculate_inputs_to, InputsAndChange, SelectionStrategy};
use crate::{Balance, Claims, WalletError, WalletResult};
use neo_config::ProtocolSettings;
use neo_core::{
    CoreError, Fixed8, Transaction, TransactionAttribute, TransactionInput, TransactionOutput,
    UInt160, GAS_ASSET,
};
use tracing::debug;

/// Fields that replace whatever the builder would compute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOverrides {
    pub version: Option<u8>,
    pub attributes: Option<Vec<TransactionAttribute>>,
    /// Skips coin selection entirely when set.
    pub inputs: Option<Vec<TransactionInput>>,
    pub outputs: Option<Vec<TransactionOutput>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Network fee, paid in GAS on top of the requested outputs.
    pub fees: Fixed8,
    pub strategy: SelectionStrategy,
    /// Address version, claim cap and build-time size limits.
    pub protocol: ProtocolSettings,
    pub overrides: TransactionOverrides,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            fees: Fixed8::ZERO,
            strategy: SelectionStrategy::default(),
            protocol: ProtocolSettings::default(),
            overrides: TransactionOverrides::default(),
        }
    }
}

impl AssemblyOptions {
    pub fn from_settings(settings: &ProtocolSettings) -> Self {
        Self {
            protocol: settings.clone(),
            ..Self::default()
        }
    }

    pub fn with_fees(mut self, fees: Fixed8) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_overrides(mut self, overrides: TransactionOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Claims the GAS generated by the listed outputs.
///
/// At most `max_claims_per_transaction` items are consumed; the single GAS
/// output pays the sum of the included claims back to the claiming address.
pub fn create_claim_tx(claims: &Claims, options: &AssemblyOptions) -> WalletResult<Transaction> {
    if claims.claims.is_empty() {
        return Err(WalletError::NoClaims);
    }
    let cap = options.protocol.max_claims_per_transaction.max(1);
    let included = &claims.claims[..claims.claims.len().min(cap)];
    let claimant =
        UInt160::from_address_with_version(&claims.address, options.protocol.address_version)?;

    let mut total = Fixed8::ZERO;
    for item in included {
        total = total
            .checked_add(item.claim)
            .ok_or(CoreError::Fixed8Overflow)?;
    }
    let references = included.iter().map(|item| item.reference()).collect();

    let tx = Transaction::claim(references)?;
    let outputs = vec![TransactionOutput::new(*GAS_ASSET, total, claimant)?];
    debug!(
        target: "neo",
        address = %claims.address,
        claims = included.len(),
        skipped = claims.claims.len() - included.len(),
        total = %total,
        "assembled claim transaction"
    );
    finish(tx, Vec::new(), Vec::new(), outputs, options)
}

/// A plain transfer of `intents`, funded from `balance`.
pub fn create_contract_tx(
    balance: &Balance,
    intents: &[TransactionOutput],
    options: &AssemblyOptions,
) -> WalletResult<Transaction> {
    let funding = fund(balance, intents, options.fees, options)?;
    let outputs = intents.iter().cloned().chain(funding.change).collect();
    debug!(
        target: "neo",
        address = %balance.address,
        intents = intents.len(),
        inputs = funding.inputs.len(),
        "assembled contract transaction"
    );
    finish(
        Transaction::contract(),
        Vec::new(),
        funding.inputs,
        outputs,
        options,
    )
}

/// Runs `script` with `gas` system fee; `intents` may be empty.
///
/// The gas joins the GAS requirement together with `options.fees`. When the
/// result spends and pays nothing, a script attribute names the sender so the
/// witness can still be matched to it.
pub fn create_invocation_tx(
    balance: &Balance,
    intents: &[TransactionOutput],
    script: Vec<u8>,
    gas: Fixed8,
    options: &AssemblyOptions,
) -> WalletResult<Transaction> {
    let max_script_size = options.protocol.max_script_size;
    if script.len() > max_script_size {
        return Err(WalletError::LimitExceeded {
            name: "script size",
            limit: max_script_size,
            actual: script.len(),
        });
    }
    let tx = Transaction::invocation(script, gas)?;
    let fee = gas
        .checked_add(options.fees)
        .ok_or(CoreError::Fixed8Overflow)?;
    let funding = fund(balance, intents, fee, options)?;
    let outputs: Vec<TransactionOutput> =
        intents.iter().cloned().chain(funding.change).collect();

    let overrides = &options.overrides;
    let spends_nothing = overrides.inputs.as_ref().unwrap_or(&funding.inputs).is_empty()
        && overrides.outputs.as_ref().unwrap_or(&outputs).is_empty();
    let mut attributes = Vec::new();
    if spends_nothing {
        let sender = balance.script_hash_with_version(options.protocol.address_version)?;
        attributes.push(TransactionAttribute::script(sender));
    }
    debug!(
        target: "neo",
        address = %balance.address,
        gas = %gas,
        inputs = funding.inputs.len(),
        "assembled invocation transaction"
    );
    finish(tx, attributes, funding.inputs, outputs, options)
}

fn fund(
    balance: &Balance,
    intents: &[TransactionOutput],
    fee: Fixed8,
    options: &AssemblyOptions,
) -> WalletResult<InputsAndChange> {
    if options.overrides.inputs.is_some() {
        return Ok(InputsAndChange::default());
    }
    let change_to = balance.script_hash_with_version(options.protocol.address_version)?;
    calculate_inputs_to(balance, intents, fee, options.strategy, change_to)
}

/// Adds `attribute` to `tx` unless that breaks the attribute limits of `settings`.
pub fn push_attribute(
    tx: &mut Transaction,
    attribute: TransactionAttribute,
    settings: &ProtocolSettings,
) -> WalletResult<()> {
    let count = tx.attributes().len() + 1;
    if count > settings.max_transaction_attributes {
        return Err(WalletError::LimitExceeded {
            name: "attribute count",
            limit: settings.max_transaction_attributes,
            actual: count,
        });
    }
    if attribute.data().len() > settings.max_attribute_data_size {
        return Err(WalletError::LimitExceeded {
            name: "attribute data size",
            limit: settings.max_attribute_data_size,
            actual: attribute.data().len(),
        });
    }
    tx.add_attribute(attribute)?;
    Ok(())
}

fn finish(
    mut tx: Transaction,
    attributes: Vec<TransactionAttribute>,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    options: &AssemblyOptions,
) -> WalletResult<Transaction> {
    let overrides = &options.overrides;
    if let Some(version) = overrides.version {
        tx.set_version(version)?;
    }
    let attributes = overrides.attributes.clone().unwrap_or(attributes);
    let inputs = overrides.inputs.clone().unwrap_or(inputs);
    let outputs = overrides.outputs.clone().unwrap_or(outputs);
    for attribute in attributes {
        push_attribute(&mut tx, attribute, &options.protocol)?;
    }
    for input in inputs {
        tx.add_input(input)?;
    }
    for output in outputs {
        tx.add_output(output)?;
    }
    Ok(tx)
}
