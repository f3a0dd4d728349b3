//! The transaction model and its mutation rules.

use super::attributes::TransactionAttribute;
use super::exclusive::{ExclusiveData, TransactionType};
use super::input::TransactionInput;
use super::output::TransactionOutput;
use super::witness::Witness;
use crate::{CoreError, CoreResult, Fixed8};
use neo_config::MAX_TRANSACTION_ATTRIBUTES;

/// A legacy NEO UTXO transaction.
///
/// Every field that feeds the hash is private. Mutators refuse to run once a
/// witness is attached, so signing can never invalidate the signed hash;
/// [`Transaction::clear_witnesses`] is the only way back to an editable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) version: u8,
    pub(crate) exclusive: ExclusiveData,
    pub(crate) attributes: Vec<TransactionAttribute>,
    pub(crate) inputs: Vec<TransactionInput>,
    pub(crate) outputs: Vec<TransactionOutput>,
    pub(crate) witnesses: Vec<Witness>,
}

impl Transaction {
    pub fn new(version: u8, exclusive: ExclusiveData) -> CoreResult<Self> {
        validate_exclusive(version, &exclusive)?;
        Ok(Self {
            version,
            exclusive,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        })
    }

    /// An empty contract (plain transfer) transaction.
    pub fn contract() -> Self {
        Self {
            version: TransactionType::Contract.default_version(),
            exclusive: ExclusiveData::Contract,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        }
    }

    pub fn claim(claims: Vec<TransactionInput>) -> CoreResult<Self> {
        Self::new(
            TransactionType::Claim.default_version(),
            ExclusiveData::Claim { claims },
        )
    }

    pub fn invocation(script: Vec<u8>, gas: Fixed8) -> CoreResult<Self> {
        Self::new(
            TransactionType::Invocation.default_version(),
            ExclusiveData::Invocation { script, gas },
        )
    }

    #[inline]
    pub fn tx_type(&self) -> TransactionType {
        self.exclusive.tx_type()
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn exclusive_data(&self) -> &ExclusiveData {
        &self.exclusive
    }

    #[inline]
    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    #[inline]
    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    #[inline]
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// Claim references, empty for other types.
    pub fn claims(&self) -> &[TransactionInput] {
        match &self.exclusive {
            ExclusiveData::Claim { claims } => claims,
            _ => &[],
        }
    }

    /// Invocation gas, zero for other types.
    pub fn gas(&self) -> Fixed8 {
        match &self.exclusive {
            ExclusiveData::Invocation { gas, .. } => *gas,
            _ => Fixed8::ZERO,
        }
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        !self.witnesses.is_empty()
    }

    pub(crate) fn ensure_unsigned(&self) -> CoreResult<()> {
        if self.is_signed() {
            Err(CoreError::AlreadySigned)
        } else {
            Ok(())
        }
    }

    pub fn set_version(&mut self, version: u8) -> CoreResult<()> {
        self.ensure_unsigned()?;
        validate_exclusive(version, &self.exclusive)?;
        self.version = version;
        Ok(())
    }

    pub fn add_attribute(&mut self, attribute: TransactionAttribute) -> CoreResult<()> {
        self.ensure_unsigned()?;
        if self.attributes.len() >= MAX_TRANSACTION_ATTRIBUTES {
            return Err(CoreError::TooManyAttributes {
                count: self.attributes.len() + 1,
                max: MAX_TRANSACTION_ATTRIBUTES,
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn add_remark(&mut self, remark: &str) -> CoreResult<()> {
        self.add_attribute(TransactionAttribute::remark(remark)?)
    }

    pub fn add_input(&mut self, input: TransactionInput) -> CoreResult<()> {
        self.ensure_unsigned()?;
        self.inputs.push(input);
        Ok(())
    }

    pub fn add_output(&mut self, output: TransactionOutput) -> CoreResult<()> {
        self.ensure_unsigned()?;
        self.outputs.push(output);
        Ok(())
    }

    /// Drops every witness, making the transaction editable again.
    pub fn clear_witnesses(&mut self) -> Vec<Witness> {
        std::mem::take(&mut self.witnesses)
    }
}

fn validate_exclusive(version: u8, exclusive: &ExclusiveData) -> CoreResult<()> {
    match exclusive {
        ExclusiveData::Claim { claims } if claims.is_empty() => Err(
            CoreError::InvalidTransaction("claim transaction without claims".into()),
        ),
        ExclusiveData::Invocation { script, .. } if script.is_empty() => Err(
            CoreError::InvalidTransaction("empty invocation script".into()),
        ),
        ExclusiveData::Invocation { gas, .. } if gas.is_negative() => Err(
            CoreError::InvalidTransaction(format!("negative invocation gas {gas}")),
        ),
        ExclusiveData::Invocation { gas, .. } if version == 0 && !gas.is_zero() => {
            Err(CoreError::InvalidTransaction(
                "version 0 invocations cannot carry gas".into(),
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UInt160, UInt256, GAS_ASSET};

    #[test]
    fn test_default_versions() {
        assert_eq!(Transaction::contract().version(), 0);
        let claim = Transaction::claim(vec![TransactionInput::new(UInt256::ZERO, 0)]).unwrap();
        assert_eq!(claim.version(), 0);
        assert_eq!(claim.tx_type(), TransactionType::Claim);
        let invocation = Transaction::invocation(vec![0x51], Fixed8::ZERO).unwrap();
        assert_eq!(invocation.version(), 1);
    }

    #[test]
    fn test_exclusive_validation() {
        assert!(Transaction::claim(Vec::new()).is_err());
        assert!(Transaction::invocation(Vec::new(), Fixed8::ZERO).is_err());
        assert!(Transaction::invocation(vec![0x51], Fixed8::from_raw(-1)).is_err());

        let mut invocation = Transaction::invocation(vec![0x51], Fixed8::ONE).unwrap();
        assert!(matches!(
            invocation.set_version(0),
            Err(CoreError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_attribute_limit() {
        let mut tx = Transaction::contract();
        for i in 0..MAX_TRANSACTION_ATTRIBUTES {
            tx.add_remark(&i.to_string()).unwrap();
        }
        assert_eq!(
            tx.add_remark("one too many"),
            Err(CoreError::TooManyAttributes { count: 17, max: 16 })
        );
    }

    #[test]
    fn test_mutation_after_signing_rejected() {
        let mut tx = Transaction::contract();
        tx.add_output(TransactionOutput::new(*GAS_ASSET, Fixed8::ONE, UInt160::ZERO).unwrap())
            .unwrap();
        tx.witnesses.push(Witness::new(vec![0x40], vec![0xac]));

        assert_eq!(tx.add_remark("late"), Err(CoreError::AlreadySigned));
        assert_eq!(
            tx.add_input(TransactionInput::new(UInt256::ZERO, 0)),
            Err(CoreError::AlreadySigned)
        );
        assert_eq!(tx.set_version(1), Err(CoreError::AlreadySigned));

        assert_eq!(tx.clear_witnesses().len(), 1);
        assert!(tx.add_remark("editable again").is_ok());
    }
}
