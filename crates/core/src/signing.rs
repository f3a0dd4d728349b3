//! Witness creation: single-key signing and multi-signature aggregation.
//!
//! Private keys stay behind the [`Signer`] seam; the core only ever sees a
//! public key and the signatures it produces.

use crate::script::{
    invocation_script, parse_invocation_script, signature_redeem_script, VerificationScript,
};
use crate::transaction::{Transaction, Witness};
use crate::{CoreError, CoreResult, UInt160};
use neo_cryptography::{KeyPair, PublicKey, Signature};
use std::sync::Arc;
use tracing::debug;

/// Signing interface for transaction digests.
pub trait Signer: Send + Sync {
    fn public_key(&self) -> PublicKey;

    /// Signs the SHA-256 digest of an unsigned transaction.
    fn sign_digest(&self, digest: &[u8; 32]) -> CoreResult<Signature>;

    /// Script hash of the signer's single-key account.
    fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&signature_redeem_script(&self.public_key()))
    }

    fn address(&self) -> String {
        self.script_hash().to_address()
    }
}

impl Signer for KeyPair {
    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self)
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> CoreResult<Signature> {
        Ok(self.sign_prehash(digest)?)
    }
}

impl Signer for Box<dyn Signer> {
    fn public_key(&self) -> PublicKey {
        self.as_ref().public_key()
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> CoreResult<Signature> {
        self.as_ref().sign_digest(digest)
    }
}

impl Signer for Arc<dyn Signer> {
    fn public_key(&self) -> PublicKey {
        self.as_ref().public_key()
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> CoreResult<Signature> {
        self.as_ref().sign_digest(digest)
    }
}

/// Adapts an external signing function (hardware wallet, remote signer).
pub struct CallbackSigner<F> {
    public_key: PublicKey,
    callback: F,
}

impl<F> CallbackSigner<F>
where
    F: Fn(&[u8; 32]) -> CoreResult<Signature> + Send + Sync,
{
    pub fn new(public_key: PublicKey, callback: F) -> Self {
        Self {
            public_key,
            callback,
        }
    }
}

impl<F> Signer for CallbackSigner<F>
where
    F: Fn(&[u8; 32]) -> CoreResult<Signature> + Send + Sync,
{
    fn public_key(&self) -> PublicKey {
        self.public_key
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> CoreResult<Signature> {
        (self.callback)(digest)
    }
}

impl Witness {
    /// Single-key witness: `PUSHBYTES64 <sig>` / `PUSHBYTES33 <key> CHECKSIG`.
    pub fn from_signature(signature: &Signature, public_key: &PublicKey) -> Self {
        Self::new(
            invocation_script(std::slice::from_ref(signature)),
            signature_redeem_script(public_key),
        )
    }
}

impl Transaction {
    /// Signs with `signer` and attaches the resulting witness.
    pub fn sign<S: Signer + ?Sized>(&mut self, signer: &S) -> CoreResult<()> {
        let public_key = signer.public_key();
        let signature = signer.sign_digest(&self.signing_digest())?;
        let witness = Witness::from_signature(&signature, &public_key);
        debug!(
            target: "neo",
            tx = %self.hash(),
            signer = %witness.script_hash(),
            "signed transaction"
        );
        self.add_witness(witness)
    }

    /// Like [`Transaction::sign`], but refuses a signer that does not control `expected`.
    pub fn sign_as<S: Signer + ?Sized>(
        &mut self,
        signer: &S,
        expected: &UInt160,
    ) -> CoreResult<()> {
        let actual = signer.script_hash();
        if actual != *expected {
            return Err(CoreError::SignerMismatch {
                expected: *expected,
                actual,
            });
        }
        self.sign(signer)
    }

    /// Attaches a witness, keeping witnesses ordered by script hash.
    pub fn add_witness(&mut self, witness: Witness) -> CoreResult<()> {
        let script_hash = witness.script_hash();
        match self
            .witnesses
            .binary_search_by_key(&script_hash, Witness::script_hash)
        {
            Ok(_) => Err(CoreError::DuplicateWitness(script_hash)),
            Err(pos) => {
                self.witnesses.insert(pos, witness);
                Ok(())
            }
        }
    }

    /// Checks `signature` over this transaction's digest.
    pub fn verify_signature(&self, signature: &Signature, public_key: &PublicKey) -> bool {
        public_key.verify_prehash(&self.signing_digest(), signature)
    }

    /// Checks every attached witness against its own verification script.
    ///
    /// Multi-signature witnesses are matched the way `CHECKMULTISIG` does:
    /// signatures and keys are walked in order, and each key is used once.
    pub fn verify_witnesses(&self) -> bool {
        let digest = self.signing_digest();
        !self.witnesses.is_empty()
            && self.witnesses.iter().all(|witness| {
                let Ok(script) = VerificationScript::parse(&witness.verification_script) else {
                    return false;
                };
                let Ok(signatures) = parse_invocation_script(&witness.invocation_script) else {
                    return false;
                };
                if signatures.len() != script.threshold() {
                    return false;
                }
                let mut keys = script.public_keys().iter();
                signatures.iter().all(|signature| {
                    keys.any(|key| key.verify_prehash(&digest, signature))
                })
            })
    }
}

/// A signature contributed to a multi-signature witness.
#[derive(Debug, Clone)]
pub enum MultiSigInput {
    Signature(Signature),
    /// A single-key witness produced by one of the cosigners.
    Witness(Witness),
}

impl From<Signature> for MultiSigInput {
    fn from(signature: Signature) -> Self {
        Self::Signature(signature)
    }
}

impl From<Witness> for MultiSigInput {
    fn from(witness: Witness) -> Self {
        Self::Witness(witness)
    }
}

/// Aggregates cosigner signatures into the witness of a multi-signature account.
///
/// Signatures may arrive in any order. The invocation script always lists
/// exactly `m` of them, in the order of their keys in `verification_script`.
pub fn build_multisig_witness<I>(
    tx: &Transaction,
    signatures: I,
    verification_script: &[u8],
) -> CoreResult<Witness>
where
    I: IntoIterator,
    I::Item: Into<MultiSigInput>,
{
    let (threshold, public_keys) = match VerificationScript::parse(verification_script)? {
        VerificationScript::MultiSig {
            threshold,
            public_keys,
        } => (threshold, public_keys),
        VerificationScript::Signature(_) => {
            return Err(CoreError::InvalidScript(
                "expected a multi-signature verification script".into(),
            ))
        }
    };

    let digest = tx.signing_digest();
    let mut slots: Vec<Option<Signature>> = vec![None; public_keys.len()];

    for input in signatures {
        let (position, signature) = match input.into() {
            MultiSigInput::Signature(signature) => {
                let position = public_keys
                    .iter()
                    .position(|key| key.verify_prehash(&digest, &signature))
                    .ok_or_else(|| {
                        CoreError::InvalidSignature(format!(
                            "{} does not match any public key",
                            signature.to_hex()
                        ))
                    })?;
                (position, signature)
            }
            MultiSigInput::Witness(witness) => {
                let key = match VerificationScript::parse(&witness.verification_script)? {
                    VerificationScript::Signature(key) => key,
                    VerificationScript::MultiSig { .. } => {
                        return Err(CoreError::InvalidScript(
                            "cosigner witness must carry exactly one public key".into(),
                        ))
                    }
                };
                let position = public_keys.iter().position(|k| *k == key).ok_or_else(|| {
                    CoreError::InvalidSignature(format!("public key {key} is not a cosigner"))
                })?;
                let pushed = parse_invocation_script(&witness.invocation_script)?;
                let signature = match pushed.as_slice() {
                    [signature] => *signature,
                    _ => {
                        return Err(CoreError::InvalidScript(
                            "cosigner witness must carry exactly one signature".into(),
                        ))
                    }
                };
                if !key.verify_prehash(&digest, &signature) {
                    return Err(CoreError::InvalidSignature(format!(
                        "signature from {key} does not verify"
                    )));
                }
                (position, signature)
            }
        };

        if slots[position].is_some() {
            return Err(CoreError::DuplicateSignature(public_keys[position].to_hex()));
        }
        slots[position] = Some(signature);
    }

    let ordered: Vec<Signature> = slots.into_iter().flatten().collect();
    if ordered.len() < threshold {
        return Err(CoreError::InsufficientSignatures {
            required: threshold,
            found: ordered.len(),
        });
    }

    debug!(
        target: "neo",
        tx = %tx.hash(),
        threshold,
        collected = ordered.len(),
        "aggregated multi-signature witness"
    );
    Ok(Witness::new(
        invocation_script(&ordered[..threshold]),
        verification_script.to_vec(),
    ))
}
