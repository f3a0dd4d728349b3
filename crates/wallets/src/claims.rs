//! Claimable GAS reported by a data provider.

use neo_config::NetworkType;
use neo_core::{Fixed8, TransactionInput, UInt256};
use serde::{Deserialize, Serialize};

/// A spent NEO output whose generated GAS has not been claimed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItem {
    /// GAS claimable from this output.
    pub claim: Fixed8,
    pub txid: UInt256,
    pub index: u16,
    /// NEO held by the output.
    pub value: Fixed8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl ClaimItem {
    /// The claim reference written into a claim transaction.
    #[inline]
    pub fn reference(&self) -> TransactionInput {
        TransactionInput::new(self.txid, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub address: String,
    #[serde(default)]
    pub net: NetworkType,
    #[serde(default)]
    pub claims: Vec<ClaimItem>,
}

impl Claims {
    pub fn new(address: impl Into<String>, net: NetworkType, claims: Vec<ClaimItem>) -> Self {
        Self {
            address: address.into(),
            net,
            claims,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_from_provider_json() {
        let json = r#"{
            "address": "AceQbAj2xuFLiH5hQAHMnV39wtmjUKiVRj",
            "net": "TestNet",
            "claims": [{
                "claim": 0.0123,
                "txid": "0102030405060708091011121314151617181920212223242526272829303132",
                "index": 1,
                "value": "5",
                "start": 100,
                "end": 200
            }]
        }"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.net, NetworkType::TestNet);
        let item = &claims.claims[0];
        assert_eq!(item.claim, "0.0123".parse().unwrap());
        assert_eq!(item.value, Fixed8::from_integer(5).unwrap());
        assert_eq!(item.reference().prev_index, 1);
        assert_eq!(item.end, Some(200));
    }
}
