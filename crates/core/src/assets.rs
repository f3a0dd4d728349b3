//! The two native UTXO assets and their symbols.

use crate::UInt256;
use once_cell::sync::Lazy;

/// NEO governing token id, display order.
pub const NEO_ASSET_ID: &str = "c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";
/// GAS utility token id, display order.
pub const GAS_ASSET_ID: &str = "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7";

pub static NEO_ASSET: Lazy<UInt256> =
    Lazy::new(|| UInt256::from_hex_str(NEO_ASSET_ID).expect("NEO asset id is valid hex"));

pub static GAS_ASSET: Lazy<UInt256> =
    Lazy::new(|| UInt256::from_hex_str(GAS_ASSET_ID).expect("GAS asset id is valid hex"));

/// Symbol used as the balance key for `id`; unknown assets fall back to their hex id.
pub fn asset_symbol(id: &UInt256) -> String {
    if *id == *NEO_ASSET {
        "NEO".to_string()
    } else if *id == *GAS_ASSET {
        "GAS".to_string()
    } else {
        id.to_hex_string()
    }
}

/// Resolves a symbol (case-insensitive) or a hex id to an asset id.
pub fn asset_id(symbol: &str) -> Option<UInt256> {
    match symbol.to_ascii_uppercase().as_str() {
        "NEO" => Some(*NEO_ASSET),
        "GAS" => Some(*GAS_ASSET),
        _ => UInt256::from_hex_str(symbol).ok(),
    }
}
