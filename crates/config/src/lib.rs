//! Neo Configuration Module
//!
//! Network identity, protocol limits and logging settings shared by every
//! crate of the toolkit. Values default to the legacy NEO MainNet rules and can
//! be overridden from a TOML document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Size of a hash (UInt256) in bytes
pub const HASH_SIZE: usize = 32;
/// Size of a script hash (UInt160) in bytes
pub const ADDRESS_SIZE: usize = 20;
/// Address version byte of legacy NEO addresses (they all start with 'A')
pub const ADDRESS_VERSION: u8 = 0x17;
/// Maximum number of attributes that can be contained within a transaction
pub const MAX_TRANSACTION_ATTRIBUTES: usize = 16;
/// Maximum length of variable attribute data
pub const MAX_ATTRIBUTE_DATA_SIZE: usize = 65535;
/// Maximum claim references accepted in one claim transaction
pub const MAX_CLAIMS_PER_TRANSACTION: usize = 255;
/// Maximum script size in bytes
pub const MAX_SCRIPT_SIZE: usize = 65536;
/// Maximum transaction size in bytes
pub const MAX_TRANSACTION_SIZE: usize = 102_400;

/// Network type for the NEO blockchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NetworkType {
    #[default]
    MainNet,
    TestNet,
    Private,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "MainNet"),
            NetworkType::TestNet => write!(f, "TestNet"),
            NetworkType::Private => write!(f, "Private"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "private" | "privnet" => Ok(NetworkType::Private),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Address version and build-time limits applied by the transaction builders.
///
/// The limits may be tighter than the consensus constants above, never looser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolSettings {
    pub address_version: u8,
    pub max_claims_per_transaction: usize,
    pub max_transaction_attributes: usize,
    pub max_attribute_data_size: usize,
    pub max_script_size: usize,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            address_version: ADDRESS_VERSION,
            max_claims_per_transaction: MAX_CLAIMS_PER_TRANSACTION,
            max_transaction_attributes: MAX_TRANSACTION_ATTRIBUTES,
            max_attribute_data_size: MAX_ATTRIBUTE_DATA_SIZE,
            max_script_size: MAX_SCRIPT_SIZE,
        }
    }
}

impl ProtocolSettings {
    /// Rejects settings a node would never accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_claims_per_transaction == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "max_claims_per_transaction",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_transaction_attributes > MAX_TRANSACTION_ATTRIBUTES {
            return Err(ConfigError::InvalidSetting {
                name: "max_transaction_attributes",
                reason: format!("cannot exceed {MAX_TRANSACTION_ATTRIBUTES}"),
            });
        }
        if self.max_attribute_data_size > MAX_ATTRIBUTE_DATA_SIZE {
            return Err(ConfigError::InvalidSetting {
                name: "max_attribute_data_size",
                reason: format!("cannot exceed {MAX_ATTRIBUTE_DATA_SIZE}"),
            });
        }
        if self.max_script_size > MAX_SCRIPT_SIZE {
            return Err(ConfigError::InvalidSetting {
                name: "max_script_size",
                reason: format!("cannot exceed {MAX_SCRIPT_SIZE}"),
            });
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub active: bool,
    pub level: String,
    /// One of `text`, `json` or `pretty`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            active: true,
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Top level toolkit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub network: NetworkType,
    pub protocol: ProtocolSettings,
    pub logging: LoggingSettings,
}

impl ToolkitConfig {
    /// Parses a TOML document; missing sections fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ToolkitConfig = toml::from_str(source)?;
        config.protocol.validate()?;
        Ok(config)
    }
}
