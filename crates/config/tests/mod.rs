//! Configuration loading tests.

use neo_config::{ConfigError, NetworkType, ToolkitConfig};

#[test]
fn test_empty_document_uses_defaults() {
    let config = ToolkitConfig::from_toml_str("").unwrap();
    assert_eq!(config, ToolkitConfig::default());
    assert_eq!(config.network, NetworkType::MainNet);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_sections_override_defaults() {
    let config = ToolkitConfig::from_toml_str(
        r#"
        network = "TestNet"

        [protocol]
        max_claims_per_transaction = 50

        [logging]
        level = "debug"
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.network, NetworkType::TestNet);
    assert_eq!(config.protocol.max_claims_per_transaction, 50);
    assert_eq!(config.protocol.address_version, 0x17);
    assert_eq!(config.logging.format, "json");
    assert!(config.logging.active);
}

#[test]
fn test_invalid_documents_are_rejected() {
    assert!(matches!(
        ToolkitConfig::from_toml_str("network = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ToolkitConfig::from_toml_str("[protocol]\nmax_transaction_attributes = 99"),
        Err(ConfigError::InvalidSetting { .. })
    ));
}

#[test]
fn test_network_type_json_roundtrip() {
    let json = serde_json::to_string(&NetworkType::TestNet).unwrap();
    assert_eq!(json, "\"TestNet\"");
    let parsed: NetworkType = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, NetworkType::TestNet);
    assert_eq!(NetworkType::TestNet.to_string(), "TestNet");
}
