//! Network settings used when deploying or testing the FundMe contract.
//!
//! Public networks are keyed by chain id and carry the ETH/USD price feed
//! the contract is pointed at. Development networks have no feed of their
//! own; a `MockV3Aggregator` is deployed there instead, seeded with
//! [`DECIMALS`] and [`INITIAL_ANSWER`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Networks that run against a local simulated chain.
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// Fixed-point precision of the mock price feed.
pub const DECIMALS: u32 = 8;

/// Initial mock answer: 2000 USD per unit.
pub const INITIAL_ANSWER: i128 = 2000 * 10i128.pow(DECIMALS);

/// Environment variable naming the active network.
pub const NETWORK_ENV: &str = "NETWORK";

/// Network assumed when [`NETWORK_ENV`] is unset.
pub const DEFAULT_NETWORK: &str = "hardhat";

/// Errors raised while resolving or checking network settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No entry exists for the chain id
    #[error("no network config for chain id {0}")]
    UnknownChain(u32),

    /// The price feed address is not a 20-byte hex address
    #[error("chain {chain_id}: invalid price feed address {address:?}")]
    InvalidAddress { chain_id: u32, address: String },

    /// The network name is empty
    #[error("chain {0}: network name is empty")]
    EmptyName(u32),

    /// The table could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Deployment settings for one public network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub eth_usd_price_feed: &'static str,
}

/// The chain id table, built on first use.
pub fn network_config() -> &'static BTreeMap<u32, NetworkConfig> {
    static TABLE: OnceLock<BTreeMap<u32, NetworkConfig>> = OnceLock::new();
    TABLE.get_or_init(|| {
        BTreeMap::from([
            (
                11155111,
                NetworkConfig {
                    name: "sepolia",
                    eth_usd_price_feed: "0x694AA1769357215DE4FAC081bf1f309aDC325306",
                },
            ),
            (
                137,
                NetworkConfig {
                    name: "polygon",
                    eth_usd_price_feed: "0xF9680D99D6C9589e2a93a78A04A279e509205945",
                },
            ),
        ])
    })
}

/// Looks up a chain id. Unknown ids yield `None`.
pub fn lookup(chain_id: u32) -> Option<&'static NetworkConfig> {
    let entry = network_config().get(&chain_id);
    debug!(chain_id, found = entry.is_some(), "network config lookup");
    entry
}

/// Like [`lookup`], but a miss is an error.
pub fn require(chain_id: u32) -> Result<&'static NetworkConfig, ConfigError> {
    lookup(chain_id).ok_or(ConfigError::UnknownChain(chain_id))
}

/// The ETH/USD price feed configured for a chain id.
pub fn eth_usd_price_feed(chain_id: u32) -> Option<&'static str> {
    lookup(chain_id).map(|config| config.eth_usd_price_feed)
}

/// Checks every entry: non-empty name and a `0x`-prefixed 20-byte hex address.
pub fn validate() -> Result<(), ConfigError> {
    for (&chain_id, config) in network_config() {
        if config.name.is_empty() {
            return Err(ConfigError::EmptyName(chain_id));
        }
        if !is_hex_address(config.eth_usd_price_feed) {
            return Err(ConfigError::InvalidAddress {
                chain_id,
                address: config.eth_usd_price_feed.to_string(),
            });
        }
    }
    Ok(())
}

/// Dumps the table as JSON, keyed by chain id.
pub fn to_json() -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(network_config())?)
}

/// Whether `address` is `0x` followed by exactly 40 hex digits.
pub fn is_hex_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Whether `name` is a local simulated network.
pub fn is_development_chain(name: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&name)
}

/// The active network name, from [`NETWORK_ENV`] or [`DEFAULT_NETWORK`].
pub fn active_network() -> String {
    std::env::var(NETWORK_ENV).unwrap_or_else(|_| DEFAULT_NETWORK.to_string())
}

/// Whether the active network is a development chain.
///
/// Evaluated once per process; suites that need the mock price feed check
/// this before registering.
pub fn on_development_chain() -> bool {
    static GATE: OnceLock<bool> = OnceLock::new();
    *GATE.get_or_init(|| {
        let network = active_network();
        let development = is_development_chain(&network);
        if !development {
            info!(network = %network, "not a development chain, mock-backed suites are skipped");
        }
        development
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_entries_are_well_formed() {
        assert!(validate().is_ok());
        for config in network_config().values() {
            assert!(!config.name.is_empty());
            assert!(is_hex_address(config.eth_usd_price_feed));
        }
    }

    #[test]
    fn test_lookup_known_chains() {
        let sepolia = lookup(11155111).unwrap();
        assert_eq!(sepolia.name, "sepolia");
        assert_eq!(
            sepolia.eth_usd_price_feed,
            "0x694AA1769357215DE4FAC081bf1f309aDC325306"
        );

        assert_eq!(
            eth_usd_price_feed(137),
            Some("0xF9680D99D6C9589e2a93a78A04A279e509205945")
        );
        assert_eq!(network_config().len(), 2);
    }

    #[test]
    fn test_unknown_chain_is_absent() {
        assert!(lookup(31337).is_none());
        assert!(eth_usd_price_feed(1).is_none());
        assert!(matches!(require(31337), Err(ConfigError::UnknownChain(31337))));
    }

    #[test]
    fn test_development_chains_are_exact() {
        assert!(is_development_chain("hardhat"));
        assert!(is_development_chain("localhost"));
        assert!(!is_development_chain("sepolia"));
        assert!(!is_development_chain("Hardhat"));
        assert!(!is_development_chain(""));
    }

    #[test]
    fn test_hex_address_format() {
        assert!(is_hex_address("0x0000000000000000000000000000000000000000"));
        assert!(!is_hex_address("694AA1769357215DE4FAC081bf1f309aDC325306"));
        assert!(!is_hex_address("0x694AA1769357215DE4FAC081bf1f309aDC32530"));
        assert!(!is_hex_address("0x694AA1769357215DE4FAC081bf1f309aDC32530g"));
    }

    #[test]
    fn test_mock_parameters() {
        assert_eq!(DECIMALS, 8);
        assert_eq!(INITIAL_ANSWER, 200_000_000_000);
    }

    #[test]
    fn test_json_dump_is_keyed_by_chain_id() {
        let json = to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["137"]["name"], "polygon");
        assert_eq!(
            value["11155111"]["eth_usd_price_feed"],
            "0x694AA1769357215DE4FAC081bf1f309aDC325306"
        );
    }

    proptest! {
        #[test]
        fn prop_other_names_are_not_development(name in "[a-zA-Z0-9_-]{0,16}") {
            prop_assume!(name != "hardhat" && name != "localhost");
            prop_assert!(!is_development_chain(&name));
        }

        #[test]
        fn prop_unlisted_chain_ids_miss(chain_id in any::<u32>()) {
            prop_assume!(chain_id != 137 && chain_id != 11155111);
            prop_assert!(lookup(chain_id).is_none());
        }
    }
}
