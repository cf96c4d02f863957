//! Bridger configuration.

use crate::constants::{BASE_SEPOLIA_PUBLIC_RPC_URL, DEFAULT_RETRYABLE_GAS_LIMIT};
use alloy::primitives::{address, Address, ChainId};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};
use url::Url;

/// Bridger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Name of the source network all bridge transactions are sent on.
    #[serde(default = "default_source")]
    pub source: String,
    /// Network topology, keyed by network name.
    pub networks: HashMap<String, NetworkConfig>,
    /// Retryable ticket bridge configuration.
    #[serde(default)]
    pub arbitrum: RetryableTicketConfig,
    /// Standard bridge configuration.
    #[serde(default)]
    pub base: StandardBridgeConfig,
    /// Multiplier applied to the configured top-level gas limit.
    #[serde(default = "default_gas_multiplier")]
    pub gas_multiplier: f64,
}

impl BridgeConfig {
    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the configuration for a network, if it is known.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let networks = HashMap::from([
            (
                "ethereum-sepolia".to_string(),
                NetworkConfig {
                    rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".parse().unwrap(),
                    chain_id: 11155111,
                    explorer_tx_url: Some("https://sepolia.etherscan.io/tx/".to_string()),
                },
            ),
            (
                "arbitrum-sepolia".to_string(),
                NetworkConfig {
                    rpc_url: "https://arbitrum-sepolia-rpc.publicnode.com".parse().unwrap(),
                    chain_id: 421614,
                    explorer_tx_url: Some("https://sepolia.arbiscan.io/tx/".to_string()),
                },
            ),
            (
                "base-sepolia".to_string(),
                NetworkConfig {
                    rpc_url: BASE_SEPOLIA_PUBLIC_RPC_URL.parse().unwrap(),
                    chain_id: 84532,
                    explorer_tx_url: None,
                },
            ),
        ]);

        Self {
            source: default_source(),
            networks,
            arbitrum: RetryableTicketConfig::default(),
            base: StandardBridgeConfig::default(),
            gas_multiplier: default_gas_multiplier(),
        }
    }
}

/// A single network endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint of the network.
    pub rpc_url: Url,
    /// Chain ID of the network.
    pub chain_id: ChainId,
    /// Explorer URL prefix transaction hashes are appended to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_tx_url: Option<String>,
}

/// Configuration for the retryable ticket bridge into Arbitrum Sepolia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryableTicketConfig {
    /// Address of the inbox contract on the source chain.
    pub inbox: Address,
    /// Top-level gas limit for the ticket submission.
    pub default_gas_limit: u64,
}

impl Default for RetryableTicketConfig {
    fn default() -> Self {
        Self {
            inbox: address!("aae29b0366299461418f5324a79afc425be5ae21"),
            default_gas_limit: DEFAULT_RETRYABLE_GAS_LIMIT,
        }
    }
}

/// Configuration for the standard bridge into Base Sepolia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardBridgeConfig {
    /// Address of the L1 standard bridge contract on the source chain.
    pub bridge: Address,
}

impl Default for StandardBridgeConfig {
    fn default() -> Self {
        Self { bridge: address!("fd0bf71f60660e2f608ed56e1659c450eb113120") }
    }
}

fn default_source() -> String {
    "ethereum-sepolia".to_string()
}

fn default_gas_multiplier() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let config = BridgeConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: BridgeConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.source, config.source);
        assert_eq!(parsed.arbitrum.inbox, config.arbitrum.inbox);
        assert_eq!(parsed.base.bridge, config.base.bridge);
        assert_eq!(parsed.networks.len(), config.networks.len());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let s = r#"
networks:
  ethereum-sepolia:
    rpc_url: "http://localhost:8545"
    chain_id: 11155111
"#;
        let config: BridgeConfig = serde_yaml::from_str(s).unwrap();
        assert_eq!(config.source, "ethereum-sepolia");
        assert_eq!(config.gas_multiplier, 1.0);
        assert_eq!(config.arbitrum.default_gas_limit, DEFAULT_RETRYABLE_GAS_LIMIT);
    }

    #[test]
    fn known_network_is_resolvable() {
        let config = BridgeConfig::default();
        assert_eq!(config.network("ethereum-sepolia").unwrap().chain_id, 11155111);
        assert!(config.network("mainnet").is_none());
    }
}
