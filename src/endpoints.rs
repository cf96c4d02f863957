//! Per-network RPC client pool.

use crate::{
    config::{BridgeConfig, NetworkConfig},
    error::BridgeError,
};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::collections::HashMap;
use tracing::debug;

/// Lazily creates and caches one provider per configured network.
///
/// A handle is created on first reference, probed for liveness once, and then
/// shared for the lifetime of the process. A dead connection is never
/// refreshed; callers treat connectivity failures as attempt-scoped.
#[derive(Debug)]
pub struct EndpointPool {
    networks: HashMap<String, NetworkConfig>,
    clients: HashMap<String, DynProvider>,
}

impl EndpointPool {
    /// Creates an empty pool over the configured network topology.
    pub fn new(config: &BridgeConfig) -> Self {
        Self { networks: config.networks.clone(), clients: HashMap::new() }
    }

    /// Creates a pool with pre-connected clients.
    #[cfg(test)]
    pub(crate) fn with_clients(
        config: &BridgeConfig,
        clients: HashMap<String, DynProvider>,
    ) -> Self {
        Self { networks: config.networks.clone(), clients }
    }

    /// Returns the provider for a network, connecting on first use.
    pub async fn get(&mut self, name: &str) -> Result<DynProvider, BridgeError> {
        if let Some(client) = self.clients.get(name) {
            return Ok(client.clone());
        }

        let network = self.networks.get(name).ok_or_else(|| BridgeError::Connectivity {
            network: name.to_string(),
            message: "no RPC endpoint configured".to_string(),
        })?;

        let provider = ProviderBuilder::new().connect_http(network.rpc_url.clone()).erased();

        // Liveness probe. A provider that cannot answer eth_chainId is not
        // worth caching.
        let chain_id =
            provider.get_chain_id().await.map_err(|err| BridgeError::Connectivity {
                network: name.to_string(),
                message: err.to_string(),
            })?;
        debug!(network = name, chain_id, "connected to endpoint");

        self.clients.insert(name.to_string(), provider.clone());
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;

    #[tokio::test]
    async fn unknown_network_is_a_connectivity_error() {
        let mut pool = EndpointPool::new(&BridgeConfig::default());
        let err = pool.get("mainnet").await.unwrap_err();
        assert!(matches!(err, BridgeError::Connectivity { network, .. } if network == "mainnet"));
    }

    #[tokio::test]
    async fn preconnected_client_is_reused_without_a_probe() {
        let asserter = alloy::transports::mock::Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter).erased();

        let config = BridgeConfig::default();
        let mut pool = EndpointPool::with_clients(
            &config,
            HashMap::from([("ethereum-sepolia".to_string(), provider)]),
        );

        // No responses are queued, so any RPC call would fail. The cached
        // handle must come back without one.
        pool.get("ethereum-sepolia").await.unwrap();
        pool.get("ethereum-sepolia").await.unwrap();
    }
}
