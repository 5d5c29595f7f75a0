//! Static map from network identifier to endpoint and chain ID.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::blockchain::types::{ChainId, NetworkId};
use crate::config::schema::NetworkConfig;

/// A configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub id: NetworkId,
    pub rpc_url: String,
    pub failover_urls: Vec<String>,
    pub chain_id: ChainId,
    pub symbol: String,
    pub rpc_timeout_secs: u64,
}

impl From<&NetworkConfig> for Network {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            id: config.id,
            rpc_url: config.rpc_url.clone(),
            failover_urls: config.failover_urls.clone(),
            chain_id: ChainId(config.chain_id),
            symbol: config
                .symbol
                .clone()
                .unwrap_or_else(|| config.id.default_symbol().to_string()),
            rpc_timeout_secs: config.rpc_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),
}

/// Read-only registry populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: BTreeMap<NetworkId, Network>,
}

impl NetworkRegistry {
    pub fn new(networks: impl IntoIterator<Item = Network>) -> Self {
        Self {
            networks: networks.into_iter().map(|n| (n.id, n)).collect(),
        }
    }

    pub fn from_config(configs: &[NetworkConfig]) -> Self {
        Self::new(configs.iter().map(Network::from))
    }

    /// Look up a configured network.
    pub fn resolve(&self, id: NetworkId) -> Result<&Network, RegistryError> {
        self.networks
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownNetwork(id.to_string()))
    }

    /// Look up a network named by free text from the chat layer.
    pub fn resolve_str(&self, name: &str) -> Result<&Network, RegistryError> {
        let id: NetworkId = name
            .parse()
            .map_err(|_| RegistryError::UnknownNetwork(name.trim().to_string()))?;
        self.resolve(id)
    }

    /// Configured networks in identifier order.
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
