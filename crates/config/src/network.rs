use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Address of the registry contract on both public ZetaChain deployments.
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0x7CCE3Eb018bf23e1FE2a32692f2C77592D110394";

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Unsupported network: {requested}. Supported networks: {supported}")]
    Unsupported { requested: String, supported: String },

    #[error("Duplicate network key: {0}")]
    DuplicateKey(String),

    #[error("Network key cannot be empty")]
    EmptyKey,

    #[error("Invalid RPC URL '{url}' for network '{key}': {reason}")]
    InvalidRpcUrl {
        key: String,
        url: String,
        reason: String,
    },

    #[error("Invalid registry address '{address}' for network '{key}'")]
    InvalidRegistryAddress { key: String, address: String },
}

/// One deployment of the registry contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Short identifier used on the command line and for snapshot file names
    pub key: String,

    /// Human readable name used in logs
    pub name: String,

    /// Chain id of the chain hosting the registry
    pub chain_id: u64,

    /// JSON-RPC endpoint of the hosting chain
    pub rpc_url: String,

    /// Registry contract address on the hosting chain
    pub registry_address: String,
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.key.trim().is_empty() {
            return Err(NetworkError::EmptyKey);
        }

        let parsed = url::Url::parse(&self.rpc_url).map_err(|e| NetworkError::InvalidRpcUrl {
            key: self.key.clone(),
            url: self.rpc_url.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" | "ws" | "wss" => {}
            scheme => {
                return Err(NetworkError::InvalidRpcUrl {
                    key: self.key.clone(),
                    url: self.rpc_url.clone(),
                    reason: format!(
                        "scheme '{}' must be http://, https://, ws:// or wss://",
                        scheme
                    ),
                });
            }
        }

        if !is_evm_address(&self.registry_address) {
            return Err(NetworkError::InvalidRegistryAddress {
                key: self.key.clone(),
                address: self.registry_address.clone(),
            });
        }

        Ok(())
    }
}

fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// The public deployments that are always available.
pub fn builtin_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig {
            key: "testnet".to_string(),
            name: "ZetaChain Testnet".to_string(),
            chain_id: 7001,
            rpc_url: "https://zetachain-athens-evm.blockpi.network/v1/rpc/public".to_string(),
            registry_address: DEFAULT_REGISTRY_ADDRESS.to_string(),
        },
        NetworkConfig {
            key: "mainnet".to_string(),
            name: "ZetaChain Mainnet".to_string(),
            chain_id: 7000,
            rpc_url: "https://zetachain-evm.blockpi.network/v1/rpc/public".to_string(),
            registry_address: DEFAULT_REGISTRY_ADDRESS.to_string(),
        },
    ]
}

/// Known networks: the built-ins followed by any user supplied extras.
#[derive(Debug, Clone)]
pub struct NetworkTable {
    networks: Vec<NetworkConfig>,
}

impl NetworkTable {
    pub fn with_extras(extras: Vec<NetworkConfig>) -> Result<Self, NetworkError> {
        let mut networks = builtin_networks();
        networks.extend(extras);

        let mut seen = HashSet::new();
        for network in &networks {
            network.validate()?;
            if !seen.insert(network.key.as_str()) {
                return Err(NetworkError::DuplicateKey(network.key.clone()));
            }
        }

        Ok(Self { networks })
    }

    pub fn keys(&self) -> Vec<&str> {
        self.networks.iter().map(|n| n.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Result<&NetworkConfig, NetworkError> {
        self.networks
            .iter()
            .find(|n| n.key == key)
            .ok_or_else(|| NetworkError::Unsupported {
                requested: key.to_string(),
                supported: self.keys().join(", "),
            })
    }

    /// Resolve `keys` in the given order. Order matters: it is the fold order
    /// used when merging network results.
    pub fn select(&self, keys: &[String]) -> Result<Vec<NetworkConfig>, NetworkError> {
        let mut seen = HashSet::new();
        keys.iter()
            .map(|key| {
                let key = key.trim();
                if !seen.insert(key) {
                    return Err(NetworkError::DuplicateKey(key.to_string()));
                }
                self.get(key).cloned()
            })
            .collect()
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self {
            networks: builtin_networks(),
        }
    }
}
