// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetching and normalizing the records of each configured network.

use crate::aggregator::NetworkRegistry;
use crate::normalizer::RecordNormalizer;
use crate::source::{RawRow, RegistrySource, RowCategory, SnapshotSource, SourceError};
use crate::utils::run_with_concurrency;
use config::{FetchConfig, NetworkConfig};
use tracing::Instrument;

/// Reads one network's registry through a [`RegistrySource`].
#[derive(Debug, Clone)]
pub struct RegistryFetcher<S> {
    network: NetworkConfig,
    source: S,
    normalizer: RecordNormalizer,
}

impl<S: RegistrySource> RegistryFetcher<S> {
    pub fn new(network: NetworkConfig, source: S, normalizer: RecordNormalizer) -> Self {
        Self {
            network,
            source,
            normalizer,
        }
    }

    /// Fetch the three categories concurrently and normalize them.
    ///
    /// A category that cannot be read is logged and treated as empty; the other
    /// categories are unaffected.
    pub async fn fetch(&self) -> NetworkRegistry {
        tracing::info!(
            network = %self.network.key,
            chain_id = self.network.chain_id,
            rpc_url = %self.network.rpc_url,
            registry = %self.network.registry_address,
            "Fetching registry data"
        );

        let (chains, contracts, tokens) = futures::join!(
            self.source.fetch_chains(),
            self.source.fetch_contracts(),
            self.source.fetch_tokens()
        );

        let chains = self.normalizer.chains(self.rows_or_empty(RowCategory::Chains, chains));
        let contracts = self
            .normalizer
            .contracts(self.rows_or_empty(RowCategory::Contracts, contracts));
        let tokens = self.normalizer.tokens(self.rows_or_empty(RowCategory::Tokens, tokens));

        tracing::info!(
            network = %self.network.key,
            chains = chains.len(),
            contracts = contracts.len(),
            tokens = tokens.len(),
            "Fetched registry data"
        );

        NetworkRegistry {
            network: self.network.key.clone(),
            chains,
            contracts,
            tokens,
        }
    }

    fn rows_or_empty(
        &self,
        category: RowCategory,
        result: Result<Vec<RawRow>, SourceError>,
    ) -> Vec<RawRow> {
        result.unwrap_or_else(|e| {
            tracing::error!(
                network = %self.network.key,
                %category,
                error = %e,
                "Failed to fetch registry category, using empty list"
            );
            Vec::new()
        })
    }
}

/// Fetch every network from its snapshot in `config.snapshot_dir`.
///
/// At most `config.max_concurrent` networks are fetched at once. Results keep
/// the order of `networks`; a network whose snapshot cannot be opened is logged
/// and left out.
pub async fn fetch_networks(
    networks: &[NetworkConfig],
    config: &FetchConfig,
) -> Vec<NetworkRegistry> {
    let normalizer = RecordNormalizer::new(config.decode_addresses);

    let tasks = networks.iter().map(|network| {
        let span = tracing::info_span!("network", key = %network.key);
        async move {
            let source = match SnapshotSource::open(&config.snapshot_dir, network).await {
                Ok(source) => source,
                Err(e) => {
                    tracing::error!(error = %e, "Skipping network");
                    return None;
                }
            };
            tracing::debug!(path = %source.path().display(), "Opened registry snapshot");

            let fetcher = RegistryFetcher::new(network.clone(), source, normalizer);
            Some(fetcher.fetch().await)
        }
        .instrument(span)
    });

    run_with_concurrency(config.max_concurrent, tasks)
        .await
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::builtin_networks;
    use serde_json::{Value, json};

    /// In-memory source; `None` makes the category fail.
    struct StaticSource {
        chains: Option<Value>,
        contracts: Option<Value>,
        tokens: Option<Value>,
    }

    fn rows(category: RowCategory, value: &Option<Value>) -> Result<Vec<RawRow>, SourceError> {
        let Some(Value::Array(items)) = value else {
            return Err(SourceError::MissingCategory(category));
        };
        Ok(items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect())
    }

    impl RegistrySource for StaticSource {
        async fn fetch_chains(&self) -> Result<Vec<RawRow>, SourceError> {
            rows(RowCategory::Chains, &self.chains)
        }

        async fn fetch_contracts(&self) -> Result<Vec<RawRow>, SourceError> {
            rows(RowCategory::Contracts, &self.contracts)
        }

        async fn fetch_tokens(&self) -> Result<Vec<RawRow>, SourceError> {
            rows(RowCategory::Tokens, &self.tokens)
        }
    }

    fn network(key: &str) -> NetworkConfig {
        builtin_networks()
            .into_iter()
            .find(|n| n.key == key)
            .unwrap()
    }

    fn chains() -> Value {
        json!([
            { "active": true, "chainId": 1, "gasZRC20": "0xAbC", "registry": "0x" },
            { "active": false, "chainId": 8332, "gasZRC20": "0x", "registry": "0x" }
        ])
    }

    fn contracts() -> Value {
        json!([{
            "active": true,
            "addressBytes": "0x48B9AaCC350b20147001f88821d31731Ba4C30ed",
            "contractType": "gateway",
            "chainId": 1
        }])
    }

    #[tokio::test]
    async fn test_fetch_normalizes_all_categories() {
        let source = StaticSource {
            chains: Some(chains()),
            contracts: Some(contracts()),
            tokens: Some(json!([{
                "active": true,
                "address_": "0xzrc20",
                "symbol": "BTC.BTC",
                "originChainId": 8332,
                "originAddress": "0x",
                "coinType": "gas",
                "decimals": 8
            }])),
        };

        let fetcher = RegistryFetcher::new(network("testnet"), source, RecordNormalizer::default());
        let registry = fetcher.fetch().await;

        assert_eq!(registry.network, "testnet");
        assert_eq!(registry.chains.len(), 2);
        assert_eq!(
            registry.contracts[0].address.as_str(),
            "0x48b9aacc350b20147001f88821d31731ba4c30ed"
        );
        assert_eq!(registry.tokens[0].symbol, "BTC.BTC");
        assert_eq!(registry.tokens[0].origin_address, "");
    }

    #[tokio::test]
    async fn test_failed_category_is_empty() {
        let source = StaticSource {
            chains: Some(chains()),
            contracts: None,
            tokens: None,
        };

        let fetcher = RegistryFetcher::new(network("mainnet"), source, RecordNormalizer::default());
        let registry = fetcher.fetch().await;

        assert_eq!(registry.chains.len(), 2);
        assert!(registry.contracts.is_empty());
        assert!(registry.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_networks_skips_missing_snapshot_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = |chain_id: u64| {
            json!({
                "chainId": chain_id,
                "chains": [{ "active": true, "chainId": chain_id }],
                "contracts": [],
                "tokens": []
            })
            .to_string()
        };
        std::fs::write(dir.path().join("mainnet.json"), snapshot(7000)).unwrap();
        std::fs::write(dir.path().join("testnet.json"), snapshot(7001)).unwrap();

        let mut missing = network("testnet");
        missing.key = "devnet".to_string();

        let networks = vec![network("mainnet"), missing, network("testnet")];
        let config = FetchConfig {
            snapshot_dir: dir.path().display().to_string(),
            max_concurrent: 2,
            decode_addresses: true,
        };

        let fetched = fetch_networks(&networks, &config).await;
        let keys: Vec<&str> = fetched.iter().map(|r| r.network.as_str()).collect();
        assert_eq!(keys, vec!["mainnet", "testnet"]);
        assert_eq!(fetched[1].chains[0].chain_id.get(), 7001);
    }

    #[tokio::test]
    async fn test_fetch_networks_without_decoding() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("testnet.json"),
            json!({ "chains": [], "contracts": contracts(), "tokens": [] }).to_string(),
        )
        .unwrap();

        let config = FetchConfig {
            snapshot_dir: dir.path().display().to_string(),
            max_concurrent: 1,
            decode_addresses: false,
        };

        let fetched = fetch_networks(&[network("testnet")], &config).await;
        assert_eq!(
            fetched[0].contracts[0].address.as_str(),
            "0x48B9AaCC350b20147001f88821d31731Ba4C30ed"
        );
        assert!(matches!(
            fetched[0].contracts[0].address,
            crate::types::ContractAddress::Raw(_)
        ));
    }
}
