// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-network merge of registry records.
//!
//! Aggregation runs in two passes:
//! 1. [`NetworkAggregator::fold`] merges each network's chain-keyed data into
//!    the running map, in network order. Active chain records win over inactive
//!    ones, contracts and tokens are deduplicated first-seen-wins.
//! 2. [`NetworkAggregator::finish`] makes sure every chain referenced by a
//!    contract or token has an entry, synthesizing an inactive chain record
//!    where no network published one.

use crate::types::{
    AggregatedRegistry, ChainDataset, ChainId, ChainRecord, ContractRecord, TokenRecord,
};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Normalized records of one network, as fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    pub network: String,
    pub chains: Vec<ChainRecord>,
    pub contracts: Vec<ContractRecord>,
    pub tokens: Vec<TokenRecord>,
}

/// Data about one chain from a single network. `chain_info` is `None` when
/// the network only references the chain from contracts or tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialChainDataset {
    pub chain_info: Option<ChainRecord>,
    pub contracts: Vec<ContractRecord>,
    pub tokens: Vec<TokenRecord>,
}

/// One network's records keyed by chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDatasets {
    pub network: String,
    pub chains: BTreeMap<ChainId, PartialChainDataset>,
}

impl NetworkRegistry {
    /// Group records by chain: chain records by their id, contracts by the
    /// chain they are deployed on, tokens by their origin chain.
    pub fn into_datasets(self) -> NetworkDatasets {
        let mut chains: BTreeMap<ChainId, PartialChainDataset> = BTreeMap::new();

        for chain in self.chains {
            let entry = chains.entry(chain.chain_id).or_default();
            merge_chain_info(&mut entry.chain_info, Some(chain));
        }

        for contract in self.contracts {
            let entry = chains.entry(contract.chain_id).or_default();
            append_unique_contracts(&mut entry.contracts, [contract]);
        }

        for token in self.tokens {
            let entry = chains.entry(token.origin_chain_id).or_default();
            append_unique_tokens(&mut entry.tokens, [token]);
        }

        NetworkDatasets {
            network: self.network,
            chains,
        }
    }
}

impl NetworkDatasets {
    /// Treat an already aggregated registry as the output of a single network.
    pub fn from_registry(network: impl Into<String>, registry: AggregatedRegistry) -> Self {
        let chains = registry
            .into_iter()
            .map(|(chain_id, dataset)| {
                (
                    chain_id,
                    PartialChainDataset {
                        chain_info: Some(dataset.chain_info),
                        contracts: dataset.contracts,
                        tokens: dataset.tokens,
                    },
                )
            })
            .collect();

        Self {
            network: network.into(),
            chains,
        }
    }
}

/// Running state of an aggregation.
///
/// `fold` needs `&mut self`, so folds are serialized by construction: network
/// order decides which record wins a tie.
#[derive(Debug, Default)]
pub struct NetworkAggregator {
    running: BTreeMap<ChainId, PartialChainDataset>,
    networks_folded: usize,
}

impl NetworkAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn networks_folded(&self) -> usize {
        self.networks_folded
    }

    /// Merge one network into the running map.
    pub fn fold(&mut self, incoming: NetworkDatasets) {
        let mut inserted = 0usize;
        let mut merged = 0usize;

        for (chain_id, dataset) in incoming.chains {
            match self.running.entry(chain_id) {
                Entry::Vacant(slot) => {
                    slot.insert(dataset);
                    inserted += 1;
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    merge_chain_info(&mut existing.chain_info, dataset.chain_info);
                    append_unique_contracts(&mut existing.contracts, dataset.contracts);
                    append_unique_tokens(&mut existing.tokens, dataset.tokens);
                    merged += 1;
                }
            }
        }

        self.networks_folded += 1;
        tracing::debug!(
            network = %incoming.network,
            inserted,
            merged,
            "Folded network into registry"
        );
    }

    /// Reconcile dangling references and produce the final registry.
    pub fn finish(mut self) -> AggregatedRegistry {
        let referenced: BTreeSet<ChainId> = self
            .running
            .values()
            .flat_map(|dataset| {
                dataset
                    .contracts
                    .iter()
                    .map(|c| c.chain_id)
                    .chain(dataset.tokens.iter().map(|t| t.origin_chain_id))
            })
            .collect();

        for chain_id in referenced {
            self.running.entry(chain_id).or_default();
        }

        let mut synthesized = 0usize;
        let datasets: BTreeMap<ChainId, ChainDataset> = self
            .running
            .into_iter()
            .map(|(chain_id, partial)| {
                let chain_info = partial.chain_info.unwrap_or_else(|| {
                    synthesized += 1;
                    ChainRecord::placeholder(chain_id)
                });
                (
                    chain_id,
                    ChainDataset {
                        chain_info,
                        contracts: partial.contracts,
                        tokens: partial.tokens,
                    },
                )
            })
            .collect();

        if synthesized > 0 {
            tracing::debug!(
                synthesized,
                "Added inactive chain records for chains only referenced by contracts or tokens"
            );
        }

        AggregatedRegistry::from(datasets)
    }
}

/// Fold `networks` in order and reconcile the result.
pub fn aggregate(networks: impl IntoIterator<Item = NetworkDatasets>) -> AggregatedRegistry {
    let mut aggregator = NetworkAggregator::new();
    for network in networks {
        aggregator.fold(network);
    }
    aggregator.finish()
}

/// An incoming record replaces the running one when it is active or when the
/// running one is inactive.
pub fn merge_chain_info(running: &mut Option<ChainRecord>, incoming: Option<ChainRecord>) {
    let Some(incoming) = incoming else {
        return;
    };

    let keep_running = matches!(running, Some(current) if current.active && !incoming.active);
    if !keep_running {
        *running = Some(incoming);
    }
}

/// Append contracts whose `(chain_id, contract_type)` is not present yet.
pub fn append_unique_contracts(
    existing: &mut Vec<ContractRecord>,
    incoming: impl IntoIterator<Item = ContractRecord>,
) {
    let mut seen: HashSet<(ChainId, String)> = existing
        .iter()
        .map(|c| {
            let (chain_id, contract_type) = c.key();
            (chain_id, contract_type.to_string())
        })
        .collect();

    for contract in incoming {
        let (chain_id, contract_type) = contract.key();
        if seen.insert((chain_id, contract_type.to_string())) {
            existing.push(contract);
        }
    }
}

/// Append tokens whose address is not present yet.
pub fn append_unique_tokens(
    existing: &mut Vec<TokenRecord>,
    incoming: impl IntoIterator<Item = TokenRecord>,
) {
    let mut seen: HashSet<String> = existing.iter().map(|t| t.key().to_string()).collect();

    for token in incoming {
        if seen.insert(token.key().to_string()) {
            existing.push(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{chain, contract, network, token};
    use crate::types::ContractAddress;

    #[test]
    fn test_active_chain_record_wins() {
        let a = network("mainnet", vec![chain(7000, false)], vec![], vec![]);
        let b = network("testnet", vec![chain(7000, true)], vec![], vec![]);

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        let info = &registry.get(ChainId(7000)).unwrap().chain_info;
        assert!(info.active);
        assert_eq!(info.registry_address, "0xregistry7000");
    }

    #[test]
    fn test_inactive_does_not_replace_active() {
        let mut active = chain(7000, true);
        active.gas_token_address = "0xfirst".to_string();
        let mut inactive = chain(7000, false);
        inactive.gas_token_address = "0xsecond".to_string();

        let mut running = Some(active.clone());
        merge_chain_info(&mut running, Some(inactive));
        assert_eq!(running, Some(active));
    }

    #[test]
    fn test_merge_chain_info_equal_activity_takes_incoming() {
        let mut first = chain(1, true);
        first.gas_token_address = "0xfirst".to_string();
        let mut second = chain(1, true);
        second.gas_token_address = "0xsecond".to_string();

        let mut running = Some(first);
        merge_chain_info(&mut running, Some(second.clone()));
        assert_eq!(running, Some(second));
    }

    #[test]
    fn test_merge_chain_info_fills_missing() {
        let mut running = None;
        merge_chain_info(&mut running, None);
        assert_eq!(running, None);

        merge_chain_info(&mut running, Some(chain(56, false)));
        assert_eq!(running, Some(chain(56, false)));

        merge_chain_info(&mut running, None);
        assert_eq!(running, Some(chain(56, false)));
    }

    #[test]
    fn test_contract_first_seen_wins() {
        let from_a = contract(1, "Gateway", "0x00000000000000000000000000000000000000aa");
        let from_b = contract(1, "Gateway", "0x00000000000000000000000000000000000000bb");

        let a = network("a", vec![chain(1, true)], vec![from_a.clone()], vec![]);
        let b = network("b", vec![chain(1, true)], vec![from_b], vec![]);

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        assert_eq!(registry.get(ChainId(1)).unwrap().contracts, vec![from_a]);
    }

    #[test]
    fn test_contracts_with_distinct_types_are_appended_in_order() {
        let a = network(
            "a",
            vec![chain(1, true)],
            vec![contract(1, "gateway", "0x01")],
            vec![],
        );
        let b = network(
            "b",
            vec![chain(1, true)],
            vec![contract(1, "erc20Custody", "0x02"), contract(1, "gateway", "0x03")],
            vec![],
        );

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        let types: Vec<_> = registry
            .get(ChainId(1))
            .unwrap()
            .contracts
            .iter()
            .map(|c| c.contract_type.as_str())
            .collect();
        assert_eq!(types, vec!["gateway", "erc20Custody"]);
    }

    #[test]
    fn test_append_unique_matches_record_keys() {
        let mut contracts = vec![contract(1, "gateway", "0x01")];
        let mut same_key = contract(1, "gateway", "0x02");
        same_key.active = false;
        append_unique_contracts(
            &mut contracts,
            [same_key, contract(56, "gateway", "0x03")],
        );
        let keys: Vec<_> = contracts.iter().map(ContractRecord::key).collect();
        assert_eq!(keys, vec![(ChainId(1), "gateway"), (ChainId(56), "gateway")]);

        let mut tokens = vec![token("0xT", 1, "A")];
        append_unique_tokens(&mut tokens, [token("0xT", 56, "B"), token("0xU", 1, "C")]);
        let keys: Vec<_> = tokens.iter().map(TokenRecord::key).collect();
        assert_eq!(keys, vec!["0xT", "0xU"]);
    }

    #[test]
    fn test_token_deduplicated_by_address() {
        let t = token("0xToken", 1, "ETH.ETH");
        let mut t_again = t.clone();
        t_again.symbol = "ETH.OTHER".to_string();

        let a = network("a", vec![chain(1, true)], vec![], vec![t.clone()]);
        let b = network("b", vec![chain(1, true)], vec![], vec![t_again]);

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        assert_eq!(registry.get(ChainId(1)).unwrap().tokens, vec![t]);
    }

    #[test]
    fn test_dedup_within_one_network() {
        let registry = network(
            "a",
            vec![],
            vec![contract(1, "gateway", "0x01"), contract(1, "gateway", "0x02")],
            vec![token("0xT", 1, "A"), token("0xT", 1, "B")],
        );

        let datasets = registry.into_datasets();
        let entry = &datasets.chains[&ChainId(1)];
        assert_eq!(entry.contracts.len(), 1);
        assert_eq!(entry.contracts[0].address, ContractAddress::Decoded("0x01".to_string()));
        assert_eq!(entry.tokens.len(), 1);
        assert_eq!(entry.tokens[0].symbol, "A");
        assert!(entry.chain_info.is_none());
    }

    #[test]
    fn test_contract_for_unknown_chain_gets_placeholder() {
        let c = contract(999, "gateway", "0x01");
        let a = network("a", vec![chain(7000, true)], vec![c.clone()], vec![]);

        let registry = aggregate([a.into_datasets()]);
        let entry = registry.get(ChainId(999)).unwrap();
        assert_eq!(entry.chain_info, ChainRecord::placeholder(ChainId(999)));
        assert_eq!(entry.contracts, vec![c]);
        assert!(entry.tokens.is_empty());
    }

    #[test]
    fn test_token_origin_chain_gets_entry() {
        let t = token("0xBTC", 8332, "BTC.BTC");
        let a = network("a", vec![chain(7000, true)], vec![], vec![t.clone()]);

        let registry = aggregate([a.into_datasets()]);
        let entry = registry.get(ChainId(8332)).unwrap();
        assert!(!entry.chain_info.active);
        assert_eq!(entry.tokens, vec![t]);
    }

    #[test]
    fn test_placeholder_replaced_by_later_network_record() {
        let a = network("a", vec![], vec![contract(56, "gateway", "0x01")], vec![]);
        let b = network("b", vec![chain(56, false)], vec![], vec![]);

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        let entry = registry.get(ChainId(56)).unwrap();
        assert_eq!(entry.chain_info, chain(56, false));
        assert_eq!(entry.contracts.len(), 1);
    }

    #[test]
    fn test_reconcile_covers_misplaced_references() {
        let mut dataset = ChainDataset::new(chain(7000, true));
        dataset.contracts.push(contract(5, "gateway", "0x01"));
        let registry: AggregatedRegistry = [dataset].into_iter().collect();

        let result = aggregate([NetworkDatasets::from_registry("a", registry)]);
        assert!(result.contains(ChainId(5)));
        assert!(!result.get(ChainId(5)).unwrap().chain_info.active);
        assert_eq!(result.get(ChainId(7000)).unwrap().contracts.len(), 1);
    }

    #[test]
    fn test_every_referenced_chain_has_one_entry() {
        let a = network(
            "a",
            vec![chain(7000, true), chain(1, true)],
            vec![contract(1, "gateway", "0x01"), contract(137, "gateway", "0x02")],
            vec![token("0xA", 900, "SOL.SOL"), token("0xB", 1, "ETH.ETH")],
        );
        let b = network(
            "b",
            vec![chain(7001, true)],
            vec![contract(8453, "gateway", "0x03")],
            vec![token("0xC", 8332, "BTC.BTC")],
        );

        let registry = aggregate([a.into_datasets(), b.into_datasets()]);
        let ids: Vec<u64> = registry.chain_ids().map(ChainId::get).collect();
        assert_eq!(ids, vec![1, 137, 900, 7000, 7001, 8332, 8453]);
    }

    #[test]
    fn test_aggregating_same_network_twice_is_idempotent() {
        let a = network(
            "a",
            vec![chain(7000, true), chain(1, false)],
            vec![contract(1, "gateway", "0x01"), contract(999, "tss", "0x02")],
            vec![token("0xA", 1, "ETH.ETH"), token("0xB", 8332, "BTC.BTC")],
        );

        let once = aggregate([a.clone().into_datasets()]);
        let twice = aggregate([a.clone().into_datasets(), a.into_datasets()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_network_order_decides_winner() {
        let a = network("a", vec![], vec![contract(1, "gateway", "0xaa")], vec![]);
        let b = network("b", vec![], vec![contract(1, "gateway", "0xbb")], vec![]);

        let ab = aggregate([a.clone().into_datasets(), b.clone().into_datasets()]);
        let ba = aggregate([b.into_datasets(), a.into_datasets()]);
        assert_eq!(ab.get(ChainId(1)).unwrap().contracts[0].address.as_str(), "0xaa");
        assert_eq!(ba.get(ChainId(1)).unwrap().contracts[0].address.as_str(), "0xbb");
    }

    #[test]
    fn test_fold_counts_networks() {
        let mut aggregator = NetworkAggregator::new();
        aggregator.fold(NetworkDatasets::default());
        aggregator.fold(NetworkDatasets::default());
        assert_eq!(aggregator.networks_folded(), 2);
        assert!(aggregator.finish().is_empty());
    }
}
