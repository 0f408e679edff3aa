// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ChainDataset, ChainId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// The merged, chain-indexed dataset.
///
/// Keys iterate in ascending numeric order and serialize as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedRegistry(BTreeMap<ChainId, ChainDataset>);

impl AggregatedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, chain_id: ChainId) -> Option<&ChainDataset> {
        self.0.get(&chain_id)
    }

    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.0.contains_key(&chain_id)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.0.keys().copied()
    }

    pub fn insert(&mut self, dataset: ChainDataset) -> Option<ChainDataset> {
        self.0.insert(dataset.chain_info.chain_id, dataset)
    }

    pub fn contract_count(&self) -> usize {
        self.0.values().map(|d| d.contracts.len()).sum()
    }

    pub fn token_count(&self) -> usize {
        self.0.values().map(|d| d.tokens.len()).sum()
    }
}

impl From<BTreeMap<ChainId, ChainDataset>> for AggregatedRegistry {
    fn from(map: BTreeMap<ChainId, ChainDataset>) -> Self {
        Self(map)
    }
}

impl FromIterator<ChainDataset> for AggregatedRegistry {
    fn from_iter<I: IntoIterator<Item = ChainDataset>>(iter: I) -> Self {
        let mut registry = Self::new();
        for dataset in iter {
            registry.insert(dataset);
        }
        registry
    }
}

impl IntoIterator for AggregatedRegistry {
    type Item = (ChainId, ChainDataset);
    type IntoIter = btree_map::IntoIter<ChainId, ChainDataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregatedRegistry {
    type Item = (&'a ChainId, &'a ChainDataset);
    type IntoIter = btree_map::Iter<'a, ChainId, ChainDataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChainRecord;

    #[test]
    fn test_serializes_as_chain_id_keyed_object() {
        let registry: AggregatedRegistry = [8332, 1, 7000]
            .into_iter()
            .map(|id| ChainDataset::new(ChainRecord::placeholder(ChainId(id))))
            .collect();

        let json = serde_json::to_value(&registry).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "7000", "8332"]);
        assert_eq!(json["7000"]["chainInfo"]["chainId"], 7000);
        assert!(json["7000"]["contracts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_round_trips_through_json() {
        let registry: AggregatedRegistry = [56, 137]
            .into_iter()
            .map(|id| ChainDataset::new(ChainRecord::placeholder(ChainId(id))))
            .collect();

        let text = serde_json::to_string(&registry).unwrap();
        let back: AggregatedRegistry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, registry);
        assert_eq!(back.chain_ids().collect::<Vec<_>>(), vec![ChainId(56), ChainId(137)]);
    }
}
