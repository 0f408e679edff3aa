// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed registry records, as produced by the normalizer and written to the
//! aggregated dataset.

use super::ChainId;
use serde::{Deserialize, Serialize};

/// A chain published by a registry deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    pub active: bool,
    pub chain_id: ChainId,
    pub gas_token_address: String,
    pub registry_address: String,
}

impl ChainRecord {
    /// Stand-in for a chain that is referenced by contracts or tokens but never
    /// published its own chain record.
    pub fn placeholder(chain_id: ChainId) -> Self {
        Self {
            active: false,
            chain_id,
            gas_token_address: String::new(),
            registry_address: String::new(),
        }
    }
}

/// Address of a contract, either decoded for its chain family or kept as the
/// raw hex payload read from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractAddress {
    #[serde(rename = "address")]
    Decoded(String),
    #[serde(rename = "rawAddressBytes")]
    Raw(String),
}

impl ContractAddress {
    pub fn as_str(&self) -> &str {
        match self {
            ContractAddress::Decoded(address) | ContractAddress::Raw(address) => address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub active: bool,
    #[serde(flatten)]
    pub address: ContractAddress,
    pub contract_type: String,
    pub chain_id: ChainId,
}

impl ContractRecord {
    /// Identity used to drop duplicates during merge.
    pub fn key(&self) -> (ChainId, &str) {
        (self.chain_id, self.contract_type.as_str())
    }
}

/// A wrapped token hosted on the registry's chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub active: bool,
    /// Address of the wrapped token on the hosting chain
    pub address: String,
    pub symbol: String,
    pub origin_chain_id: ChainId,
    /// Address of the underlying asset on its origin chain
    pub origin_address: String,
    pub coin_type: String,
    pub decimals: u8,
}

impl TokenRecord {
    /// Identity used to drop duplicates during merge.
    pub fn key(&self) -> &str {
        &self.address
    }
}

/// Everything known about one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDataset {
    pub chain_info: ChainRecord,
    pub contracts: Vec<ContractRecord>,
    pub tokens: Vec<TokenRecord>,
}

impl ChainDataset {
    pub fn new(chain_info: ChainRecord) -> Self {
        Self {
            chain_info,
            contracts: Vec::new(),
            tokens: Vec::new(),
        }
    }
}
