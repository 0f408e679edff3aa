// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record builders shared by unit tests.

use crate::aggregator::NetworkRegistry;
use crate::types::{ChainId, ChainRecord, ContractAddress, ContractRecord, TokenRecord};

pub fn chain(id: u64, active: bool) -> ChainRecord {
    ChainRecord {
        active,
        chain_id: ChainId(id),
        gas_token_address: format!("0xgas{}", id),
        registry_address: format!("0xregistry{}", id),
    }
}

pub fn contract(chain_id: u64, contract_type: &str, address: &str) -> ContractRecord {
    ContractRecord {
        active: true,
        address: ContractAddress::Decoded(address.to_string()),
        contract_type: contract_type.to_string(),
        chain_id: ChainId(chain_id),
    }
}

pub fn token(address: &str, origin_chain_id: u64, symbol: &str) -> TokenRecord {
    TokenRecord {
        active: true,
        address: address.to_string(),
        symbol: symbol.to_string(),
        origin_chain_id: ChainId(origin_chain_id),
        origin_address: String::new(),
        coin_type: "gas".to_string(),
        decimals: 18,
    }
}

pub fn network(
    name: &str,
    chains: Vec<ChainRecord>,
    contracts: Vec<ContractRecord>,
    tokens: Vec<TokenRecord>,
) -> NetworkRegistry {
    NetworkRegistry {
        network: name.to_string(),
        chains,
        contracts,
        tokens,
    }
}
