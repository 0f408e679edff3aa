// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod chain_id;
mod records;
mod registry;

pub use chain_id::{ChainId, MAX_SAFE_INTEGER};
pub use records::{ChainDataset, ChainRecord, ContractAddress, ContractRecord, TokenRecord};
pub use registry::AggregatedRegistry;
