// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod aggregator;
pub mod decoder;
pub mod fetcher;
pub mod logging;
pub mod normalizer;
pub mod output;
pub mod source;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_fixtures;

use config::AggregatorConfig;
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub registry: types::AggregatedRegistry,
    pub networks_fetched: usize,
    pub output_path: PathBuf,
}

/// Fetch every configured network, fold them in configured order and write the
/// result.
pub async fn run(config: &AggregatorConfig) -> Result<RunSummary, output::OutputError> {
    let fetched = fetcher::fetch_networks(&config.networks, &config.fetch).await;
    let networks_fetched = fetched.len();
    if networks_fetched < config.networks.len() {
        tracing::warn!(
            requested = config.networks.len(),
            fetched = networks_fetched,
            "Some networks could not be fetched"
        );
    }

    let registry =
        aggregator::aggregate(fetched.into_iter().map(aggregator::NetworkRegistry::into_datasets));
    tracing::info!(
        chains = registry.len(),
        contracts = registry.contract_count(),
        tokens = registry.token_count(),
        "Aggregated registry"
    );

    let output_path = output::write_registry(&registry, &config.output).await?;

    Ok(RunSummary {
        registry,
        networks_fetched,
        output_path,
    })
}
