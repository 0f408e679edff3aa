// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use aggregator::logging;
use config::{AggregatorConfig, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = AggregatorConfig::load(&args)?;
    let _guard = logging::init(&config.log)?;

    let keys: Vec<&str> = config.networks.iter().map(|n| n.key.as_str()).collect();
    tracing::info!("Networks: {}", keys.join(", "));
    tracing::info!("Snapshot directory: {}", config.fetch.snapshot_dir);
    tracing::info!("Log level: {}", config.log.level);

    let summary = aggregator::run(&config).await?;
    tracing::info!(
        "Wrote {} chains from {} networks to {}",
        summary.registry.len(),
        summary.networks_fetched,
        summary.output_path.display()
    );

    Ok(())
}
