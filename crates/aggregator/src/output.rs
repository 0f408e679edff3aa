// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistence of the aggregated registry.

use crate::types::AggregatedRegistry;
use config::OutputConfig;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize aggregated registry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `registry` as pretty-printed JSON to the configured output file,
/// creating the output directory when needed. Returns the written path.
pub async fn write_registry(
    registry: &AggregatedRegistry,
    config: &OutputConfig,
) -> Result<PathBuf, OutputError> {
    let path = config.path();
    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut json = serde_json::to_string_pretty(registry)?;
    json.push('\n');

    tokio::fs::create_dir_all(&config.dir)
        .await
        .map_err(io_error)?;
    tokio::fs::write(&path, json).await.map_err(io_error)?;

    tracing::info!(
        path = %path.display(),
        chains = registry.len(),
        "Wrote aggregated registry"
    );
    Ok(path)
}
