// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{RawRow, RegistrySource, RowCategory, SourceError};
use config::NetworkConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Registry rows captured in a JSON file, one file per network:
///
/// ```json
/// {
///   "chainId": 7001,
///   "registryAddress": "0x7CCE3Eb018bf23e1FE2a32692f2C77592D110394",
///   "chains": [ { "active": true, "chainId": 1, "gasZRC20": "0x..", "registry": "0x" } ],
///   "contracts": [ { "active": true, "addressBytes": "0x..", "contractType": "gateway", "chainId": 1 } ],
///   "tokens": [ { "active": true, "address_": "0x..", "symbol": "ETH.ETH", "originChainId": 1,
///                 "originAddress": "0x", "coinType": "gas", "decimals": 18 } ]
/// }
/// ```
///
/// `chainId` and `registryAddress` are optional; when present they must match
/// the configured network.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    document: serde_json::Map<String, Value>,
}

impl SnapshotSource {
    /// `<dir>/<network key>.json`
    pub fn path_for(dir: impl AsRef<Path>, network: &NetworkConfig) -> PathBuf {
        dir.as_ref().join(format!("{}.json", network.key))
    }

    /// Read and check the snapshot of `network` stored in `dir`.
    pub async fn open(dir: impl AsRef<Path>, network: &NetworkConfig) -> Result<Self, SourceError> {
        let path = Self::path_for(dir, network);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| SourceError::Json {
            path: path.display().to_string(),
            source,
        })?;

        let snapshot = Self::from_value(path, value)?;
        snapshot.verify(network)?;
        Ok(snapshot)
    }

    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self, SourceError> {
        let path = path.into();
        match value {
            Value::Object(document) => Ok(Self { path, document }),
            _ => Err(SourceError::NotAnObject(path.display().to_string())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn verify(&self, network: &NetworkConfig) -> Result<(), SourceError> {
        if let Some(chain_id) = self.document.get("chainId").filter(|v| !v.is_null()) {
            let matches = match chain_id {
                Value::Number(n) => n.as_u64() == Some(network.chain_id),
                Value::String(s) => s.trim().parse::<u64>().ok() == Some(network.chain_id),
                _ => false,
            };
            if !matches {
                return Err(SourceError::ChainMismatch {
                    expected: network.chain_id,
                    found: chain_id.to_string(),
                });
            }
        }

        if let Some(registry) = self.document.get("registryAddress").and_then(Value::as_str) {
            if !registry.eq_ignore_ascii_case(&network.registry_address) {
                return Err(SourceError::RegistryMismatch {
                    expected: network.registry_address.clone(),
                    found: registry.to_string(),
                });
            }
        }

        Ok(())
    }

    fn rows(&self, category: RowCategory) -> Result<Vec<RawRow>, SourceError> {
        let items = match self.document.get(category.key()) {
            None | Some(Value::Null) => return Err(SourceError::MissingCategory(category)),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(SourceError::MalformedCategory {
                    category,
                    reason: format!("expected an array, got {}", json_kind(other)),
                });
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(row) => Ok(row.clone()),
                other => Err(SourceError::MalformedCategory {
                    category,
                    reason: format!("row {} is {}, expected an object", index, json_kind(other)),
                }),
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RegistrySource for SnapshotSource {
    async fn fetch_chains(&self) -> Result<Vec<RawRow>, SourceError> {
        self.rows(RowCategory::Chains)
    }

    async fn fetch_contracts(&self) -> Result<Vec<RawRow>, SourceError> {
        self.rows(RowCategory::Contracts)
    }

    async fn fetch_tokens(&self) -> Result<Vec<RawRow>, SourceError> {
        self.rows(RowCategory::Tokens)
    }
}
