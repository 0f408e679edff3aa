// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Where raw registry rows come from.

mod snapshot;

pub use snapshot::SnapshotSource;

use serde_json::Value;
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// One row as returned by the registry: a JSON object keyed by ABI field name.
pub type RawRow = serde_json::Map<String, Value>;

/// The three record categories a registry exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowCategory {
    Chains,
    Contracts,
    Tokens,
}

impl RowCategory {
    /// Key of the category in a snapshot document.
    pub fn key(self) -> &'static str {
        match self {
            RowCategory::Chains => "chains",
            RowCategory::Contracts => "contracts",
            RowCategory::Tokens => "tokens",
        }
    }
}

impl fmt::Display for RowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read registry snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse registry snapshot '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Registry snapshot '{0}' is not a JSON object")]
    NotAnObject(String),

    #[error("Registry snapshot belongs to chain {found}, expected {expected}")]
    ChainMismatch { expected: u64, found: String },

    #[error("Registry snapshot was taken from {found}, expected {expected}")]
    RegistryMismatch { expected: String, found: String },

    #[error("Category '{0}' is missing")]
    MissingCategory(RowCategory),

    #[error("Category '{category}' is malformed: {reason}")]
    MalformedCategory {
        category: RowCategory,
        reason: String,
    },
}

/// Supplies the raw rows of one registry deployment.
///
/// Each category is fetched independently; a failure in one must not prevent
/// the others from being read.
pub trait RegistrySource: Send + Sync {
    fn fetch_chains(&self) -> impl Future<Output = Result<Vec<RawRow>, SourceError>> + Send;

    fn fetch_contracts(&self) -> impl Future<Output = Result<Vec<RawRow>, SourceError>> + Send;

    fn fetch_tokens(&self) -> impl Future<Output = Result<Vec<RawRow>, SourceError>> + Send;
}
