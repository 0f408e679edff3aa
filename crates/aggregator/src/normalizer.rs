// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversion of raw registry rows into typed records.
//!
//! Rows come from the data source as loosely typed JSON objects. Every field is
//! coerced the way the registry client library presents contract return values:
//! integers may arrive as numbers, decimal strings or hex strings, byte fields as
//! hex strings or byte arrays.

use crate::decoder::decode_address;
use crate::source::RawRow;
use crate::types::{ChainId, ChainRecord, ContractAddress, ContractRecord, TokenRecord};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid integer in field '{field}': {value}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Invalid boolean in field '{field}': {value}")]
    InvalidBool { field: &'static str, value: String },

    #[error("Invalid byte string in field '{field}': {value}")]
    InvalidBytes { field: &'static str, value: String },

    #[error("Value {value} of field '{field}' is out of range")]
    OutOfRange { field: &'static str, value: u64 },
}

/// Turns raw rows into [`ChainRecord`]s, [`ContractRecord`]s and [`TokenRecord`]s.
///
/// Rows that cannot be coerced are skipped with a warning so that one bad row
/// never hides the rest of its category.
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer {
    decode_addresses: bool,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecordNormalizer {
    /// With `decode_addresses` off, contract addresses keep their raw hex payload.
    pub fn new(decode_addresses: bool) -> Self {
        Self { decode_addresses }
    }

    pub fn chains(&self, rows: Vec<RawRow>) -> Vec<ChainRecord> {
        normalize_all(rows, "chain", |row| self.chain(row))
    }

    pub fn contracts(&self, rows: Vec<RawRow>) -> Vec<ContractRecord> {
        normalize_all(rows, "contract", |row| self.contract(row))
    }

    pub fn tokens(&self, rows: Vec<RawRow>) -> Vec<TokenRecord> {
        normalize_all(rows, "token", |row| self.token(row))
    }

    /// Chain rows are already EVM-style registry data: no family-aware decoding.
    pub fn chain(&self, row: &RawRow) -> Result<ChainRecord, RowError> {
        Ok(ChainRecord {
            active: bool_field(row, "active")?,
            chain_id: chain_id_field(row, "chainId")?,
            gas_token_address: normalize_hex(&bytes_field(row, "gasZRC20")?),
            registry_address: normalize_hex(&bytes_field(row, "registry")?),
        })
    }

    /// The address is decoded with the contract's own chain id, not the chain
    /// hosting the registry.
    pub fn contract(&self, row: &RawRow) -> Result<ContractRecord, RowError> {
        let chain_id = chain_id_field(row, "chainId")?;
        let raw = bytes_field(row, "addressBytes")?;

        let address = if self.decode_addresses {
            ContractAddress::Decoded(decode_address(&raw, chain_id))
        } else {
            ContractAddress::Raw(raw)
        };

        Ok(ContractRecord {
            active: bool_field(row, "active")?,
            address,
            contract_type: string_field(row, "contractType"),
            chain_id,
        })
    }

    /// Only the origin address is foreign; the token's own address is native to
    /// the hosting chain and kept as returned.
    pub fn token(&self, row: &RawRow) -> Result<TokenRecord, RowError> {
        let origin_chain_id = chain_id_field(row, "originChainId")?;
        let origin_raw = bytes_field(row, "originAddress")?;

        let decimals = u64_field(row, "decimals")?;
        let decimals = u8::try_from(decimals).map_err(|_| RowError::OutOfRange {
            field: "decimals",
            value: decimals,
        })?;

        Ok(TokenRecord {
            active: bool_field(row, "active")?,
            address: string_field(row, "address_"),
            symbol: string_field(row, "symbol"),
            origin_chain_id,
            origin_address: decode_address(&origin_raw, origin_chain_id),
            coin_type: string_field(row, "coinType"),
            decimals,
        })
    }
}

fn normalize_all<T>(
    rows: Vec<RawRow>,
    kind: &'static str,
    f: impl Fn(&RawRow) -> Result<T, RowError>,
) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match f(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "Skipping malformed registry row");
                None
            }
        })
        .collect()
}

fn present<'a>(row: &'a RawRow, field: &'static str) -> Option<&'a Value> {
    row.get(field).filter(|v| !v.is_null())
}

/// Missing and null read as `false`.
fn bool_field(row: &RawRow, field: &'static str) -> Result<bool, RowError> {
    let Some(value) = present(row, field) else {
        return Ok(false);
    };

    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(RowError::InvalidBool {
                field,
                value: s.clone(),
            }),
        },
        other => Err(RowError::InvalidBool {
            field,
            value: other.to_string(),
        }),
    }
}

/// Integers arrive as JSON numbers, decimal strings or `0x` hex strings.
fn u64_field(row: &RawRow, field: &'static str) -> Result<u64, RowError> {
    let value = present(row, field).ok_or(RowError::MissingField(field))?;
    let invalid = || RowError::InvalidInteger {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n.as_u64().ok_or_else(invalid),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| invalid()),
                None => s.parse::<u64>().map_err(|_| invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

fn chain_id_field(row: &RawRow, field: &'static str) -> Result<ChainId, RowError> {
    u64_field(row, field).map(ChainId)
}

/// Any scalar is accepted; missing and null read as an empty string.
fn string_field(row: &RawRow, field: &'static str) -> String {
    match present(row, field) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Byte fields arrive as hex strings or arrays of byte values. Strings are
/// passed through untouched so the decoder can apply its own fallback rules.
/// A missing field reads as an empty string, an empty array as `0x`.
fn bytes_field(row: &RawRow, field: &'static str) -> Result<String, RowError> {
    match present(row, field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Array(items)) => {
            let bytes = items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| RowError::InvalidBytes {
                            field,
                            value: item.to_string(),
                        })
                })
                .collect::<Result<Vec<u8>, _>>()?;
            Ok(format!("0x{}", hex::encode(bytes)))
        }
        Some(other) => Err(RowError::InvalidBytes {
            field,
            value: other.to_string(),
        }),
    }
}

/// Lowercase well-formed `0x` hex; leave anything else as it is.
fn normalize_hex(value: &str) -> String {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) if digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            format!("0x{}", digits.to_ascii_lowercase())
        }
        _ => value.to_string(),
    }
}
