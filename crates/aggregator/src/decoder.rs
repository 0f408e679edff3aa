// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of registry address bytes into chain-native address strings.
//!
//! The registry stores every foreign address as an opaque byte string. How those
//! bytes map to a readable address depends on the family of the chain the
//! address lives on:
//! - EVM chains store the 20-byte address, possibly right-aligned in a 32-byte word
//! - Bitcoin and Solana store the textual address (base58/bech32) as ASCII bytes
//!
//! Decoding never fails: unknown chains fall back to the EVM rules and payloads
//! that cannot be decoded are returned unchanged.

use crate::types::ChainId;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Canonical EVM zero address.
pub const EVM_ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Number of hex digits in a 20-byte EVM address.
const EVM_ADDRESS_HEX_LEN: usize = 40;

/// Address encoding convention of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    Evm,
    Bitcoin,
    Solana,
}

lazy_static! {
    static ref CHAIN_FAMILIES: HashMap<ChainId, ChainFamily> = {
        use ChainFamily::*;
        [
            (1, Evm),       // Ethereum
            (56, Evm),      // BNB Smart Chain
            (137, Evm),     // Polygon
            (8453, Evm),    // Base
            (42161, Evm),   // Arbitrum One
            (43114, Evm),   // Avalanche C-Chain
            (7000, Evm),    // ZetaChain mainnet
            (7001, Evm),    // ZetaChain testnet
            (8332, Bitcoin),
            (18332, Bitcoin), // testnet
            (900, Solana),
            (901, Solana), // devnet
        ]
        .into_iter()
        .map(|(id, family)| (ChainId(id), family))
        .collect()
    };
}

impl ChainFamily {
    /// Family of `chain_id`. Chains missing from the table are treated as EVM.
    pub fn of(chain_id: ChainId) -> Self {
        CHAIN_FAMILIES
            .get(&chain_id)
            .copied()
            .unwrap_or(ChainFamily::Evm)
    }

    /// What an all-zero payload decodes to.
    pub fn zero_address(self) -> &'static str {
        match self {
            ChainFamily::Evm => EVM_ZERO_ADDRESS,
            ChainFamily::Bitcoin | ChainFamily::Solana => "",
        }
    }

    /// Decode a non-zero payload with this family's rules.
    pub fn decode(self, raw: &str) -> String {
        match self {
            ChainFamily::Evm => decode_evm_address(raw),
            ChainFamily::Bitcoin | ChainFamily::Solana => decode_textual_address(raw, self),
        }
    }
}

/// Decode `raw` (0x-prefixed hex) into the address format of `chain_id`'s family.
///
/// - empty input decodes to an empty string
/// - an all-zero payload of any length decodes to the family's zero address
/// - otherwise the family specific decoder is used
pub fn decode_address(raw: &str, chain_id: ChainId) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let family = ChainFamily::of(chain_id);
    if is_zero_address(raw) {
        return family.zero_address().to_string();
    }

    family.decode(raw)
}

/// True for `0x`, and for any run of `0` digits with or without the prefix.
pub fn is_zero_address(raw: &str) -> bool {
    strip_hex_prefix(raw).chars().all(|c| c == '0')
}

/// Normalize an EVM address payload to `0x` + 40 lowercase hex digits.
///
/// 40 digits are kept as-is, 64 digits (an address right-aligned in a 32-byte
/// word) keep the low-order 20 bytes, shorter payloads are left-padded and
/// longer ones truncated to their last 40 digits.
pub fn decode_evm_address(raw: &str) -> String {
    let hex = strip_hex_prefix(raw).to_ascii_lowercase();
    let len = hex.chars().count();

    let digits = match len {
        EVM_ADDRESS_HEX_LEN => hex,
        64 => last_chars(&hex, EVM_ADDRESS_HEX_LEN),
        n if n < EVM_ADDRESS_HEX_LEN => format!("{:0>40}", hex),
        _ => last_chars(&hex, EVM_ADDRESS_HEX_LEN),
    };

    format!("0x{}", digits)
}

/// Decode a payload holding the ASCII text of an address.
///
/// Bytes are read as 7-bit ASCII. Malformed hex returns `raw` unchanged.
pub fn decode_textual_address(raw: &str, family: ChainFamily) -> String {
    let payload = strip_hex_prefix(raw);
    if payload.is_empty() {
        return String::new();
    }

    match hex::decode(payload) {
        Ok(bytes) => bytes.iter().map(|b| char::from(b & 0x7f)).collect(),
        Err(e) => {
            tracing::warn!(
                raw_address = %raw,
                family = ?family,
                error = %e,
                "Failed to decode address bytes, keeping raw value"
            );
            raw.to_string()
        }
    }
}

fn strip_hex_prefix(raw: &str) -> &str {
    raw.strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw)
}

fn last_chars(s: &str, n: usize) -> String {
    let skip = s.chars().count().saturating_sub(n);
    s.chars().skip(skip).collect()
}
