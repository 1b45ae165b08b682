// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand network configuration and node/indexer response types.

use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

use super::transaction::TransactionError;

/// Algorand network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Default algod endpoint
    pub algod_url: &'static str,
    /// Default indexer endpoint
    pub indexer_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

impl NetworkConfig {
    /// Explorer link for a transaction.
    pub fn explorer_tx_url(&self, tx_id: &str) -> String {
        explorer_tx_url(self.explorer_url, tx_id)
    }
}

/// Explorer link for a transaction under `explorer_url`.
pub fn explorer_tx_url(explorer_url: &str, tx_id: &str) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), tx_id)
}

/// Algorand TestNet configuration.
pub const ALGORAND_TESTNET: NetworkConfig = NetworkConfig {
    name: "Algorand TestNet",
    algod_url: "https://testnet-api.nodely.io",
    indexer_url: "https://testnet-idx.nodely.io",
    explorer_url: "https://testnet.algoexplorer.io",
};

/// Algorand MainNet configuration.
pub const ALGORAND_MAINNET: NetworkConfig = NetworkConfig {
    name: "Algorand MainNet",
    algod_url: "https://mainnet-api.nodely.io",
    indexer_url: "https://mainnet-idx.nodely.io",
    explorer_url: "https://algoexplorer.io",
};

/// Network identifier used when none is configured.
pub const NETWORK_TESTNET: &str = "testnet";

/// Network identifier for MainNet.
pub const NETWORK_MAINNET: &str = "mainnet";

/// Resolve a network identifier (`testnet` when absent).
pub fn network_by_name(raw: Option<&str>) -> Result<NetworkConfig, String> {
    let value = raw.unwrap_or(NETWORK_TESTNET).trim().to_ascii_lowercase();
    match value.as_str() {
        NETWORK_TESTNET => Ok(ALGORAND_TESTNET),
        NETWORK_MAINNET => Ok(ALGORAND_MAINNET),
        _ => Err(format!(
            "Unsupported network `{value}`; expected `{NETWORK_TESTNET}` or `{NETWORK_MAINNET}`."
        )),
    }
}

/// Raw `/v2/transactions/params` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    #[serde(default)]
    pub consensus_version: String,
    /// Fee per byte in microAlgos
    pub fee: u64,
    /// Base64-encoded genesis hash
    pub genesis_hash: String,
    pub genesis_id: String,
    pub last_round: u64,
    pub min_fee: u64,
}

/// Parameters used to build a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte, or the absolute fee when `flat_fee` is set
    pub fee: u64,
    pub min_fee: u64,
    pub flat_fee: bool,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
}

/// Rounds a transaction stays valid after its first valid round.
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;

impl TryFrom<TransactionParams> for SuggestedParams {
    type Error = TransactionError;

    fn try_from(params: TransactionParams) -> Result<Self, Self::Error> {
        let decoded = Base64::decode_vec(&params.genesis_hash)
            .map_err(|e| TransactionError::InvalidGenesisHash(e.to_string()))?;
        let genesis_hash: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| TransactionError::InvalidGenesisHash(format!(
                "expected 32 bytes, got {}",
                decoded.len()
            )))?;

        Ok(Self {
            fee: params.fee,
            min_fee: params.min_fee,
            flat_fee: false,
            first_valid: params.last_round,
            last_valid: params.last_round.saturating_add(DEFAULT_VALIDITY_WINDOW),
            genesis_id: params.genesis_id,
            genesis_hash,
        })
    }
}

/// `/v2/status` and `/v2/status/wait-for-block-after/{round}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    pub last_round: u64,
    #[serde(default)]
    pub time_since_last_round: u64,
}

/// `POST /v2/transactions` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// `/v2/transactions/pending/{txid}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransaction {
    /// Round the transaction was confirmed in (absent or 0 while pending)
    #[serde(default)]
    pub confirmed_round: Option<u64>,
    /// Non-empty when the node dropped the transaction from its pool
    #[serde(default)]
    pub pool_error: String,
}

impl PendingTransaction {
    /// Confirmed round, if the transaction has been included in a block.
    pub fn confirmed(&self) -> Option<u64> {
        self.confirmed_round.filter(|round| *round > 0)
    }
}

/// Transaction as returned by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexedTransaction {
    pub id: String,
    #[serde(default)]
    pub confirmed_round: Option<u64>,
    pub sender: String,
    /// Base64-encoded note
    #[serde(default)]
    pub note: Option<String>,
    /// Unix timestamp of the confirming block
    #[serde(default)]
    pub round_time: Option<i64>,
    #[serde(default)]
    pub tx_type: Option<String>,
}

impl IndexedTransaction {
    /// Decoded note bytes, if present and valid base64.
    pub fn note_bytes(&self) -> Option<Vec<u8>> {
        self.note
            .as_deref()
            .and_then(|note| Base64::decode_vec(note).ok())
    }
}

/// Indexer `/v2/transactions/{txid}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerTransactionResponse {
    pub transaction: IndexedTransaction,
    #[serde(default)]
    pub current_round: u64,
}
