// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment transaction building and canonical encoding.
//!
//! Transactions are encoded as canonical MessagePack: map keys in sorted
//! order, zero-valued fields omitted, integers in their smallest form and
//! byte strings as `bin`. The field order of the wire structs below is the
//! sorted key order, so `rmp_serde::to_vec_named` produces canonical bytes.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};

use super::address::Address;
use super::types::SuggestedParams;

/// Domain separation prefix for transaction hashing and signing.
const TX_TAG: &[u8] = b"TX";

/// Maximum note size accepted by the network.
pub const MAX_NOTE_LEN: usize = 1024;

/// Bytes a signature adds to an encoded transaction
/// (map header, `sig` key, `bin8` header + 64 bytes, `txn` key).
const SIGNATURE_OVERHEAD: usize = 75;

const PAYMENT_TYPE: &str = "pay";

/// Transaction build, encode and decode errors.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Note too long: {0} bytes (max {MAX_NOTE_LEN})")]
    NoteTooLong(usize),

    #[error("Invalid genesis hash: {0}")]
    InvalidGenesisHash(String),

    #[error("Unsupported transaction type: {0}")]
    UnsupportedType(String),

    #[error("Invalid signature length: {0}")]
    InvalidSignature(usize),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Decoding failed: {0}")]
    Decode(String),
}

/// A payment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTransaction {
    pub sender: Address,
    pub receiver: Address,
    /// Amount in microAlgos
    pub amount: u64,
    /// Absolute fee in microAlgos
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub note: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransactionWire {
    #[serde(rename = "amt", default, skip_serializing_if = "is_zero")]
    amount: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    fee: u64,
    #[serde(rename = "fv", default, skip_serializing_if = "is_zero")]
    first_valid: u64,
    #[serde(rename = "gen", default, skip_serializing_if = "String::is_empty")]
    genesis_id: String,
    #[serde(rename = "gh", with = "serde_bytes")]
    genesis_hash: Vec<u8>,
    #[serde(rename = "lv", default, skip_serializing_if = "is_zero")]
    last_valid: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "serde_bytes")]
    note: Vec<u8>,
    #[serde(
        rename = "rcv",
        default,
        skip_serializing_if = "is_zero_key",
        with = "serde_bytes"
    )]
    receiver: Vec<u8>,
    #[serde(rename = "snd", with = "serde_bytes")]
    sender: Vec<u8>,
    #[serde(rename = "type")]
    tx_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignedTransactionWire {
    #[serde(with = "serde_bytes")]
    sig: Vec<u8>,
    txn: TransactionWire,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_zero_key(value: &Vec<u8>) -> bool {
    value.iter().all(|b| *b == 0)
}

impl PaymentTransaction {
    /// Build a zero-value transfer from `sender` to itself carrying `note`.
    pub fn note_only(
        sender: Address,
        note: Vec<u8>,
        params: &SuggestedParams,
    ) -> Result<Self, TransactionError> {
        if note.len() > MAX_NOTE_LEN {
            return Err(TransactionError::NoteTooLong(note.len()));
        }

        let mut txn = Self {
            sender,
            receiver: sender,
            amount: 0,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            note,
        };

        if !params.flat_fee {
            let per_byte = params.fee;
            let size = txn.estimate_signed_size()? as u64;
            txn.fee = per_byte.saturating_mul(size).max(params.min_fee);
        }

        Ok(txn)
    }

    /// Size of the transaction once a signature is attached.
    pub fn estimate_signed_size(&self) -> Result<usize, TransactionError> {
        Ok(self.encode()?.len() + SIGNATURE_OVERHEAD)
    }

    /// Canonical MessagePack encoding of the unsigned transaction.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        rmp_serde::to_vec_named(&self.to_wire())
            .map_err(|e| TransactionError::Encode(e.to_string()))
    }

    /// Decode an unsigned transaction.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let wire: TransactionWire =
            rmp_serde::from_slice(bytes).map_err(|e| TransactionError::Decode(e.to_string()))?;
        Self::from_wire(wire)
    }

    /// Bytes covered by the sender's signature.
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(prefixed(&self.encode()?))
    }

    /// Transaction ID (base32 of the SHA-512/256 of the tagged encoding).
    pub fn id(&self) -> Result<String, TransactionError> {
        Ok(tx_id_from_encoded(&self.encode()?))
    }

    fn to_wire(&self) -> TransactionWire {
        TransactionWire {
            amount: self.amount,
            fee: self.fee,
            first_valid: self.first_valid,
            genesis_id: self.genesis_id.clone(),
            genesis_hash: self.genesis_hash.to_vec(),
            last_valid: self.last_valid,
            note: self.note.clone(),
            receiver: self.receiver.as_bytes().to_vec(),
            sender: self.sender.as_bytes().to_vec(),
            tx_type: PAYMENT_TYPE.to_string(),
        }
    }

    fn from_wire(wire: TransactionWire) -> Result<Self, TransactionError> {
        if wire.tx_type != PAYMENT_TYPE {
            return Err(TransactionError::UnsupportedType(wire.tx_type));
        }

        let genesis_hash: [u8; 32] = wire.genesis_hash.as_slice().try_into().map_err(|_| {
            TransactionError::InvalidGenesisHash(format!(
                "expected 32 bytes, got {}",
                wire.genesis_hash.len()
            ))
        })?;

        let sender = Address::from_slice(&wire.sender)
            .map_err(|e| TransactionError::Decode(format!("sender: {e}")))?;
        let receiver = if wire.receiver.is_empty() {
            Address::from_public_key([0u8; 32])
        } else {
            Address::from_slice(&wire.receiver)
                .map_err(|e| TransactionError::Decode(format!("receiver: {e}")))?
        };

        Ok(Self {
            sender,
            receiver,
            amount: wire.amount,
            fee: wire.fee,
            first_valid: wire.first_valid,
            last_valid: wire.last_valid,
            genesis_id: wire.genesis_id,
            genesis_hash,
            note: wire.note,
        })
    }
}

/// A transaction with its sender's ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub signature: [u8; 64],
    pub transaction: PaymentTransaction,
}

impl SignedTransaction {
    pub fn new(transaction: PaymentTransaction, signature: &[u8]) -> Result<Self, TransactionError> {
        let signature: [u8; 64] = signature
            .try_into()
            .map_err(|_| TransactionError::InvalidSignature(signature.len()))?;
        Ok(Self {
            signature,
            transaction,
        })
    }

    /// Canonical MessagePack encoding, as submitted to the node.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let wire = SignedTransactionWire {
            sig: self.signature.to_vec(),
            txn: self.transaction.to_wire(),
        };
        rmp_serde::to_vec_named(&wire).map_err(|e| TransactionError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let wire: SignedTransactionWire =
            rmp_serde::from_slice(bytes).map_err(|e| TransactionError::Decode(e.to_string()))?;
        let transaction = PaymentTransaction::from_wire(wire.txn)?;
        Self::new(transaction, &wire.sig)
    }

    /// ID of the underlying transaction.
    pub fn id(&self) -> Result<String, TransactionError> {
        self.transaction.id()
    }
}

fn prefixed(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(TX_TAG.len() + encoded.len());
    out.extend_from_slice(TX_TAG);
    out.extend_from_slice(encoded);
    out
}

/// Transaction ID for an already-encoded unsigned transaction.
pub fn tx_id_from_encoded(encoded: &[u8]) -> String {
    let digest = Sha512_256::digest(prefixed(encoded));
    BASE32_NOPAD.encode(&digest)
}
