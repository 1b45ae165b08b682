// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # On-Chain Payment-Method Log
//!
//! Payment-method additions are recorded as zero-value self-transfers whose
//! note carries a [`LogRecord`]. The only durable trace is the transaction
//! itself; nothing is stored locally.
//!
//! ## Flow
//!
//! 1. Serialize the record to compact JSON
//! 2. Build the note-only transaction from suggested network parameters
//! 3. Have the wallet session's signer sign it
//! 4. Submit it to the node
//! 5. Wait a bounded number of rounds for confirmation
//! 6. Return the transaction ID

pub mod logger;
pub mod record;

pub use logger::{LoggedPaymentMethod, NoteReceipt, PaymentMethodLogger, TransactionLogger};
pub use record::LogRecord;

use crate::algorand::{AlgodError, ConfirmationError, TransactionError};
use crate::wallet::WalletError;

/// Errors from a single logging attempt.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Note serialization failed: {0}")]
    Note(#[from] serde_json::Error),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Node(#[from] AlgodError),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),

    #[error("Signer returned {0} transactions, expected 1")]
    UnexpectedSignerOutput(usize),
}
