// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand integration module.
//!
//! This module provides functionality for:
//! - Account addresses and transaction IDs
//! - Building and canonically encoding note-only payment transactions
//! - Talking to algod and the indexer over REST
//! - Waiting for transaction confirmation

pub mod address;
pub mod client;
pub mod confirmation;
pub mod transaction;
pub mod types;

pub use address::{Address, AddressError};
pub use client::{AlgodClient, AlgodError, IndexerClient, NodeApi};
pub use confirmation::{wait_for_confirmation, ConfirmationError, DEFAULT_WAIT_ROUNDS};
pub use transaction::{PaymentTransaction, SignedTransaction, TransactionError, MAX_NOTE_LEN};
pub use types::*;
