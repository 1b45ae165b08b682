// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bounded confirmation polling for submitted transactions.

use super::client::{AlgodError, NodeApi};
use super::types::PendingTransaction;

/// Default number of rounds to wait for a transaction to be confirmed.
pub const DEFAULT_WAIT_ROUNDS: u64 = 4;

/// Errors produced while waiting for confirmation.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmationError {
    #[error("Transaction {tx_id} rejected by node: {reason}")]
    Rejected { tx_id: String, reason: String },

    #[error("Transaction {tx_id} not confirmed after {rounds} rounds")]
    Timeout { tx_id: String, rounds: u64 },

    #[error("Node error while waiting for confirmation: {0}")]
    Node(#[from] AlgodError),
}

/// Wait until `tx_id` is confirmed, checking once per round for at most
/// `wait_rounds` rounds.
///
/// A pending-lookup failure does not end the wait (the node may not know the
/// transaction yet); a pool error does.
pub async fn wait_for_confirmation(
    node: &dyn NodeApi,
    tx_id: &str,
    wait_rounds: u64,
) -> Result<PendingTransaction, ConfirmationError> {
    let status = node.status().await?;
    let start_round = status.last_round.saturating_add(1);
    let end_round = start_round.saturating_add(wait_rounds);
    let mut current_round = start_round;

    while current_round < end_round {
        match node.pending_transaction(tx_id).await {
            Ok(pending) => {
                if let Some(round) = pending.confirmed() {
                    tracing::debug!(tx_id, round, "Transaction confirmed");
                    return Ok(pending);
                }
                if !pending.pool_error.is_empty() {
                    return Err(ConfirmationError::Rejected {
                        tx_id: tx_id.to_string(),
                        reason: pending.pool_error,
                    });
                }
            }
            Err(e) => {
                tracing::debug!(tx_id, error = %e, "Pending transaction lookup failed");
            }
        }

        node.status_after_block(current_round).await?;
        current_round += 1;
    }

    Err(ConfirmationError::Timeout {
        tx_id: tx_id.to_string(),
        rounds: wait_rounds,
    })
}
