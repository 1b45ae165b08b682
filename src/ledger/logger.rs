// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note-transaction submission and payment-method logging.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::{LedgerError, LogRecord};
use crate::algorand::{
    explorer_tx_url, wait_for_confirmation, Address, NodeApi, PaymentTransaction,
    DEFAULT_WAIT_ROUNDS,
};
use crate::notify::Notifier;
use crate::wallet::{SessionManager, TransactionSigner};

/// Outcome of a confirmed note transaction.
#[derive(Debug, Clone)]
pub struct NoteReceipt {
    /// ID reported by the node on submission
    pub tx_id: String,
    /// Round the transaction was confirmed in
    pub confirmed_round: u64,
}

/// Builds, signs, submits and confirms note-only transactions.
#[derive(Clone)]
pub struct TransactionLogger {
    node: Arc<dyn NodeApi>,
    wait_rounds: u64,
}

impl TransactionLogger {
    pub fn new(node: Arc<dyn NodeApi>) -> Self {
        Self {
            node,
            wait_rounds: DEFAULT_WAIT_ROUNDS,
        }
    }

    /// Override the number of confirmation rounds to wait.
    pub fn with_wait_rounds(mut self, wait_rounds: u64) -> Self {
        self.wait_rounds = wait_rounds;
        self
    }

    /// Send a zero-value self-transfer carrying `note` and wait for it to
    /// be confirmed.
    pub async fn send_note_transaction(
        &self,
        sender: Address,
        note: Vec<u8>,
        signer: &dyn TransactionSigner,
    ) -> Result<NoteReceipt, LedgerError> {
        let params = self.node.suggested_params().await?;
        let txn = PaymentTransaction::note_only(sender, note, &params)?;
        let expected_id = txn.id()?;

        let mut signed = signer.sign_transactions(&[txn.encode()?]).await?;
        if signed.len() != 1 {
            return Err(LedgerError::UnexpectedSignerOutput(signed.len()));
        }
        let signed = signed.remove(0);

        let tx_id = self.node.send_raw_transaction(&signed).await?;
        if tx_id != expected_id {
            warn!(
                submitted = %tx_id,
                expected = %expected_id,
                "Submitted transaction ID differs from the unsigned transaction"
            );
        }

        let pending = wait_for_confirmation(self.node.as_ref(), &tx_id, self.wait_rounds).await?;
        let confirmed_round = pending.confirmed().unwrap_or_default();

        info!(tx_id = %tx_id, round = confirmed_round, "Note transaction confirmed");
        Ok(NoteReceipt {
            tx_id,
            confirmed_round,
        })
    }

    /// Record `record` on chain from `sender`.
    pub async fn log_record(
        &self,
        record: &LogRecord,
        sender: Address,
        signer: &dyn TransactionSigner,
    ) -> Result<NoteReceipt, LedgerError> {
        let note = record.to_note()?;
        self.send_note_transaction(sender, note, signer).await
    }
}

/// A payment method successfully logged on chain.
#[derive(Debug, Clone)]
pub struct LoggedPaymentMethod {
    pub tx_id: String,
    pub confirmed_round: u64,
    pub record: LogRecord,
    pub explorer_url: String,
}

/// Logs payment-method additions using the active wallet session.
#[derive(Clone)]
pub struct PaymentMethodLogger {
    session: Arc<SessionManager>,
    logger: TransactionLogger,
    notifier: Notifier,
    explorer_url: String,
}

impl PaymentMethodLogger {
    pub fn new(
        session: Arc<SessionManager>,
        logger: TransactionLogger,
        notifier: Notifier,
        explorer_url: impl Into<String>,
    ) -> Self {
        Self {
            session,
            logger,
            notifier,
            explorer_url: explorer_url.into(),
        }
    }

    pub fn explorer_url(&self) -> &str {
        &self.explorer_url
    }

    /// Log that `user_id` added a payment method of `payment_type`.
    ///
    /// Returns `None` without touching the network when no wallet is
    /// connected. Any failure is logged, reported through the notifier and
    /// also yields `None`.
    pub async fn log(&self, user_id: &str, payment_type: &str) -> Option<LoggedPaymentMethod> {
        let session = self.session.snapshot().await;
        let (Some(address), Some(signer)) = (session.address, session.signer) else {
            warn!("Wallet not connected, cannot log to blockchain");
            return None;
        };

        let record = LogRecord::new(user_id, payment_type);
        match self.logger.log_record(&record, address, signer.as_ref()).await {
            Ok(receipt) => {
                info!(
                    tx_id = %receipt.tx_id,
                    user_id,
                    payment_type,
                    "Payment method logged to blockchain"
                );
                self.notifier.success("Logged to blockchain").await;
                Some(LoggedPaymentMethod {
                    explorer_url: explorer_tx_url(&self.explorer_url, &receipt.tx_id),
                    tx_id: receipt.tx_id,
                    confirmed_round: receipt.confirmed_round,
                    record,
                })
            }
            Err(e) => {
                error!(user_id, payment_type, error = %e, "Logging payment method failed");
                self.notifier.error("Logging failed").await;
                None
            }
        }
    }
}
