// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory node and application state used by unit tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ring::signature::{UnparsedPublicKey, ED25519};

use crate::algorand::{
    AlgodError, IndexerClient, NodeApi, NodeStatus, PendingTransaction, SignedTransaction,
    SuggestedParams, ALGORAND_TESTNET,
};
use crate::ledger::{PaymentMethodLogger, TransactionLogger};
use crate::notify::Notifier;
use crate::state::AppState;
use crate::wallet::{SessionManager, WalletProvider};

/// Node that accepts correctly signed transactions and confirms them on the
/// next status check.
pub(crate) struct FakeNode {
    /// Number of node calls made
    pub calls: AtomicUsize,
    round: AtomicU64,
    submitted: Mutex<Vec<Vec<u8>>>,
    submitted_ids: Mutex<Vec<String>>,
    confirmed: Mutex<Vec<String>>,
    reject_submissions: bool,
    confirm: bool,
    offline: bool,
}

impl FakeNode {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            round: AtomicU64::new(1000),
            submitted: Mutex::new(Vec::new()),
            submitted_ids: Mutex::new(Vec::new()),
            confirmed: Mutex::new(Vec::new()),
            reject_submissions: false,
            confirm: true,
            offline: false,
        }
    }

    pub(crate) fn rejecting_submissions(mut self) -> Self {
        self.reject_submissions = true;
        self
    }

    pub(crate) fn never_confirming(mut self) -> Self {
        self.confirm = false;
        self
    }

    /// Fail every status request as if the node were unreachable.
    pub(crate) fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Raw signed bytes received, in submission order.
    pub(crate) fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().unwrap().clone()
    }

    /// IDs reported as confirmed, in confirmation order.
    pub(crate) fn confirmed_ids(&self) -> Vec<String> {
        self.confirmed.lock().unwrap().clone()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NodeApi for FakeNode {
    async fn suggested_params(&self) -> Result<SuggestedParams, AlgodError> {
        self.touch();
        // Let concurrent callers interleave.
        tokio::task::yield_now().await;
        let round = self.round.load(Ordering::SeqCst);
        Ok(SuggestedParams {
            fee: 0,
            min_fee: 1000,
            flat_fee: false,
            first_valid: round,
            last_valid: round + 1000,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: [0x48; 32],
        })
    }

    async fn send_raw_transaction(&self, signed: &[u8]) -> Result<String, AlgodError> {
        self.touch();
        if self.reject_submissions {
            return Err(AlgodError::Rejected {
                status: 400,
                message: "transaction rejected".to_string(),
            });
        }

        let decoded = SignedTransaction::decode(signed)?;
        let message = decoded.transaction.bytes_to_sign()?;
        UnparsedPublicKey::new(&ED25519, decoded.transaction.sender.as_bytes())
            .verify(&message, &decoded.signature)
            .map_err(|_| AlgodError::Rejected {
                status: 400,
                message: "invalid signature".to_string(),
            })?;

        let tx_id = decoded.id()?;
        self.submitted.lock().unwrap().push(signed.to_vec());
        self.submitted_ids.lock().unwrap().push(tx_id.clone());
        Ok(tx_id)
    }

    async fn pending_transaction(&self, tx_id: &str) -> Result<PendingTransaction, AlgodError> {
        self.touch();
        let known = self.submitted_ids.lock().unwrap().iter().any(|id| id == tx_id);
        if !known {
            return Err(AlgodError::NotFound(tx_id.to_string()));
        }
        if !self.confirm {
            return Ok(PendingTransaction::default());
        }

        let mut confirmed = self.confirmed.lock().unwrap();
        if !confirmed.iter().any(|id| id == tx_id) {
            confirmed.push(tx_id.to_string());
        }
        Ok(PendingTransaction {
            confirmed_round: Some(self.round.load(Ordering::SeqCst) + 1),
            ..Default::default()
        })
    }

    async fn status(&self) -> Result<NodeStatus, AlgodError> {
        self.touch();
        if self.offline {
            return Err(AlgodError::Request("connection refused".to_string()));
        }
        Ok(NodeStatus {
            last_round: self.round.load(Ordering::SeqCst),
            time_since_last_round: 0,
        })
    }

    async fn status_after_block(&self, round: u64) -> Result<NodeStatus, AlgodError> {
        self.touch();
        let next = self.round.fetch_max(round + 1, Ordering::SeqCst).max(round + 1);
        Ok(NodeStatus {
            last_round: next,
            time_since_last_round: 0,
        })
    }
}

/// Application state backed by `node`, with an indexer at an unused port.
pub(crate) fn app_state(node: Arc<FakeNode>, providers: Vec<Arc<dyn WalletProvider>>) -> AppState {
    app_state_with_indexer(node, providers, "http://127.0.0.1:9")
}

pub(crate) fn app_state_with_indexer(
    node: Arc<FakeNode>,
    providers: Vec<Arc<dyn WalletProvider>>,
    indexer_url: &str,
) -> AppState {
    let notifier = Notifier::new();
    let session = Arc::new(
        SessionManager::new(providers, notifier.clone()).with_preferred_provider("local-key"),
    );
    let payment_logger = PaymentMethodLogger::new(
        session.clone(),
        TransactionLogger::new(node.clone()),
        notifier.clone(),
        ALGORAND_TESTNET.explorer_url,
    );
    let indexer = IndexerClient::new(indexer_url, None).unwrap();
    AppState::new(
        session,
        payment_logger,
        node,
        indexer,
        notifier,
        ALGORAND_TESTNET,
    )
}
