// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::algorand::{IndexerClient, NetworkConfig, NodeApi};
use crate::ledger::PaymentMethodLogger;
use crate::notify::Notifier;
use crate::wallet::SessionManager;

#[derive(Clone)]
pub struct AppState {
    /// Wallet session shared by all handlers
    pub session: Arc<SessionManager>,
    pub payment_logger: PaymentMethodLogger,
    pub node: Arc<dyn NodeApi>,
    pub indexer: Arc<IndexerClient>,
    pub notifier: Notifier,
    pub network: NetworkConfig,
}

impl AppState {
    pub fn new(
        session: Arc<SessionManager>,
        payment_logger: PaymentMethodLogger,
        node: Arc<dyn NodeApi>,
        indexer: IndexerClient,
        notifier: Notifier,
        network: NetworkConfig,
    ) -> Self {
        Self {
            session,
            payment_logger,
            node,
            indexer: Arc::new(indexer),
            notifier,
            network,
        }
    }
}
