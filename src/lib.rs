// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hustl Ledger - Wallet Session & On-Chain Payment-Method Logging
//!
//! Connects a wallet through a pluggable provider, keeps the active session
//! in memory, and records payment-method additions on Algorand as zero-value
//! self-transfers whose note carries `{uid, type, timestamp}`.
//!
//! ## Modules
//!
//! - `algorand` - Addresses, canonical transaction encoding, algod/indexer clients
//! - `wallet` - Wallet providers, signers and the session manager
//! - `ledger` - Note-transaction logger and payment-method logging
//! - `notify` - Transient user-facing notifications
//! - `api` - HTTP API handlers (Axum)

pub mod algorand;
pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod notify;
pub mod state;
pub mod wallet;

#[cfg(test)]
mod testing;
