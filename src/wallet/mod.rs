// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Module
//!
//! Wallets are external: this crate never holds user keys beyond the local
//! development provider. A [`WalletProvider`] connects to a wallet and hands
//! back the account address together with a [`TransactionSigner`], the
//! capability used to turn encoded unsigned transactions into signed ones.
//!
//! The [`SessionManager`] owns the single active session and is the only
//! component that mutates it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::algorand::Address;

pub mod local;
pub mod session;

pub use local::{LocalKeyProvider, LocalKeySigner, LOCAL_PROVIDER_ID};
pub use session::{SessionManager, WalletSession};

/// Provider id tried first when none is requested.
pub const DEFAULT_PROVIDER_ID: &str = "pera-wallet";

/// Signing capability brokered by a connected wallet.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Sign each canonically encoded unsigned transaction, returning the
    /// encoded signed transactions in the same order.
    async fn sign_transactions(&self, unsigned: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, WalletError>;
}

/// Result of a successful wallet connection.
#[derive(Clone)]
pub struct WalletConnection {
    pub address: Address,
    pub signer: Arc<dyn TransactionSigner>,
}

/// A wallet that can be connected to.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Stable identifier, e.g. `pera-wallet`.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<WalletConnection, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }
}

/// Wallet connection and signing errors.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider available")]
    NoProvider,

    #[error("Wallet provider `{provider}` failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Transaction sender {actual} does not match wallet account {expected}")]
    WrongSender { expected: Address, actual: Address },
}
