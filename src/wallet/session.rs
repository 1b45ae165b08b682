// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session management.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::{TransactionSigner, WalletError, WalletProvider, DEFAULT_PROVIDER_ID};
use crate::algorand::Address;
use crate::notify::Notifier;

/// The active wallet session. Empty until a wallet connects.
#[derive(Clone, Default)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub signer: Option<Arc<dyn TransactionSigner>>,
    pub provider_id: Option<String>,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("address", &self.address)
            .field("signer", &self.signer.as_ref().map(|_| "<signer>"))
            .field("provider_id", &self.provider_id)
            .finish()
    }
}

/// Owns the wallet session and the providers it can be connected through.
pub struct SessionManager {
    providers: Vec<Arc<dyn WalletProvider>>,
    preferred_provider: String,
    session: RwLock<WalletSession>,
    notifier: Notifier,
}

impl SessionManager {
    pub fn new(providers: Vec<Arc<dyn WalletProvider>>, notifier: Notifier) -> Self {
        Self {
            providers,
            preferred_provider: DEFAULT_PROVIDER_ID.to_string(),
            session: RwLock::new(WalletSession::default()),
            notifier,
        }
    }

    /// Override the provider tried first when none is requested.
    pub fn with_preferred_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.preferred_provider = provider_id.into();
        self
    }

    /// Registered provider ids.
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.id().to_string()).collect()
    }

    /// A copy of the current session.
    pub async fn snapshot(&self) -> WalletSession {
        self.session.read().await.clone()
    }

    /// Address of the connected account, if any.
    pub async fn active_address(&self) -> Option<Address> {
        self.session.read().await.address
    }

    pub async fn is_connected(&self) -> bool {
        self.session.read().await.is_connected()
    }

    /// Pick a provider: the requested id if given, otherwise the preferred
    /// id, falling back to the first registered provider.
    fn select_provider(&self, requested: Option<&str>) -> Option<Arc<dyn WalletProvider>> {
        let find = |id: &str| self.providers.iter().find(|p| p.id() == id).cloned();
        match requested {
            Some(id) => find(id),
            None => find(&self.preferred_provider).or_else(|| self.providers.first().cloned()),
        }
    }

    /// Connect a wallet and populate the session.
    ///
    /// Failures are reported through the notifier and returned to the caller
    /// for inspection; the session is left untouched.
    pub async fn connect(&self, requested: Option<&str>) -> Result<Address, WalletError> {
        let Some(provider) = self.select_provider(requested) else {
            warn!(requested = ?requested, "No wallet provider available");
            self.notifier.error("No wallet provider available").await;
            return Err(WalletError::NoProvider);
        };

        match self.connect_provider(provider.as_ref()).await {
            Ok(address) => {
                self.notifier.success("Wallet connected").await;
                Ok(address)
            }
            Err(e) => {
                error!(provider = provider.id(), error = %e, "Wallet connection failed");
                self.notifier.error("Wallet connection failed").await;
                Err(e)
            }
        }
    }

    /// Attempt a silent reconnection once at startup.
    ///
    /// Only runs when providers are registered and no address is active.
    /// Failures are logged and swallowed.
    pub async fn restore(&self) {
        if self.providers.is_empty() || self.is_connected().await {
            return;
        }

        let Some(provider) = self
            .providers
            .iter()
            .find(|p| p.id() == self.preferred_provider)
            .cloned()
        else {
            return;
        };

        if let Err(e) = self.connect_provider(provider.as_ref()).await {
            warn!(provider = provider.id(), error = %e, "Silent wallet reconnection failed");
        }
    }

    /// Clear the session.
    pub async fn disconnect(&self) {
        let previous = {
            let mut session = self.session.write().await;
            std::mem::take(&mut *session)
        };

        if let Some(provider_id) = previous.provider_id.as_deref() {
            self.release_provider(provider_id).await;
        }

        if previous.is_connected() {
            info!("Wallet disconnected");
            self.notifier.success("Wallet disconnected").await;
        }
    }

    async fn connect_provider(&self, provider: &dyn WalletProvider) -> Result<Address, WalletError> {
        let connection = provider.connect().await?;

        let previous = {
            let mut session = self.session.write().await;
            std::mem::replace(
                &mut *session,
                WalletSession {
                    address: Some(connection.address),
                    signer: Some(connection.signer),
                    provider_id: Some(provider.id().to_string()),
                },
            )
        };

        // Switching providers releases the one being replaced.
        if let Some(previous_id) = previous.provider_id.as_deref() {
            if previous_id != provider.id() {
                self.release_provider(previous_id).await;
            }
        }

        info!(
            provider = provider.id(),
            name = provider.name(),
            address = %connection.address,
            "Wallet connected"
        );
        Ok(connection.address)
    }

    /// Run a provider's disconnect hook. Failures are only logged.
    async fn release_provider(&self, provider_id: &str) {
        let Some(provider) = self.providers.iter().find(|p| p.id() == provider_id) else {
            return;
        };
        if let Err(e) = provider.disconnect().await {
            warn!(provider = provider_id, error = %e, "Wallet provider disconnect failed");
        }
    }
}
