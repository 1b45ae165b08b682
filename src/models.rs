// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Wallet**: Session status and connect requests
//! - **Payment methods**: On-chain logging of payment-method additions
//! - **Transactions**: Indexer view of a logged transaction
//! - **Notifications**: Recent user-facing messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ledger::LogRecord;
use crate::notify::Notification;

// =============================================================================
// Wallet
// =============================================================================

/// Request to connect a wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ConnectWalletRequest {
    /// Provider to use; the configured preferred provider when omitted
    #[serde(default)]
    pub provider_id: Option<String>,
}

/// Current wallet session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalletStatusResponse {
    pub connected: bool,
    /// Full Algorand address of the connected account
    pub address: Option<String>,
    /// Abbreviated address for display, e.g. `ABCD...WXYZ`
    pub display_address: Option<String>,
    /// Provider that owns the session
    pub provider_id: Option<String>,
    /// Network the service submits to
    pub network: String,
    /// Providers available for connection
    pub providers: Vec<String>,
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Request to log a payment-method addition on chain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogPaymentMethodRequest {
    pub user_id: String,
    /// Payment method type tag, e.g. `card` or `bank_account`
    pub payment_type: String,
}

/// Result of a logging attempt.
///
/// `logged` is false when no wallet is connected or the transaction could
/// not be confirmed; details are reported through notifications.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogPaymentMethodResponse {
    pub logged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_round: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    pub payment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogPaymentMethodResponse {
    pub fn not_logged(payment_type: impl Into<String>) -> Self {
        Self {
            logged: false,
            tx_id: None,
            confirmed_round: None,
            explorer_url: None,
            payment_type: payment_type.into(),
            timestamp: None,
        }
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// A transaction as seen by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionInfoResponse {
    pub tx_id: String,
    pub confirmed_round: Option<u64>,
    pub sender: String,
    /// Block time of the confirming round
    pub round_time: Option<DateTime<Utc>>,
    /// Decoded payment-method record, when the note carries one
    pub record: Option<LogRecord>,
    pub explorer_url: String,
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationsResponse {
    /// Oldest first
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_request_provider_is_optional() {
        let request: ConnectWalletRequest = serde_json::from_str("{}").unwrap();
        assert!(request.provider_id.is_none());

        let request: ConnectWalletRequest =
            serde_json::from_str(r#"{"provider_id":"local-key"}"#).unwrap();
        assert_eq!(request.provider_id.as_deref(), Some("local-key"));
    }

    #[test]
    fn not_logged_response_omits_transaction_fields() {
        let json = serde_json::to_value(LogPaymentMethodResponse::not_logged("card")).unwrap();
        assert_eq!(json, serde_json::json!({"logged": false, "payment_type": "card"}));
    }
}
