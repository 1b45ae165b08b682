// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment-method log record carried in the transaction note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The note payload: who added which payment method, and when.
///
/// Serialized as compact JSON, e.g.
/// `{"uid":"user_1","type":"card","timestamp":"2026-10-18T09:30:00.123456789Z"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogRecord {
    /// User identifier
    pub uid: String,
    /// Payment method type tag
    #[serde(rename = "type")]
    pub payment_type: String,
    /// When the payment method was logged
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// A record stamped with the current time.
    pub fn new(uid: impl Into<String>, payment_type: impl Into<String>) -> Self {
        Self::at(uid, payment_type, Utc::now())
    }

    pub fn at(
        uid: impl Into<String>,
        payment_type: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            payment_type: payment_type.into(),
            timestamp,
        }
    }

    /// Note bytes for the transaction.
    pub fn to_note(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse a record back out of a transaction note.
    pub fn from_note(note: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(note)
    }
}
