// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::DateTime;
use tracing::warn;

use crate::{
    algorand::{explorer_tx_url, AlgodError},
    error::ApiError,
    ledger::LogRecord,
    models::TransactionInfoResponse,
    state::AppState,
};

/// Length of a base32 transaction ID.
const TX_ID_LEN: usize = 52;

fn is_valid_tx_id(tx_id: &str) -> bool {
    tx_id.len() == TX_ID_LEN
        && tx_id
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}

/// Look up a logged transaction through the indexer.
#[utoipa::path(
    get,
    path = "/v1/transactions/{tx_id}",
    params(
        ("tx_id" = String, Path, description = "Algorand transaction ID")
    ),
    tag = "Transactions",
    responses(
        (status = 200, body = TransactionInfoResponse),
        (status = 400, description = "Malformed transaction ID"),
        (status = 404, description = "Unknown transaction"),
        (status = 502, description = "Indexer unavailable")
    )
)]
pub async fn get_transaction(
    Path(tx_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TransactionInfoResponse>, ApiError> {
    if !is_valid_tx_id(&tx_id) {
        return Err(ApiError::bad_request("Invalid transaction ID"));
    }

    let txn = state
        .indexer
        .lookup_transaction(&tx_id)
        .await
        .map_err(|e| {
            if !matches!(e, AlgodError::NotFound(_)) {
                warn!(tx_id = %tx_id, error = %e, "Indexer lookup failed");
            }
            ApiError::from(e)
        })?;

    let record = txn
        .note_bytes()
        .and_then(|note| LogRecord::from_note(&note).ok());

    Ok(Json(TransactionInfoResponse {
        explorer_url: explorer_tx_url(state.payment_logger.explorer_url(), &txn.id),
        round_time: txn
            .round_time
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        tx_id: txn.id,
        confirmed_round: txn.confirmed_round,
        sender: txn.sender,
        record,
    }))
}
