// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{ConnectWalletRequest, WalletStatusResponse},
    state::AppState,
};

async fn wallet_status(state: &AppState) -> WalletStatusResponse {
    let session = state.session.snapshot().await;
    WalletStatusResponse {
        connected: session.is_connected(),
        address: session.address.map(|a| a.to_string()),
        display_address: session.address.map(|a| a.short()),
        provider_id: session.provider_id,
        network: state.network.name.to_string(),
        providers: state.session.provider_ids(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/wallet",
    tag = "Wallet",
    responses((status = 200, body = WalletStatusResponse))
)]
pub async fn get_wallet(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    Json(wallet_status(&state).await)
}

/// Connect a wallet provider and make its account the active session.
///
/// The body is optional; without one the preferred provider is used. On
/// failure the session is left as it was.
#[utoipa::path(
    post,
    path = "/v1/wallet/connect",
    request_body = ConnectWalletRequest,
    tag = "Wallet",
    responses(
        (status = 200, body = WalletStatusResponse),
        (status = 503, description = "No provider available or the provider failed")
    )
)]
pub async fn connect_wallet(
    State(state): State<AppState>,
    body: Option<Json<ConnectWalletRequest>>,
) -> Result<Json<WalletStatusResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    state
        .session
        .connect(request.provider_id.as_deref())
        .await
        .map_err(|e| ApiError::service_unavailable(e.to_string()))?;
    Ok(Json(wallet_status(&state).await))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/disconnect",
    tag = "Wallet",
    responses((status = 200, body = WalletStatusResponse))
)]
pub async fn disconnect_wallet(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.session.disconnect().await;
    Json(wallet_status(&state).await)
}
