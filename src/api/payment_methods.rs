// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{LogPaymentMethodRequest, LogPaymentMethodResponse},
    state::AppState,
};

/// Record a payment-method addition on chain using the connected wallet.
///
/// Logging never fails the request: without a wallet session, or when the
/// transaction cannot be confirmed, the response has `logged: false` and the
/// outcome is reported through notifications.
#[utoipa::path(
    post,
    path = "/v1/payment-methods/log",
    request_body = LogPaymentMethodRequest,
    tag = "Payment Methods",
    responses(
        (status = 200, body = LogPaymentMethodResponse),
        (status = 400, description = "Missing user or payment type")
    )
)]
pub async fn log_payment_method(
    State(state): State<AppState>,
    Json(request): Json<LogPaymentMethodRequest>,
) -> Result<Json<LogPaymentMethodResponse>, ApiError> {
    let user_id = request.user_id.trim();
    let payment_type = request.payment_type.trim();
    if user_id.is_empty() {
        return Err(ApiError::bad_request("user_id must not be empty"));
    }
    if payment_type.is_empty() {
        return Err(ApiError::bad_request("payment_type must not be empty"));
    }

    let response = match state.payment_logger.log(user_id, payment_type).await {
        Some(logged) => LogPaymentMethodResponse {
            logged: true,
            tx_id: Some(logged.tx_id),
            confirmed_round: Some(logged.confirmed_round),
            explorer_url: Some(logged.explorer_url),
            payment_type: logged.record.payment_type,
            timestamp: Some(logged.record.timestamp),
        },
        None => LogPaymentMethodResponse::not_logged(payment_type),
    };
    Ok(Json(response))
}
