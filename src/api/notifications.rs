// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{models::NotificationsResponse, state::AppState};

#[utoipa::path(
    get,
    path = "/v1/notifications",
    tag = "Notifications",
    responses((status = 200, body = NotificationsResponse))
)]
pub async fn list_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.notifier.recent().await,
    })
}
