// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::health::{HealthChecks, HealthResponse, ReadyResponse},
    ledger::LogRecord,
    models::{
        ConnectWalletRequest, LogPaymentMethodRequest, LogPaymentMethodResponse,
        NotificationsResponse, TransactionInfoResponse, WalletStatusResponse,
    },
    notify::{Notification, NotificationLevel},
    state::AppState,
};

pub mod health;
pub mod notifications;
pub mod payment_methods;
pub mod transactions;
pub mod wallet;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/connect", post(wallet::connect_wallet))
        .route("/wallet/disconnect", post(wallet::disconnect_wallet))
        .route(
            "/payment-methods/log",
            post(payment_methods::log_payment_method),
        )
        .route("/transactions/{tx_id}", get(transactions::get_transaction))
        .route("/notifications", get(notifications::list_notifications))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        wallet::get_wallet,
        wallet::connect_wallet,
        wallet::disconnect_wallet,
        payment_methods::log_payment_method,
        transactions::get_transaction,
        notifications::list_notifications
    ),
    components(
        schemas(
            ReadyResponse,
            HealthChecks,
            HealthResponse,
            WalletStatusResponse,
            ConnectWalletRequest,
            LogPaymentMethodRequest,
            LogPaymentMethodResponse,
            TransactionInfoResponse,
            LogRecord,
            NotificationsResponse,
            Notification,
            NotificationLevel
        )
    ),
    tags(
        (name = "Health", description = "Liveness and node reachability"),
        (name = "Wallet", description = "Wallet session management"),
        (name = "Payment Methods", description = "On-chain payment-method logging"),
        (name = "Transactions", description = "Logged transaction lookup"),
        (name = "Notifications", description = "Recent user-facing notifications")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{app_state, FakeNode};
    use crate::wallet::session::tests::local_provider;

    fn app() -> Router {
        router(app_state(Arc::new(FakeNode::new()), vec![local_provider(4)]))
    }

    #[tokio::test]
    async fn liveness_route_sets_request_id() {
        let response = app()
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn request_id_is_propagated() {
        let response = app()
            .oneshot(
                Request::get("/health/live")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn connect_accepts_an_empty_body() {
        let app = app();
        let response = app
            .clone()
            .oneshot(Request::post("/v1/wallet/connect").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["connected"], true);
        assert_eq!(json["provider_id"], "local-key");
    }

    #[tokio::test]
    async fn connect_then_log_over_http() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/wallet/connect")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::post("/v1/payment-methods/log")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_id":"user_1","payment_type":"card"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["logged"], true);
        assert_eq!(json["tx_id"].as_str().unwrap().len(), 52);
    }

    #[tokio::test]
    async fn openapi_lists_all_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/health",
            "/v1/wallet",
            "/v1/wallet/connect",
            "/v1/wallet/disconnect",
            "/v1/payment-methods/log",
            "/v1/transactions/{tx_id}",
            "/v1/notifications",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
