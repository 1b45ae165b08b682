// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand node (algod) and indexer REST clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::transaction::TransactionError;
use super::types::*;

const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";
const INDEXER_TOKEN_HEADER: &str = "X-Indexer-API-Token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Operations the transaction logger needs from a network node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Current suggested parameters for building a transaction.
    async fn suggested_params(&self) -> Result<SuggestedParams, AlgodError>;

    /// Submit one or more concatenated signed transactions, returning the
    /// ID of the first.
    async fn send_raw_transaction(&self, signed: &[u8]) -> Result<String, AlgodError>;

    /// Pool / confirmation state of a submitted transaction.
    async fn pending_transaction(&self, tx_id: &str) -> Result<PendingTransaction, AlgodError>;

    /// Current node status.
    async fn status(&self) -> Result<NodeStatus, AlgodError>;

    /// Block until the node has seen a block after `round`.
    async fn status_after_block(&self, round: u64) -> Result<NodeStatus, AlgodError>;
}

/// Errors that can occur while talking to algod or the indexer.
#[derive(Debug, thiserror::Error)]
pub enum AlgodError {
    #[error("Invalid node URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Node rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Shared REST plumbing for algod and the indexer.
#[derive(Debug, Clone)]
struct RestClient {
    base_url: String,
    token: Option<String>,
    token_header: &'static str,
    http: Client,
}

impl RestClient {
    fn new(
        base_url: &str,
        token: Option<String>,
        token_header: &'static str,
    ) -> Result<Self, AlgodError> {
        let parsed: url::Url = base_url
            .parse()
            .map_err(|e: url::ParseError| AlgodError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AlgodError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AlgodError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            token_header,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(self.token_header, token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlgodError> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| AlgodError::Request(format!("GET {path} failed: {e}")))?;

        Self::read_json(path, response).await
    }

    async fn post_binary<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, AlgodError> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .header("Content-Type", "application/x-binary")
            .body(body)
            .send()
            .await
            .map_err(|e| AlgodError::Request(format!("POST {path} failed: {e}")))?;

        Self::read_json(path, response).await
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, AlgodError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(AlgodError::NotFound(extract_message(&body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlgodError::Rejected {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AlgodError::InvalidResponse(format!("{path} invalid JSON: {e}")))
    }
}

/// Pull `message` out of a node error body, falling back to the raw text.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

/// Client for an algod node.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    rest: RestClient,
}

impl AlgodClient {
    /// Create a client for the given node URL and API token.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, AlgodError> {
        Ok(Self {
            rest: RestClient::new(base_url, token, ALGOD_TOKEN_HEADER)?,
        })
    }

    /// Raw `/v2/transactions/params` response.
    pub async fn transaction_params(&self) -> Result<TransactionParams, AlgodError> {
        self.rest.get_json("/v2/transactions/params").await
    }
}

#[async_trait]
impl NodeApi for AlgodClient {
    async fn suggested_params(&self) -> Result<SuggestedParams, AlgodError> {
        let params = self.transaction_params().await?;
        Ok(SuggestedParams::try_from(params)?)
    }

    async fn send_raw_transaction(&self, signed: &[u8]) -> Result<String, AlgodError> {
        let response: SubmitResponse = self
            .rest
            .post_binary("/v2/transactions", signed.to_vec())
            .await?;
        Ok(response.tx_id)
    }

    async fn pending_transaction(&self, tx_id: &str) -> Result<PendingTransaction, AlgodError> {
        self.rest
            .get_json(&format!("/v2/transactions/pending/{tx_id}"))
            .await
    }

    async fn status(&self) -> Result<NodeStatus, AlgodError> {
        self.rest.get_json("/v2/status").await
    }

    async fn status_after_block(&self, round: u64) -> Result<NodeStatus, AlgodError> {
        self.rest
            .get_json(&format!("/v2/status/wait-for-block-after/{round}"))
            .await
    }
}

/// Client for an Algorand indexer.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    rest: RestClient,
}

impl IndexerClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, AlgodError> {
        Ok(Self {
            rest: RestClient::new(base_url, token, INDEXER_TOKEN_HEADER)?,
        })
    }

    /// Look up a confirmed transaction by ID.
    pub async fn lookup_transaction(&self, tx_id: &str) -> Result<IndexedTransaction, AlgodError> {
        let response: IndexerTransactionResponse = self
            .rest
            .get_json(&format!("/v2/transactions/{tx_id}"))
            .await?;
        Ok(response.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_bytes, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            AlgodClient::new("ftp://example.com", None),
            Err(AlgodError::InvalidUrl(_))
        ));
        assert!(matches!(
            AlgodClient::new("not a url", None),
            Err(AlgodError::InvalidUrl(_))
        ));
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            extract_message(r#"{"message":"overspend"}"#),
            "overspend"
        );
        assert_eq!(extract_message(" plain text "), "plain text");
    }

    #[tokio::test]
    async fn suggested_params_sends_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/transactions/params"))
            .and(header(ALGOD_TOKEN_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "consensus-version": "v1",
                "fee": 0,
                "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
                "genesis-id": "testnet-v1.0",
                "last-round": 500,
                "min-fee": 1000
            })))
            .mount(&server)
            .await;

        let client = AlgodClient::new(&server.uri(), Some("secret".to_string())).unwrap();
        let params = client.suggested_params().await.unwrap();
        assert_eq!(params.first_valid, 500);
        assert_eq!(params.genesis_id, "testnet-v1.0");
    }

    #[tokio::test]
    async fn send_raw_transaction_posts_binary_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/transactions"))
            .and(header("Content-Type", "application/x-binary"))
            .and(body_bytes(vec![1u8, 2, 3]))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "txId": "TXID" })),
            )
            .mount(&server)
            .await;

        let client = AlgodClient::new(&server.uri(), None).unwrap();
        assert_eq!(client.send_raw_transaction(&[1, 2, 3]).await.unwrap(), "TXID");
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_node_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/transactions"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "message": "below min fee" })),
            )
            .mount(&server)
            .await;

        let client = AlgodClient::new(&server.uri(), None).unwrap();
        match client.send_raw_transaction(&[0]).await {
            Err(AlgodError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "below min fee");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pending_and_status_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/transactions/pending/ABC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "confirmed-round": 77,
                "pool-error": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/status/wait-for-block-after/76"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "last-round": 77 })),
            )
            .mount(&server)
            .await;

        let client = AlgodClient::new(&server.uri(), None).unwrap();
        let pending = client.pending_transaction("ABC").await.unwrap();
        assert_eq!(pending.confirmed(), Some(77));
        assert_eq!(client.status_after_block(76).await.unwrap().last_round, 77);
    }

    #[tokio::test]
    async fn indexer_lookup_decodes_note() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/transactions/ABC"))
            .and(header(INDEXER_TOKEN_HEADER, "idx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current-round": 100,
                "transaction": {
                    "id": "ABC",
                    "confirmed-round": 90,
                    "sender": "SENDER",
                    "note": "aGVsbG8=",
                    "round-time": 1700000000,
                    "tx-type": "pay"
                }
            })))
            .mount(&server)
            .await;

        let client = IndexerClient::new(&server.uri(), Some("idx".to_string())).unwrap();
        let txn = client.lookup_transaction("ABC").await.unwrap();
        assert_eq!(txn.confirmed_round, Some(90));
        assert_eq!(txn.note_bytes().unwrap(), b"hello");
    }

    #[tokio::test]
    async fn indexer_unknown_transaction_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/transactions/NOPE"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "message": "no transaction found" })),
            )
            .mount(&server)
            .await;

        let client = IndexerClient::new(&server.uri(), None).unwrap();
        assert!(matches!(
            client.lookup_transaction("NOPE").await,
            Err(AlgodError::NotFound(_))
        ));
    }
}
