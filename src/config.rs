// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `ALGORAND_NETWORK` | `testnet` or `mainnet` | `testnet` |
//! | `ALGOD_URL` | Algod node endpoint | Network default |
//! | `ALGOD_TOKEN` | Algod API token | None |
//! | `INDEXER_URL` | Indexer endpoint | Network default |
//! | `INDEXER_TOKEN` | Indexer API token | `ALGOD_TOKEN` |
//! | `EXPLORER_URL` | Block explorer base URL | Network default |
//! | `CONFIRMATION_ROUNDS` | Rounds to wait for confirmation | `4` |
//! | `WALLET_PROVIDER` | Provider tried first on connect | `pera-wallet` |
//! | `WALLET_SEED` | Hex/base64 ed25519 seed for the local key provider | None |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | Serve HTTPS with these PEM files | None |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use crate::algorand::{network_by_name, NetworkConfig, DEFAULT_WAIT_ROUNDS};
use crate::wallet::DEFAULT_PROVIDER_ID;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const NETWORK_ENV: &str = "ALGORAND_NETWORK";
pub const ALGOD_URL_ENV: &str = "ALGOD_URL";
pub const ALGOD_TOKEN_ENV: &str = "ALGOD_TOKEN";
pub const INDEXER_URL_ENV: &str = "INDEXER_URL";
pub const INDEXER_TOKEN_ENV: &str = "INDEXER_TOKEN";
pub const EXPLORER_URL_ENV: &str = "EXPLORER_URL";
pub const CONFIRMATION_ROUNDS_ENV: &str = "CONFIRMATION_ROUNDS";
pub const WALLET_PROVIDER_ENV: &str = "WALLET_PROVIDER";

/// Environment variable holding the local key provider's seed.
///
/// When unset, no local provider is registered and connecting requires an
/// external wallet provider.
pub const WALLET_SEED_ENV: &str = "WALLET_SEED";

pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub network: NetworkConfig,
    pub algod_url: String,
    pub algod_token: Option<String>,
    pub indexer_url: String,
    pub indexer_token: Option<String>,
    pub explorer_url: String,
    pub confirmation_rounds: u64,
    pub preferred_provider: String,
    pub wallet_seed: Option<String>,
    pub tls: Option<TlsPaths>,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let network = network_by_name(get(NETWORK_ENV).as_deref()).map_err(|reason| {
            ConfigError::Invalid {
                name: NETWORK_ENV,
                reason,
            }
        })?;

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let confirmation_rounds = match get(CONFIRMATION_ROUNDS_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|rounds| *rounds > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: CONFIRMATION_ROUNDS_ENV,
                    reason: format!("expected a positive integer, got `{raw}`"),
                })?,
            None => DEFAULT_WAIT_ROUNDS,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert_path), Some(key_path)) => Some(TlsPaths {
                cert_path,
                key_path,
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: TLS_CERT_PATH_ENV,
                    reason: format!("{TLS_CERT_PATH_ENV} and {TLS_KEY_PATH_ENV} must be set together"),
                })
            }
        };

        let algod_token = get(ALGOD_TOKEN_ENV);
        let indexer_token = get(INDEXER_TOKEN_ENV).or_else(|| algod_token.clone());

        Ok(Self {
            bind_addr,
            algod_url: get(ALGOD_URL_ENV).unwrap_or_else(|| network.algod_url.to_string()),
            algod_token,
            indexer_url: get(INDEXER_URL_ENV).unwrap_or_else(|| network.indexer_url.to_string()),
            indexer_token,
            explorer_url: get(EXPLORER_URL_ENV)
                .unwrap_or_else(|| network.explorer_url.to_string()),
            confirmation_rounds,
            preferred_provider: get(WALLET_PROVIDER_ENV)
                .unwrap_or_else(|| DEFAULT_PROVIDER_ID.to_string()),
            wallet_seed: get(WALLET_SEED_ENV),
            tls,
            network,
        })
    }
}
