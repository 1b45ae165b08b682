// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hustl_ledger::{
    algorand::{AlgodClient, IndexerClient, NodeApi},
    api::router,
    config::AppConfig,
    ledger::{PaymentMethodLogger, TransactionLogger},
    logging::{self, LogFormat},
    notify::Notifier,
    state::AppState,
    wallet::{LocalKeyProvider, LocalKeySigner, SessionManager, WalletProvider},
};

/// Time given to in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(LogFormat::from_env());

    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    info!(
        network = config.network.name,
        algod_url = %config.algod_url,
        indexer_url = %config.indexer_url,
        confirmation_rounds = config.confirmation_rounds,
        "Configuration loaded"
    );

    let node: Arc<dyn NodeApi> = Arc::new(AlgodClient::new(
        &config.algod_url,
        config.algod_token.clone(),
    )?);
    let indexer = IndexerClient::new(&config.indexer_url, config.indexer_token.clone())?;

    let mut providers: Vec<Arc<dyn WalletProvider>> = Vec::new();
    if let Some(seed) = config.wallet_seed.as_deref() {
        let signer = LocalKeySigner::from_seed_str(seed)?;
        info!(address = %signer.address(), "Local key wallet provider registered");
        providers.push(Arc::new(LocalKeyProvider::new(signer)));
    }
    if providers.is_empty() {
        warn!("No wallet providers registered; logging stays disabled until one connects");
    }

    let notifier = Notifier::new();
    let session = Arc::new(
        SessionManager::new(providers, notifier.clone())
            .with_preferred_provider(config.preferred_provider.clone()),
    );
    session.restore().await;

    let payment_logger = PaymentMethodLogger::new(
        session.clone(),
        TransactionLogger::new(node.clone()).with_wait_rounds(config.confirmation_rounds),
        notifier.clone(),
        config.explorer_url.clone(),
    );

    let state = AppState::new(
        session,
        payment_logger,
        node,
        indexer,
        notifier,
        config.network.clone(),
    );
    let app = router(state);

    let shutdown = CancellationToken::new();
    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(watch_shutdown(shutdown.clone(), handle.clone()));

    let addr = config.bind_addr;
    match config.tls.as_ref() {
        Some(tls) => {
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
            info!("Hustl Ledger listening on https://{addr} (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("Hustl Ledger listening on http://{addr} (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    shutdown.cancel();
    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl-C or SIGTERM, then drain connections.
async fn watch_shutdown(shutdown: CancellationToken, handle: Handle<SocketAddr>) {
    tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
