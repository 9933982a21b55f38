// src/app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::application::{create_router, AppContext};
use crate::config::Config;
use crate::domain::execution::{SwapExecutor, SwapSettings};
use crate::exchanges::api_clients::JupiterClient;
use crate::infrastructure::blockchain::{RpcClientConfig, SolanaRpcClient, Wallet};
use crate::shared::errors::AppError;
use crate::shared::types::SwapOutcome;

/// Build the process-wide context: wallet, RPC client, aggregator client
pub fn build_context(cfg: &Config) -> Result<AppContext, AppError> {
    let wallet = Arc::new(Wallet::from_base58(&cfg.private_key)?);
    info!("Loaded keypair: {}", wallet.pubkey());

    let rpc_config = RpcClientConfig {
        confirm_timeout: Duration::from_secs(cfg.confirm_timeout_secs),
        accept_invalid_certs: cfg.rpc_accept_invalid_certs,
        ..RpcClientConfig::default()
    };
    let ledger = Arc::new(SolanaRpcClient::new(cfg.rpc_url.clone(), rpc_config)?);
    let aggregator = Arc::new(JupiterClient::new(cfg.quote_url.clone(), cfg.swap_url.clone())?);

    let executor = SwapExecutor::new(ledger, aggregator, wallet, SwapSettings::from(cfg));

    if !cfg.serialize_swaps {
        warn!("⚠️ Swap serialization is disabled: overlapping requests may spend the same balance");
    }

    Ok(AppContext::new(executor, cfg.serialize_swaps))
}

/// Run a single swap without starting the server
pub async fn run_once(cfg: Config) -> Result<SwapOutcome> {
    let context = build_context(&cfg)?;
    Ok(context.execute_swap().await)
}

pub async fn run(cfg: Config) -> Result<()> {
    info!("Starting Jupiter swap service");
    info!("Configuration: {:?}", cfg);

    let context = Arc::new(build_context(&cfg)?);
    let app = create_router(context);

    let addr = cfg.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server is running on port {}", cfg.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
