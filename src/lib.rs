//! Jupswap - single-endpoint Jupiter swap service for Solana
//! Quote, build, sign, submit and confirm on `GET /swap`

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod exchanges;
pub mod application;
pub mod shared;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use application::AppContext;
pub use config::Config;
pub use domain::execution::SwapExecutor;
pub use exchanges::api_clients::{JupiterClient, SwapAggregator};
pub use infrastructure::blockchain::{LedgerClient, SolanaRpcClient, Wallet};
pub use shared::types::SwapOutcome;
