//! Solana network access and the signing wallet

pub mod rpc_client;
pub mod wallet;

pub use rpc_client::{LedgerClient, RpcClientConfig, SolanaRpcClient};
pub use wallet::Wallet;
