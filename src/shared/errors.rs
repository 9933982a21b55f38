//! Error handling for the application

use thiserror::Error;

/// Swap-related errors
///
/// Every step of a swap run returns one of these; the executor turns the first
/// one it sees into a failed [`SwapOutcome`](crate::shared::types::SwapOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Insufficient balance: {balance} lamports is below the minimum of {minimum} lamports")]
    InsufficientBalance { balance: u64, minimum: u64 },

    #[error("Failed to query balance: {0}")]
    BalanceQueryFailed(String),

    #[error("Failed to fetch quote: {0}")]
    QuoteFetchFailed(String),

    #[error("Failed to fetch swap transaction: {status} - {body}")]
    SwapBuildFailed { status: String, body: String },

    #[error("Invalid swap transaction: {0}")]
    InvalidTransaction(String),

    #[error("Failed to get latest blockhash: {0}")]
    BlockhashFailed(String),

    #[error("Failed to sign transaction: {0}")]
    SigningFailed(String),

    #[error("Transaction submission failed: {0}")]
    TransactionSubmissionFailed(String),

    #[error("Transaction confirmation failed: {0}")]
    ConfirmationFailed(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Wallet error: {0}")]
    WalletError(String),
}
