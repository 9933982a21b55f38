//! Solana RPC client used for balance, blockhash, broadcast and confirmation

use async_trait::async_trait;
use reqwest::Client;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_rpc_client::http_sender::HttpSender;
use solana_rpc_client::rpc_client::RpcClientConfig as SenderConfig;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::time::Duration;
use tracing::{debug, warn};

use crate::shared::errors::{AppError, SwapError};
use crate::shared::types::{BlockReference, SendPolicy};

/// Operations the swap executor needs from the ledger
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, SwapError>;

    async fn get_latest_blockhash(&self) -> Result<BlockReference, SwapError>;

    /// Broadcast an already signed transaction
    async fn send_transaction(&self, transaction: &VersionedTransaction, policy: SendPolicy) -> Result<Signature, SwapError>;

    /// Wait until the transaction reaches `commitment` or the client gives up
    async fn confirm_transaction(&self, signature: &Signature, commitment: CommitmentLevel) -> Result<(), SwapError>;
}

/// RPC client configuration
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    pub commitment: CommitmentConfig,
    pub request_timeout: Duration,
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            request_timeout: Duration::from_secs(30),
            confirm_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
            accept_invalid_certs: false,
        }
    }
}

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
    config: RpcClientConfig,
}

impl SolanaRpcClient {
    /// Create new RPC client
    pub fn new(rpc_url: String, config: RpcClientConfig) -> Result<Self, AppError> {
        if config.accept_invalid_certs {
            warn!("⚠️ TLS certificate validation is disabled for {}", rpc_url);
        }

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build RPC client: {}", e)))?;

        let sender = HttpSender::new_with_client(rpc_url, http_client);
        let client = RpcClient::new_sender(sender, SenderConfig::with_commitment(config.commitment));

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LedgerClient for SolanaRpcClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, SwapError> {
        let response = self
            .client
            .get_balance_with_commitment(pubkey, self.config.commitment)
            .await
            .map_err(|e| SwapError::BalanceQueryFailed(e.to_string()))?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<BlockReference, SwapError> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(self.config.commitment)
            .await
            .map_err(|e| SwapError::BlockhashFailed(e.to_string()))?;

        Ok(BlockReference {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction, policy: SendPolicy) -> Result<Signature, SwapError> {
        let send_config = RpcSendTransactionConfig {
            skip_preflight: policy.skip_preflight,
            preflight_commitment: Some(self.config.commitment.commitment),
            encoding: Some(UiTransactionEncoding::Base64),
            max_retries: Some(policy.max_retries),
            min_context_slot: None,
        };

        debug!("Sending transaction to {}", self.client.url());
        self.client
            .send_transaction_with_config(transaction, send_config)
            .await
            .map_err(|e| SwapError::TransactionSubmissionFailed(e.to_string()))
    }

    async fn confirm_transaction(&self, signature: &Signature, commitment: CommitmentLevel) -> Result<(), SwapError> {
        let wanted = CommitmentConfig { commitment };

        let poll = async {
            loop {
                match self.client.get_signature_status_with_commitment(signature, wanted).await {
                    Ok(Some(Ok(()))) => return Ok(()),
                    Ok(Some(Err(err))) => {
                        return Err(SwapError::ConfirmationFailed(format!(
                            "Transaction {} failed: {}",
                            signature, err
                        )))
                    }
                    Ok(None) => {}
                    Err(e) => warn!("⚠️ Signature status check failed for {}: {}", signature, e),
                }
                tokio::time::sleep(self.config.poll_interval).await;
            }
        };

        tokio::time::timeout(self.config.confirm_timeout, poll)
            .await
            .map_err(|_| {
                SwapError::ConfirmationFailed(format!(
                    "Transaction {} was not {} within {}s",
                    signature,
                    commitment,
                    self.config.confirm_timeout.as_secs()
                ))
            })?
    }
}
