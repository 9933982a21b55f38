//! End-to-end swap run: balance check, quote, build, sign, submit, confirm

use base64::{engine::general_purpose, Engine as _};
use solana_sdk::{
    commitment_config::CommitmentLevel, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};
use std::sync::Arc;
use tracing::{info_span, Instrument};

use crate::config::Config;
use crate::exchanges::api_clients::SwapAggregator;
use crate::infrastructure::blockchain::{LedgerClient, Wallet};
use crate::shared::errors::SwapError;
use crate::shared::types::{QuoteRequest, SendPolicy, SwapOutcome};
use crate::shared::utils::{format_amount, generate_id};
use super::OperationLog;

/// Trade parameters fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapSettings {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount_lamports: u64,
    pub slippage_bps: u16,
    pub min_balance_lamports: u64,
}

impl From<&Config> for SwapSettings {
    fn from(config: &Config) -> Self {
        Self {
            input_mint: config.input_mint,
            output_mint: config.output_mint,
            amount_lamports: config.amount_lamports,
            slippage_bps: config.slippage_bps,
            min_balance_lamports: config.min_balance_lamports,
        }
    }
}

/// Decode an aggregator-built transaction from base64
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, SwapError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| SwapError::InvalidTransaction(format!("Failed to decode transaction: {}", e)))?;

    bincode::deserialize(&bytes)
        .map_err(|e| SwapError::InvalidTransaction(format!("Failed to deserialize transaction: {}", e)))
}

/// Runs one swap at a time against the configured aggregator and ledger
pub struct SwapExecutor {
    ledger: Arc<dyn LedgerClient>,
    aggregator: Arc<dyn SwapAggregator>,
    wallet: Arc<Wallet>,
    settings: SwapSettings,
}

impl SwapExecutor {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        aggregator: Arc<dyn SwapAggregator>,
        wallet: Arc<Wallet>,
        settings: SwapSettings,
    ) -> Self {
        Self {
            ledger,
            aggregator,
            wallet,
            settings,
        }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn settings(&self) -> &SwapSettings {
        &self.settings
    }

    /// Execute one swap. Failures never escape; they are reported in the outcome.
    pub async fn execute(&self) -> SwapOutcome {
        let span = info_span!("swap", run_id = %generate_id());

        async {
            let mut log = OperationLog::new();
            match self.run(&mut log).await {
                Ok(signature) => SwapOutcome::succeeded(signature.to_string(), log.into_lines()),
                Err(e) => {
                    let message = e.to_string();
                    log.push_error(format!("Error: {}", message));
                    SwapOutcome::failed(message, log.into_lines())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, log: &mut OperationLog) -> Result<Signature, SwapError> {
        let payer = self.wallet.pubkey();

        // 1. Balance gate
        let balance = self.ledger.get_balance(&payer).await?;
        log.push(format!("Balance: {} SOL", format_amount(balance, 9)));

        if balance < self.settings.min_balance_lamports {
            return Err(SwapError::InsufficientBalance {
                balance,
                minimum: self.settings.min_balance_lamports,
            });
        }

        // 2. Quote
        let request = QuoteRequest {
            input_mint: self.settings.input_mint.to_string(),
            output_mint: self.settings.output_mint.to_string(),
            amount: self.settings.amount_lamports,
            slippage_bps: self.settings.slippage_bps,
        };
        let quote = self.aggregator.get_quote(&request).await?;
        log.push(format!("Quote Data: {}", quote));

        // 3. Prebuilt swap transaction
        let swap = self.aggregator.build_swap_transaction(&quote, &payer).await?;
        let encoded = swap
            .swap_transaction()
            .ok_or_else(|| SwapError::InvalidTransaction("Response has no swapTransaction".to_string()))?;
        log.push(format!("Swap Transaction: {}", encoded));

        let transaction = decode_transaction(encoded)?;

        // 4. Fresh blockhash, then sign
        let reference = self.ledger.get_latest_blockhash().await?;
        log.push(format!("Updated Blockhash: {}", reference));

        let mut message = transaction.message;
        message.set_recent_blockhash(reference.blockhash);
        let signed = self.wallet.sign_transaction(message)?;

        // 5. Broadcast
        log.push("Please wait, the process has started...");
        let signature = self.ledger.send_transaction(&signed, SendPolicy::default()).await?;

        // 6. Confirmation
        log.push("Confirming transaction...");
        self.ledger
            .confirm_transaction(&signature, CommitmentLevel::Processed)
            .await?;
        log.push(format!("Transaction {} has been confirmed.", signature));

        Ok(signature)
    }
}
