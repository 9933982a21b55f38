pub mod jupiter_client;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::shared::errors::SwapError;
use crate::shared::types::{Quote, QuoteRequest, SwapBuildResponse};

pub use jupiter_client::JupiterClient;

/// Swap aggregator API: quoting and prebuilt swap transactions
#[async_trait]
pub trait SwapAggregator: Send + Sync {
    /// Fetch a quote for the given trade
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, SwapError>;

    /// Build a swap transaction for `quote`, to be signed by `user_public_key`
    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &Pubkey,
    ) -> Result<SwapBuildResponse, SwapError>;
}
