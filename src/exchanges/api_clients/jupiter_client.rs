use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tracing::{debug, warn};

use crate::shared::errors::{AppError, SwapError};
use crate::shared::types::{Quote, QuoteRequest, SwapBuildResponse};
use super::SwapAggregator;

/// Тело запроса к Jupiter swap endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapRequest<'a> {
    quote_response: &'a Quote,
    user_public_key: String,
    wrap_and_unwrap_sol: bool,
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Jupiter Quote/Swap API клиент
pub struct JupiterClient {
    http_client: Client,
    quote_url: String,
    swap_url: String,
}

impl JupiterClient {
    pub fn new(quote_url: String, swap_url: String) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build Jupiter client: {}", e)))?;

        Ok(Self {
            http_client,
            quote_url,
            swap_url,
        })
    }
}

#[async_trait]
impl SwapAggregator for JupiterClient {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, SwapError> {
        debug!("🔍 Fetching Jupiter quote from: {}", self.quote_url);

        let response = self
            .http_client
            .get(&self.quote_url)
            .query(&[
                ("inputMint", request.input_mint.clone()),
                ("outputMint", request.output_mint.clone()),
                ("amount", request.amount.to_string()),
                ("slippageBps", request.slippage_bps.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SwapError::QuoteFetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ Jupiter quote API returned status: {}", status);
            return Err(SwapError::QuoteFetchFailed(status_text(status)));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SwapError::QuoteFetchFailed(format!("Invalid quote response: {}", e)))?;

        Ok(Quote::new(data))
    }

    async fn build_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &Pubkey,
    ) -> Result<SwapBuildResponse, SwapError> {
        debug!("🔍 Requesting Jupiter swap transaction from: {}", self.swap_url);

        let body = SwapRequest {
            quote_response: quote,
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: true,
        };

        let response = self
            .http_client
            .post(&self.swap_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SwapError::SwapBuildFailed {
                status: "request error".to_string(),
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ Jupiter swap API returned status: {}", status);
            return Err(SwapError::SwapBuildFailed {
                status: status_text(status),
                body,
            });
        }

        let data: serde_json::Value = response.json().await.map_err(|e| SwapError::SwapBuildFailed {
            status: status_text(status),
            body: format!("invalid JSON: {}", e),
        })?;

        Ok(SwapBuildResponse::new(data))
    }
}
