//! Common types used across the application

use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use std::fmt;

/// Quote returned by the aggregator.
///
/// Kept opaque: it is forwarded verbatim into the swap-build request and only
/// rendered for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quote(serde_json::Value);

impl Quote {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body returned by the aggregator's swap-build endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapBuildResponse(serde_json::Value);

impl SwapBuildResponse {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Base64 encoded transaction prepared by the aggregator
    pub fn swap_transaction(&self) -> Option<&str> {
        self.0.get("swapTransaction").and_then(|v| v.as_str())
    }
}

/// Trade parameters sent to the quote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Latest blockhash together with the height it stays valid until
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockReference {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

impl fmt::Display for BlockReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"blockhash\":\"{}\",\"lastValidBlockHeight\":{}}}",
            self.blockhash, self.last_valid_block_height
        )
    }
}

/// Submission policy passed through to the RPC node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendPolicy {
    pub skip_preflight: bool,
    pub max_retries: usize,
}

impl Default for SendPolicy {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            max_retries: 2,
        }
    }
}

/// Result of one swap run, serialized as the `/swap` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub logs: Vec<String>,
}

impl SwapOutcome {
    pub fn succeeded(txid: String, logs: Vec<String>) -> Self {
        Self {
            success: true,
            txid: Some(txid),
            error: None,
            logs,
        }
    }

    pub fn failed(error: String, logs: Vec<String>) -> Self {
        Self {
            success: false,
            txid: None,
            error: Some(error),
            logs,
        }
    }
}
