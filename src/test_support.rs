//! Fakes shared by the unit tests

use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use solana_sdk::{
    commitment_config::CommitmentLevel,
    hash::Hash,
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    system_instruction,
    transaction::VersionedTransaction,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::exchanges::api_clients::SwapAggregator;
use crate::infrastructure::blockchain::LedgerClient;
use crate::shared::errors::SwapError;
use crate::shared::types::{BlockReference, Quote, QuoteRequest, SendPolicy, SwapBuildResponse};

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Canned replies for a fake JSON-RPC node, keyed by method
#[derive(Debug, Clone, Default)]
pub struct RpcScript {
    replies: HashMap<String, Value>,
}

impl RpcScript {
    /// Script that already answers `getVersion`
    pub fn new() -> Self {
        Self::default().on("getVersion", json!({ "solana-core": "2.1.14", "feature-set": 1 }))
    }

    pub fn on(mut self, method: &str, result: Value) -> Self {
        self.replies.insert(method.to_string(), json!({ "result": result }));
        self
    }

    pub fn on_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies
            .insert(method.to_string(), json!({ "error": { "code": code, "message": message } }));
        self
    }
}

/// Requests received by the fake node
#[derive(Debug, Clone, Default)]
pub struct RpcCalls(Arc<Mutex<Vec<(String, Value)>>>);

impl RpcCalls {
    pub fn count(&self, method: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params(&self, method: &str) -> Option<Value> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
    }
}

async fn json_rpc_handler(
    State((script, calls)): State<(Arc<RpcScript>, RpcCalls)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let method = body["method"].as_str().unwrap_or_default().to_string();
    calls.0.lock().unwrap().push((method.clone(), body["params"].clone()));

    let mut reply = script
        .replies
        .get(&method)
        .cloned()
        .unwrap_or_else(|| json!({ "error": { "code": -32601, "message": "Method not found" } }));
    reply["jsonrpc"] = json!("2.0");
    reply["id"] = body["id"].clone();
    Json(reply)
}

pub async fn spawn_json_rpc(script: RpcScript) -> (String, RpcCalls) {
    let calls = RpcCalls::default();
    let router = Router::new()
        .route("/", post(json_rpc_handler))
        .with_state((Arc::new(script), calls.clone()));
    (spawn_server(router).await, calls)
}

/// Base64 transaction shaped like an aggregator response: unsigned, stale blockhash
pub fn unsigned_swap_transaction(payer: &Pubkey) -> String {
    let ix = system_instruction::transfer(payer, &Pubkey::new_unique(), 1_000);
    let message = Message::new_with_blockhash(&[ix], Some(payer), &Hash::default());
    let tx = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    general_purpose::STANDARD.encode(bincode::serialize(&tx).unwrap())
}

/// In-memory ledger with call recording
pub struct MockLedger {
    pub balance: u64,
    pub blockhash: BlockReference,
    pub send_result: Result<Signature, SwapError>,
    pub confirm_result: Result<(), SwapError>,
    pub confirm_delay: Duration,
    pub balance_calls: AtomicUsize,
    pub sent: Mutex<Vec<(VersionedTransaction, SendPolicy)>>,
    pub confirmations: Mutex<Vec<(Signature, CommitmentLevel)>>,
    pub events: Mutex<Vec<&'static str>>,
}

impl MockLedger {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            blockhash: BlockReference {
                blockhash: Hash::new_unique(),
                last_valid_block_height: 1_000,
            },
            send_result: Ok(Signature::new_unique()),
            confirm_result: Ok(()),
            confirm_delay: Duration::ZERO,
            balance_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Ledger whose confirmations take `delay` to land
    pub fn with_confirm_delay(balance: u64, delay: Duration) -> Self {
        Self {
            confirm_delay: delay,
            ..Self::new(balance)
        }
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, SwapError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("balance");
        Ok(self.balance)
    }

    async fn get_latest_blockhash(&self) -> Result<BlockReference, SwapError> {
        Ok(self.blockhash)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction, policy: SendPolicy) -> Result<Signature, SwapError> {
        self.sent.lock().unwrap().push((transaction.clone(), policy));
        self.send_result.clone()
    }

    async fn confirm_transaction(&self, signature: &Signature, commitment: CommitmentLevel) -> Result<(), SwapError> {
        self.events.lock().unwrap().push("confirm started");
        self.confirmations.lock().unwrap().push((*signature, commitment));
        if !self.confirm_delay.is_zero() {
            tokio::time::sleep(self.confirm_delay).await;
        }
        self.events.lock().unwrap().push("confirmed");
        self.confirm_result.clone()
    }
}

/// Aggregator returning canned payloads
pub struct MockAggregator {
    pub quote_result: Result<Quote, SwapError>,
    pub swap_result: Result<SwapBuildResponse, SwapError>,
    pub quote_calls: AtomicUsize,
    pub swap_calls: AtomicUsize,
    pub last_request: Mutex<Option<QuoteRequest>>,
    pub last_user: Mutex<Option<Pubkey>>,
}

impl MockAggregator {
    /// Aggregator that builds a valid transaction paid by `payer`
    pub fn succeeding(payer: &Pubkey) -> Self {
        Self {
            quote_result: Ok(Quote::new(json!({ "inAmount": "10000000", "outAmount": "1500000" }))),
            swap_result: Ok(SwapBuildResponse::new(json!({
                "swapTransaction": unsigned_swap_transaction(payer),
                "lastValidBlockHeight": 1_000,
            }))),
            quote_calls: AtomicUsize::new(0),
            swap_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_user: Mutex::new(None),
        }
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn swap_calls(&self) -> usize {
        self.swap_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SwapAggregator for MockAggregator {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, SwapError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.quote_result.clone()
    }

    async fn build_swap_transaction(&self, _quote: &Quote, user: &Pubkey) -> Result<SwapBuildResponse, SwapError> {
        self.swap_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user.lock().unwrap() = Some(*user);
        self.swap_result.clone()
    }
}
