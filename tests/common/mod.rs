//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{keccak256, Bytes, TxHash};
use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use faucet_dispenser::blockchain::types::ChainId;
use faucet_dispenser::blockchain::{
    BlockchainError, BlockchainResult, Network, NetworkId, NetworkRegistry, TransactionSender,
};
use faucet_dispenser::config::{FaucetConfig, NetworkConfig, Secrets};
use faucet_dispenser::cooldown::CooldownTracker;
use faucet_dispenser::http::{AppState, HttpServer};
use faucet_dispenser::{Dispenser, Shutdown};

pub const BOT_TOKEN: &str = "test-bot-token";
pub const ADMIN_KEY: &str = "test-admin-key";
/// Anvil's first dev account.
pub const CUSTODY_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const CUSTODY_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const DESTINATION: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub fn secrets() -> Secrets {
    Secrets {
        private_key: CUSTODY_KEY.to_string(),
        bot_token: BOT_TOKEN.to_string(),
        admin_key: Some(ADMIN_KEY.to_string()),
    }
}

pub fn network(id: NetworkId, chain_id: u64) -> Network {
    Network {
        id,
        rpc_url: "http://127.0.0.1:9".to_string(),
        failover_urls: Vec::new(),
        chain_id: ChainId(chain_id),
        symbol: id.default_symbol().to_string(),
        rpc_timeout_secs: 2,
    }
}

pub fn network_config(id: NetworkId, rpc_url: &str, chain_id: u64) -> NetworkConfig {
    NetworkConfig {
        id,
        rpc_url: rpc_url.to_string(),
        failover_urls: Vec::new(),
        chain_id,
        symbol: None,
        rpc_timeout_secs: 2,
    }
}

/// Sender that answers from a script and counts calls.
#[derive(Default)]
pub struct FakeSender {
    pub calls: AtomicUsize,
    pub failure: Mutex<Option<BlockchainError>>,
    pub delay: Option<Duration>,
}

impl FakeSender {
    pub fn failing(err: BlockchainError) -> Self {
        Self {
            failure: Mutex::new(Some(err)),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failure(&self, err: Option<BlockchainError>) {
        *self.failure.lock().unwrap() = err;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSender for FakeSender {
    async fn send(&self, _network: &Network, _destination: &str) -> BlockchainResult<TxHash> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(TxHash::with_last_byte(n as u8 + 1))
    }
}

/// A faucet served on an ephemeral port.
pub struct TestFaucet {
    pub base_url: String,
    pub dispenser: Dispenser,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<()>,
}

impl TestFaucet {
    pub fn client(&self) -> faucet_sdk::FaucetClient {
        faucet_sdk::FaucetClient::new(&self.base_url, BOT_TOKEN)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Serve `dispenser` with admin enabled.
pub async fn serve(dispenser: Dispenser) -> TestFaucet {
    let mut config = FaucetConfig::default();
    config.admin.enabled = true;
    serve_with_config(dispenser, config).await
}

pub async fn serve_with_config(dispenser: Dispenser, config: FaucetConfig) -> TestFaucet {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, AppState::new(dispenser.clone(), "0.1", &secrets()));
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    TestFaucet {
        base_url,
        dispenser,
        shutdown,
        handle,
    }
}

/// Serve a faucet for Bera and Sepolia backed by `sender`.
pub async fn spawn_faucet(sender: Arc<dyn TransactionSender>) -> TestFaucet {
    serve(dispenser(sender)).await
}

pub fn dispenser(sender: Arc<dyn TransactionSender>) -> Dispenser {
    let registry = NetworkRegistry::new([
        network(NetworkId::Bera, 80084),
        network(NetworkId::Sepolia, 11155111),
    ]);
    Dispenser::new(Arc::new(registry), CooldownTracker::default(), sender)
}

/// In-memory JSON-RPC node answering the calls a dispensation makes.
pub struct MockChain {
    pub chain_id: u64,
    pub nonce: AtomicU64,
    pub reject: Mutex<Option<String>>,
    /// Accept submissions, then hold the answer back this long.
    pub stall_submit: Mutex<Option<Duration>>,
    pub submitted: Mutex<Vec<Bytes>>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            chain_id,
            nonce: AtomicU64::new(0),
            reject: Mutex::new(None),
            stall_submit: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn submitted(&self) -> Vec<Bytes> {
        self.submitted.lock().unwrap().clone()
    }
}

/// Start `chain` on an ephemeral port and return its URL.
pub async fn start_mock_rpc(chain: Arc<MockChain>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new().route("/", post(rpc_handler)).with_state(chain);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    url
}

async fn rpc_handler(State(chain): State<Arc<MockChain>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default();

    let result = match method {
        "eth_chainId" => json!(format!("0x{:x}", chain.chain_id)),
        "eth_blockNumber" => json!("0x10"),
        "eth_gasPrice" => json!("0x3b9aca00"),
        "eth_getTransactionCount" => json!(format!("0x{:x}", chain.nonce.load(Ordering::SeqCst))),
        "eth_sendRawTransaction" => {
            if let Some(reason) = chain.reject.lock().unwrap().clone() {
                return Json(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": { "code": -32000, "message": reason }
                }));
            }
            let raw: Bytes = req["params"][0].as_str().unwrap_or_default().parse().unwrap();
            let hash = keccak256(&raw);
            chain.submitted.lock().unwrap().push(raw);
            chain.nonce.fetch_add(1, Ordering::SeqCst);
            let stall = *chain.stall_submit.lock().unwrap();
            if let Some(stall) = stall {
                tokio::time::sleep(stall).await;
            }
            json!(hash)
        }
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "method not found" }
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}
