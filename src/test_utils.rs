// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared test doubles: a recording chain RPC, an in-process Solana JSON-RPC
//! node and an in-process Lulo server.

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use base64ct::{Base64, Encoding};
use serde_json::{json, Value};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::VersionedTransaction,
};

use crate::{
    agent::Agent,
    blockchain::{ChainRpc, SolanaClientError, Token},
    providers::{LendingAccountDetails, LendingSettings, LuloClient},
};

/// Chain RPC double that serves canned reads and records submissions.
pub struct MockRpc {
    pub native_lamports: u64,
    /// Account -> owning program. Registry mints start out owned by SPL Token.
    pub account_owners: HashMap<Pubkey, Pubkey>,
    /// Token account -> UI amount. Absent keys model missing accounts.
    pub token_balances: HashMap<Pubkey, Option<f64>>,
    pub priority_fees: Vec<u64>,
    pub submit_signature: Signature,
    pub fail_reads: bool,
    pub fail_submit: bool,
    pub(crate) fee_calls: AtomicUsize,
    pub(crate) submitted: Mutex<Vec<VersionedTransaction>>,
}

impl Default for MockRpc {
    fn default() -> Self {
        Self {
            native_lamports: 0,
            account_owners: Token::ALL
                .into_iter()
                .map(|token| (token.mint(), spl_token::ID))
                .collect(),
            token_balances: HashMap::new(),
            priority_fees: Vec::new(),
            submit_signature: Signature::from([7u8; 64]),
            fail_reads: false,
            fail_submit: false,
            fee_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

impl MockRpc {
    pub fn with_mint(mut self, mint: Pubkey, token_program: Pubkey) -> Self {
        self.account_owners.insert(mint, token_program);
        self
    }

    pub fn with_token_balance(mut self, token_account: Pubkey, ui_amount: Option<f64>) -> Self {
        self.token_balances.insert(token_account, ui_amount);
        self
    }

    pub fn fee_requests(&self) -> usize {
        self.fee_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<VersionedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), SolanaClientError> {
        if self.fail_reads {
            Err(SolanaClientError::RpcError("mock rpc unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn native_balance(&self, _owner: &Pubkey) -> Result<u64, SolanaClientError> {
        self.check_reads()?;
        Ok(self.native_lamports)
    }

    async fn account_owner(&self, account: &Pubkey) -> Result<Option<Pubkey>, SolanaClientError> {
        self.check_reads()?;
        Ok(self.account_owners.get(account).copied())
    }

    async fn token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<Option<f64>, SolanaClientError> {
        self.check_reads()?;
        Ok(self.token_balances.get(token_account).copied().flatten())
    }

    async fn recent_prioritization_fees(&self) -> Result<Vec<u64>, SolanaClientError> {
        self.fee_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        Ok(self.priority_fees.clone())
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Signature, SolanaClientError> {
        if self.fail_submit {
            return Err(SolanaClientError::TransactionFailed(
                "mock rpc rejected transaction".to_string(),
            ));
        }
        self.submitted.lock().unwrap().push(transaction.clone());
        Ok(self.submit_signature)
    }
}

/// Build an agent over `rpc` and a Lulo client pointed at `lulo_url`.
pub fn test_agent(wallet: Keypair, rpc: MockRpc, lulo_url: &str) -> (Agent, Arc<MockRpc>) {
    let rpc = Arc::new(rpc);
    let lulo = LuloClient::new(lulo_url, Duration::from_secs(5)).unwrap();
    (Agent::new(wallet, rpc.clone(), lulo), rpc)
}

/// Canned Solana JSON-RPC node serving `getAccountInfo` and
/// `getTokenAccountBalance`. `start` serves it on an ephemeral local port and
/// returns the RPC URL.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    /// Account -> owning program. Absent keys model missing accounts.
    pub accounts: HashMap<Pubkey, Pubkey>,
    /// Token account -> UI amount
    pub token_balances: HashMap<Pubkey, f64>,
}

impl MockChain {
    pub fn with_account(mut self, account: Pubkey, owner: Pubkey) -> Self {
        self.accounts.insert(account, owner);
        self
    }

    pub fn with_token_account(
        mut self,
        account: Pubkey,
        token_program: Pubkey,
        ui_amount: f64,
    ) -> Self {
        self.accounts.insert(account, token_program);
        self.token_balances.insert(account, ui_amount);
        self
    }

    pub async fn start(self) -> String {
        let app = Router::new()
            .fallback(json_rpc)
            .with_state(Arc::new(self));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

async fn json_rpc(State(chain): State<Arc<MockChain>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let key = request["params"][0]
        .as_str()
        .and_then(|key| Pubkey::from_str(key).ok());
    let context = json!({ "slot": 1 });

    let result = match request["method"].as_str() {
        Some("getAccountInfo") => {
            let value = key.and_then(|key| chain.accounts.get(&key)).map(|owner| {
                json!({
                    "data": ["", "base64"],
                    "executable": false,
                    "lamports": 2_039_280u64,
                    "owner": owner.to_string(),
                    "rentEpoch": 0,
                    "space": 0
                })
            });
            json!({ "context": context, "value": value })
        }
        Some("getTokenAccountBalance") => {
            match key.and_then(|key| chain.token_balances.get(&key)) {
                Some(ui_amount) => json!({
                    "context": context,
                    "value": {
                        "amount": ((ui_amount * 1e6) as u64).to_string(),
                        "decimals": 6,
                        "uiAmount": ui_amount,
                        "uiAmountString": ui_amount.to_string()
                    }
                }),
                None => {
                    return Json(json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": {
                            "code": -32602,
                            "message": "Invalid param: could not find account"
                        }
                    }))
                }
            }
        }
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "Method not found" }
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

/// A single-signer transaction paid by `payer`, with an empty signature slot.
pub fn unsigned_transaction(payer: &Pubkey) -> VersionedTransaction {
    let instruction = Instruction::new_with_bytes(
        Pubkey::new_unique(),
        &[1, 2, 3],
        vec![AccountMeta::new(*payer, true)],
    );
    let message = Message::new(&[instruction], Some(payer));
    let slots = usize::from(message.header.num_required_signatures);

    VersionedTransaction {
        signatures: vec![Signature::default(); slots],
        message: VersionedMessage::Legacy(message),
    }
}

/// Wire encoding Lulo uses for generated transactions.
pub fn encode_transaction(transaction: &VersionedTransaction) -> String {
    Base64::encode_string(&bincode::serialize(transaction).unwrap())
}

pub fn sample_account_details() -> LendingAccountDetails {
    LendingAccountDetails {
        total_value: 1_250.5,
        interest_earned: 12.25,
        realtime_apy: 8.1,
        settings: LendingSettings {
            owner: "owner".to_string(),
            allowed_protocols: None,
            homebase: Some("kamino".to_string()),
            minimum_rate: "0.5".to_string(),
        },
    }
}

/// A request captured by the mock Lulo server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Canned Lulo responses. `start` serves them on an ephemeral local port.
#[derive(Debug, Clone)]
pub struct MockLulo {
    /// Base64 transaction returned by the generate endpoints
    pub transaction: String,
    /// Replaces the whole generate response when set
    pub generate_body: Option<Value>,
    pub account_body: Value,
    pub status: StatusCode,
}

impl Default for MockLulo {
    fn default() -> Self {
        Self {
            transaction: String::new(),
            generate_body: None,
            account_body: json!({ "data": sample_account_details() }),
            status: StatusCode::OK,
        }
    }
}

#[derive(Clone)]
struct MockLuloState {
    responses: Arc<MockLulo>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockLuloServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockLuloServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl MockLulo {
    pub async fn start(self) -> MockLuloServer {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockLuloState {
            responses: Arc::new(self),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockLuloServer {
            base_url: format!("http://{addr}"),
            requests,
        }
    }
}

async fn record(
    State(state): State<MockLuloState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let responses = &state.responses;
    let payload = if uri.path().starts_with("/generate/") {
        responses.generate_body.clone().unwrap_or_else(|| {
            json!({ "data": { "transactionMeta": [{ "transaction": responses.transaction }] } })
        })
    } else {
        responses.account_body.clone()
    };

    (responses.status, Json(payload)).into_response()
}
