//! JSON-RPC 2.0 wallet provider over HTTP.
//!
//! Talks to a dev node (anvil, hardhat) whose unlocked accounts play the
//! role of the wallet: the node resolves accounts, signs, and broadcasts.
//! HTTP transports deliver no push notifications, so subscriptions only
//! fire when the host injects events through [`HttpProvider::emit`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::provider::{
    EventReceiver, ProviderError, RpcErrorObject, TxReceipt, WalletEvent, WalletProvider,
};

/// EIP-1193 code for a user-rejected request.
const USER_REJECTED: i64 = 4001;

/// JSON-RPC code for an unknown method.
const METHOD_NOT_FOUND: i64 = -32601;

/// Selector of the solidity `Error(string)` revert payload: `0x08c379a0`.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A JSON-RPC 2.0 client implementing the wallet provider boundary.
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
    listeners: Mutex<Vec<mpsc::UnboundedSender<WalletEvent>>>,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Delivers a wallet event to every live subscriber.
    ///
    /// HTTP has no push channel, so account/network changes must be injected
    /// by whatever drives this provider (a polling loop or the host shell).
    pub fn emit(&self, event: WalletEvent) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(format!("unreadable response: {e}")))?;

        if let Some(error) = response.error {
            return Err(ProviderError::Rpc(decode_rpc_error(error)));
        }

        response
            .result
            .ok_or_else(|| ProviderError::Transport("response carries no result".into()))
    }
}

#[async_trait]
impl WalletProvider for HttpProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        // Wallet-style providers expose eth_requestAccounts; plain nodes
        // only know eth_accounts.
        let result = match self.request("eth_requestAccounts", json!([])).await {
            Err(ProviderError::Rpc(err)) if err.code == USER_REJECTED => {
                return Err(ProviderError::AuthorizationDenied);
            }
            Err(ProviderError::Rpc(err)) if err.code == METHOD_NOT_FOUND => {
                self.request("eth_accounts", json!([])).await?
            }
            other => other?,
        };

        decode_string_array(&result)
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let params = json!([
            { "to": to, "data": hex_prefixed(&data) },
            "latest",
        ]);
        let result = self.request("eth_call", params).await?;
        decode_hex_bytes(&result)
    }

    async fn send_transaction(
        &self,
        from: &str,
        to: Option<&str>,
        data: Vec<u8>,
    ) -> Result<String, ProviderError> {
        let mut tx = json!({ "from": from, "data": hex_prefixed(&data) });
        if let Some(to) = to {
            tx["to"] = json!(to);
        }

        let result = self.request("eth_sendTransaction", json!([tx])).await?;
        result
            .as_str()
            .map(String::from)
            .ok_or_else(|| ProviderError::Transport("transaction hash is not a string".into()))
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TxReceipt, ProviderError> {
        // Poll until mined. No timeout: a hung node hangs the caller, and
        // every retry policy lives with the user.
        loop {
            let result = self
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            if result.is_null() {
                tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
                continue;
            }

            let raw: RawReceipt = serde_json::from_value(result)
                .map_err(|e| ProviderError::Transport(format!("malformed receipt: {e}")))?;
            return Ok(raw.into());
        }
    }

    fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RawRpcError>,
}

#[derive(Debug, Deserialize)]
struct RawRpcError {
    code: i64,
    message: Option<String>,
    data: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    status: Option<String>,
    contract_address: Option<String>,
}

impl From<RawReceipt> for TxReceipt {
    fn from(raw: RawReceipt) -> Self {
        // Missing status (pre-Byzantium encoding) is treated as success.
        let status = raw.status.as_deref().map(|s| s != "0x0").unwrap_or(true);
        TxReceipt {
            tx_hash: raw.transaction_hash,
            status,
            contract_address: raw.contract_address,
        }
    }
}

/// Maps a raw JSON-RPC error object to the structured provider error shape.
///
/// Nodes disagree on where revert details live: hardhat nests a message
/// under `data.message`, geth returns the raw revert payload as a hex string
/// in `data`. Both are extracted when present.
fn decode_rpc_error(raw: RawRpcError) -> RpcErrorObject {
    let data_message = raw
        .data
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .map(String::from);

    let revert_payload = match raw.data.as_ref() {
        Some(Value::String(hex_data)) => Some(hex_data.as_str()),
        Some(Value::Object(obj)) => obj.get("data").and_then(Value::as_str),
        _ => None,
    };
    let reason = revert_payload.and_then(decode_revert_reason);

    RpcErrorObject {
        code: raw.code,
        message: raw.message,
        data_message,
        reason,
    }
}

/// Decodes the string out of an ABI-encoded `Error(string)` revert payload.
fn decode_revert_reason(hex_data: &str) -> Option<String> {
    let bytes = hex::decode(hex_data.strip_prefix("0x")?).ok()?;
    // selector (4) + offset word (32) + length word (32)
    if bytes.len() < 68 || bytes[..4] != ERROR_STRING_SELECTOR {
        return None;
    }

    let len = u64::from_be_bytes(bytes[60..68].try_into().ok()?) as usize;
    let reason = bytes.get(68..68 + len)?;
    String::from_utf8(reason.to_vec()).ok()
}

fn hex_prefixed(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn decode_hex_bytes(value: &Value) -> Result<Vec<u8>, ProviderError> {
    let text = value
        .as_str()
        .ok_or_else(|| ProviderError::Transport("expected a hex string".into()))?;
    hex::decode(text.strip_prefix("0x").unwrap_or(text))
        .map_err(|e| ProviderError::Transport(format!("invalid hex in response: {e}")))
}

fn decode_string_array(value: &Value) -> Result<Vec<String>, ProviderError> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .ok_or_else(|| ProviderError::Transport("expected an array of accounts".into()))
}
