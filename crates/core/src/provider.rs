//! Wallet capability provider: account authorization, transaction signing
//! and read calls.
//!
//! ## Architecture
//!
//! The provider is the only component that talks to the network.  It is
//! abstracted behind [`EthereumProvider`] so flows can run against a mock;
//! the production implementation, [`RpcProvider`], speaks JSON-RPC 2.0 over
//! HTTP to a wallet endpoint (a node with an unlocked signing account, or
//! any EIP-1193-compatible bridge).  The client never sees private keys;
//! signing and network selection stay on the provider side.

use std::future::Future;
use std::pin::Pin;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ClientError;

/// EIP-1193 error code for a user-rejected request.
const USER_REJECTED_REQUEST: i64 = 4001;

/// Boxed future returned by [`EthereumProvider`] methods.
pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Parameters for a state-changing transaction (`eth_sendTransaction`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    /// Attached value as a hex quantity; omitted for zero-value calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Hex-encoded calldata.
    pub data: String,
}

/// Parameters for a read-only call (`eth_call`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRequest {
    pub to: String,
    /// Hex-encoded calldata.
    pub data: String,
}

/// Abstraction over the wallet provider for testability.
///
/// Every invocation round-trips to the provider; nothing is cached here.
pub trait EthereumProvider: Send + Sync + 'static {
    /// Request account authorization.  May prompt the user on the wallet
    /// side; a rejection resolves to [`ClientError::AuthorizationRejected`].
    fn request_accounts(&self) -> ProviderFuture<'_, Vec<String>>;

    /// Submit a state-changing transaction; resolves to the transaction
    /// hash once the provider has signed and broadcast it.
    fn send_transaction(&self, tx: TransactionRequest) -> ProviderFuture<'_, String>;

    /// Issue a read-only call; resolves to the raw return data.
    fn call(&self, req: CallRequest) -> ProviderFuture<'_, Vec<u8>>;
}

// =============================================================================
// Production: RpcProvider
// =============================================================================

/// JSON-RPC 2.0 wallet provider over HTTP.
pub struct RpcProvider {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, "JSON-RPC request");

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            if err.code == USER_REJECTED_REQUEST {
                return Err(ClientError::AuthorizationRejected);
            }
            return Err(ClientError::Remote {
                code: err.code,
                message: err.message,
            });
        }
        response.result.ok_or_else(|| {
            ClientError::Decode("JSON-RPC response carried neither result nor error".into())
        })
    }
}

impl EthereumProvider for RpcProvider {
    fn request_accounts(&self) -> ProviderFuture<'_, Vec<String>> {
        Box::pin(async move {
            let result = self.request("eth_requestAccounts", json!([])).await?;
            serde_json::from_value(result)
                .map_err(|e| ClientError::Decode(format!("account list: {e}")))
        })
    }

    fn send_transaction(&self, tx: TransactionRequest) -> ProviderFuture<'_, String> {
        Box::pin(async move {
            let result = self.request("eth_sendTransaction", json!([tx])).await?;
            serde_json::from_value(result)
                .map_err(|e| ClientError::Decode(format!("transaction hash: {e}")))
        })
    }

    fn call(&self, req: CallRequest) -> ProviderFuture<'_, Vec<u8>> {
        Box::pin(async move {
            let result = self.request("eth_call", json!([req, "latest"])).await?;
            let payload: String = serde_json::from_value(result)
                .map_err(|e| ClientError::Decode(format!("call result: {e}")))?;
            decode_hex_payload(&payload)
        })
    }
}

fn decode_hex_payload(payload: &str) -> Result<Vec<u8>, ClientError> {
    let stripped = payload.strip_prefix("0x").unwrap_or(payload);
    hex::decode(stripped).map_err(|e| ClientError::Decode(format!("return data: {e}")))
}

// =============================================================================
// Mock: MockProvider (test / testing feature)
// =============================================================================

/// In-memory provider with canned responses and per-method call counters.
#[cfg(any(test, feature = "testing"))]
pub struct MockProvider {
    accounts: Vec<String>,
    call_result: Vec<u8>,
    reject_authorization: bool,
    fail_send: bool,
    fail_call: bool,
    account_requests: AtomicUsize,
    sends: AtomicUsize,
    calls: AtomicUsize,
    sent: Mutex<Vec<TransactionRequest>>,
}

#[cfg(any(test, feature = "testing"))]
impl MockProvider {
    pub fn new(accounts: &[&str]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            call_result: Vec::new(),
            reject_authorization: false,
            fail_send: false,
            fail_call: false,
            account_requests: AtomicUsize::new(0),
            sends: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Return `data` from every read call.
    pub fn with_call_result(mut self, data: Vec<u8>) -> Self {
        self.call_result = data;
        self
    }

    /// Reject the authorization prompt.
    pub fn rejecting_authorization(mut self) -> Self {
        self.reject_authorization = true;
        self
    }

    /// Fail every transaction submission (as a contract revert).
    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Fail every read call.
    pub fn failing_call(mut self) -> Self {
        self.fail_call = true;
        self
    }

    pub fn account_request_count(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All transactions submitted so far, in order.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn revert() -> ClientError {
        ClientError::Remote {
            code: -32000,
            message: "execution reverted".into(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl EthereumProvider for MockProvider {
    fn request_accounts(&self) -> ProviderFuture<'_, Vec<String>> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        if self.reject_authorization {
            return Box::pin(async { Err(ClientError::AuthorizationRejected) });
        }
        let accounts = self.accounts.clone();
        Box::pin(async move { Ok(accounts) })
    }

    fn send_transaction(&self, tx: TransactionRequest) -> ProviderFuture<'_, String> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.fail_send {
            return Box::pin(async { Err(Self::revert()) });
        }
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).push(tx);
        Box::pin(async { Ok("0xmocktxhash".to_string()) })
    }

    fn call(&self, _req: CallRequest) -> ProviderFuture<'_, Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_call {
            return Box::pin(async { Err(Self::revert()) });
        }
        let result = self.call_result.clone();
        Box::pin(async move { Ok(result) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httptest::{matchers::request, responders::json_encoded, Expectation, Server};

    fn provider_for(server: &Server) -> RpcProvider {
        RpcProvider::new(server.url_str("/"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_call_decodes_hex_result() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/")).respond_with(json_encoded(
                json!({"jsonrpc": "2.0", "id": 1, "result": "0x1234"}),
            )),
        );
        let provider = provider_for(&server);
        let data = provider
            .call(CallRequest {
                to: "0xef48eb47752dcd2d7bb8fb2c2889ae11a4ca39df".into(),
                data: "0x".into(),
            })
            .await
            .unwrap();
        assert_eq!(data, vec![0x12, 0x34]);
    }

    #[tokio::test]
    async fn test_request_accounts_maps_user_rejection() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/")).respond_with(json_encoded(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": 4001, "message": "User rejected the request."}
                }),
            )),
        );
        let provider = provider_for(&server);
        let err = provider.request_accounts().await.unwrap_err();
        assert!(matches!(err, ClientError::AuthorizationRejected));
    }

    #[tokio::test]
    async fn test_remote_errors_carry_code_and_message() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/")).respond_with(json_encoded(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": -32601, "message": "method not found"}
                }),
            )),
        );
        let provider = provider_for(&server);
        let err = provider
            .send_transaction(TransactionRequest {
                from: "0xabc".into(),
                to: "0xdef".into(),
                value: None,
                data: "0x3ccfd60b".into(),
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Remote { code, message } => {
                assert_eq!(code, -32601);
                assert_eq!(message, "method not found");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_transaction_request_omits_empty_value() {
        let tx = TransactionRequest {
            from: "0xabc".into(),
            to: "0xdef".into(),
            value: None,
            data: "0x3ccfd60b".into(),
        };
        let serialized = serde_json::to_value(&tx).unwrap();
        assert!(serialized.get("value").is_none());

        let paid = TransactionRequest {
            value: Some("0x14d1120d7b160000".into()),
            ..tx
        };
        let serialized = serde_json::to_value(&paid).unwrap();
        assert_eq!(serialized["value"], "0x14d1120d7b160000");
    }

    #[test]
    fn test_decode_hex_payload_accepts_bare_and_prefixed() {
        assert_eq!(decode_hex_payload("0xff00").unwrap(), vec![0xff, 0x00]);
        assert_eq!(decode_hex_payload("ff00").unwrap(), vec![0xff, 0x00]);
        assert!(decode_hex_payload("0xzz").is_err());
    }
}
