//! Ledger Gateway
//!
//! Thin request/response boundary around the ledger contract: a read-only
//! endpoint for view calls and a wallet-backed signing endpoint for
//! state-changing calls. No business logic lives here.
//!
//! Every `submit` is a single irreversible write attempt: the gateway never
//! retries a state-changing call, since ledger transactions are not safely
//! idempotent. Waiting for the receipt of an already-sent transaction is
//! confirmation, not a retry, and has no timeout in this layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::Address;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no signer attached; connect a wallet before submitting")]
    SigningUnavailable,

    #[error("wrong network: expected chain id {expected}, wallet is on {actual}")]
    NetworkMismatch { expected: u64, actual: u64 },

    /// The ledger reverted a call. The message is surfaced verbatim.
    #[error("{0}")]
    RemoteRejected(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Receipt status as reported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Pending,
    Confirmed,
    Reverted,
}

/// A confirmed write receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub status: ReceiptStatus,
    /// Return value of the contract method, when it has one (entity ids).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

/// Request/response boundary to the ledger contract.
///
/// `query` is safe to retry; `submit` is not. Implementations block the
/// caller of `submit` until the network confirms inclusion.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Read-only contract call against the query endpoint.
    async fn query(&self, method: &str, args: Vec<Value>) -> Result<Value, GatewayError>;

    /// State-changing contract call against the signing endpoint. Blocks
    /// until the transaction is confirmed or rejected.
    async fn submit(&self, method: &str, args: Vec<Value>) -> Result<TxReceipt, GatewayError>;

    /// The connected account, if a wallet is attached.
    fn signer(&self) -> Option<Address>;

    /// False while the contract address is a placeholder; callers must skip
    /// synchronization and disable writes.
    fn is_ready(&self) -> bool;
}

/// RPC request/response types
#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: String,
    id: u64,
    method: String,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    #[serde(flatten)]
    result: RpcResult,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RpcResult {
    Success { result: Value },
    Error { error: RpcError },
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[allow(dead_code)]
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct ReceiptResponse {
    status: ReceiptStatus,
    #[serde(default)]
    revert_reason: Option<String>,
    #[serde(default)]
    return_value: Option<Value>,
}

/// JSON-RPC implementation of [`ChainGateway`] over two endpoints.
pub struct LedgerGateway {
    client: reqwest::Client,
    read_rpc_url: String,
    signing_rpc_url: String,
    chain_id: u64,
    contract_address: Address,
    signer: std::sync::RwLock<Option<Address>>,
}

impl LedgerGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            read_rpc_url: config.network.read_rpc_url.clone(),
            signing_rpc_url: config.network.signing_rpc_url.clone(),
            chain_id: config.network.chain_id,
            contract_address: config.contract.address.clone(),
            signer: std::sync::RwLock::new(config.signer.account.clone()),
        }
    }

    /// Attach the connected wallet account. Writes stay rejected with
    /// `SigningUnavailable` until this is called.
    pub fn attach_signer(&self, account: Address) {
        *self.signer.write().expect("signer lock poisoned") = Some(account);
    }

    pub fn detach_signer(&self) {
        *self.signer.write().expect("signer lock poisoned") = None;
    }

    async fn rpc_call<T>(&self, url: &str, method: &str, params: Value) -> Result<T, GatewayError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: method.to_string(),
            params,
        };

        let response = self.client.post(url).json(&request).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, text
            )));
        }

        let rpc_response: RpcResponse = serde_json::from_str(&text)?;

        match rpc_response.result {
            RpcResult::Success { result } => {
                serde_json::from_value(result).map_err(GatewayError::Serialization)
            }
            RpcResult::Error { error } => Err(GatewayError::RemoteRejected(error.message)),
        }
    }

    /// Chain id reported by the wallet endpoint.
    async fn active_chain_id(&self) -> Result<u64, GatewayError> {
        let value: Value = self
            .rpc_call(&self.signing_rpc_url, "chain_id", Value::Null)
            .await?;
        value
            .as_u64()
            .ok_or_else(|| GatewayError::InvalidResponse("chain_id is not an integer".to_string()))
    }

    /// Poll the signing endpoint until the transaction is included. The poll
    /// interval is fixed; any timeout belongs to the underlying transport.
    async fn await_confirmation(&self, tx_hash: &str) -> Result<TxReceipt, GatewayError> {
        loop {
            let receipt: ReceiptResponse = self
                .rpc_call(
                    &self.signing_rpc_url,
                    "get_receipt",
                    serde_json::json!({ "hash": tx_hash }),
                )
                .await?;

            match receipt.status {
                ReceiptStatus::Confirmed => {
                    info!(tx_hash = tx_hash, "Transaction confirmed");
                    return Ok(TxReceipt {
                        tx_hash: tx_hash.to_string(),
                        status: ReceiptStatus::Confirmed,
                        return_value: receipt.return_value,
                    });
                }
                ReceiptStatus::Reverted => {
                    let reason = receipt
                        .revert_reason
                        .unwrap_or_else(|| "transaction reverted".to_string());
                    warn!(tx_hash = tx_hash, reason = %reason, "Transaction reverted");
                    return Err(GatewayError::RemoteRejected(reason));
                }
                ReceiptStatus::Pending => {
                    debug!(tx_hash = tx_hash, "Transaction pending, polling again");
                    tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
                }
            }
        }
    }
}

#[async_trait]
impl ChainGateway for LedgerGateway {
    async fn query(&self, method: &str, args: Vec<Value>) -> Result<Value, GatewayError> {
        debug!(method = method, "Contract view call");

        let params = serde_json::json!({
            "contract": self.contract_address,
            "method": method,
            "args": args,
        });

        self.rpc_call(&self.read_rpc_url, "contract_call", params)
            .await
    }

    async fn submit(&self, method: &str, args: Vec<Value>) -> Result<TxReceipt, GatewayError> {
        let signer = self.signer().ok_or(GatewayError::SigningUnavailable)?;

        // The caller must reconcile a chain mismatch before retrying; the
        // gateway never switches networks on its own.
        let actual = self.active_chain_id().await?;
        if actual != self.chain_id {
            return Err(GatewayError::NetworkMismatch {
                expected: self.chain_id,
                actual,
            });
        }

        info!(method = method, from = %signer, "Submitting contract transaction");

        let params = serde_json::json!({
            "contract": self.contract_address,
            "method": method,
            "args": args,
            "from": signer,
        });

        let response: SendResponse = self
            .rpc_call(&self.signing_rpc_url, "contract_send", params)
            .await?;

        self.await_confirmation(&response.hash).await
    }

    fn signer(&self) -> Option<Address> {
        self.signer.read().expect("signer lock poisoned").clone()
    }

    fn is_ready(&self) -> bool {
        !crate::models::is_zero_address(&self.contract_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContractConfig, NetworkConfig, SignerConfig};
    use crate::models::ZERO_ADDRESS;

    fn test_config(contract: &str, signer: Option<&str>) -> Config {
        Config {
            network: NetworkConfig {
                read_rpc_url: "http://localhost:8545".to_string(),
                signing_rpc_url: "http://localhost:8546".to_string(),
                chain_id: 11155111,
            },
            contract: ContractConfig {
                address: contract.to_string(),
            },
            signer: SignerConfig {
                account: signer.map(|s| s.to_string()),
            },
        }
    }

    #[test]
    fn test_gateway_readiness_tracks_contract_address() {
        let deployed = LedgerGateway::new(&test_config(
            "0x1111111111111111111111111111111111111111",
            None,
        ));
        assert!(deployed.is_ready());

        let placeholder = LedgerGateway::new(&test_config(ZERO_ADDRESS, None));
        assert!(!placeholder.is_ready());
    }

    #[test]
    fn test_signer_attach_detach() {
        let gateway = LedgerGateway::new(&test_config(ZERO_ADDRESS, None));
        assert!(gateway.signer().is_none());

        gateway.attach_signer("0xabc".to_string());
        assert_eq!(gateway.signer().as_deref(), Some("0xabc"));

        gateway.detach_signer();
        assert!(gateway.signer().is_none());
    }

    #[test]
    fn test_rpc_result_deserialization() {
        let success: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":[1,2,3]}"#).unwrap();
        assert!(matches!(success.result, RpcResult::Success { .. }));

        let error: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted: deck not active"}}"#,
        )
        .unwrap();
        match error.result {
            RpcResult::Error { error } => {
                assert_eq!(error.message, "execution reverted: deck not active")
            }
            _ => panic!("expected error result"),
        }
    }

    #[test]
    fn test_receipt_deserialization() {
        let confirmed: ReceiptResponse =
            serde_json::from_str(r#"{"status":"confirmed","return_value":7}"#).unwrap();
        assert_eq!(confirmed.status, ReceiptStatus::Confirmed);
        assert_eq!(confirmed.return_value, Some(serde_json::json!(7)));

        let reverted: ReceiptResponse =
            serde_json::from_str(r#"{"status":"reverted","revert_reason":"character already minted"}"#)
                .unwrap();
        assert_eq!(reverted.status, ReceiptStatus::Reverted);
        assert_eq!(
            reverted.revert_reason.as_deref(),
            Some("character already minted")
        );

        let pending: ReceiptResponse = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(pending.status, ReceiptStatus::Pending);
        assert!(pending.revert_reason.is_none());
    }

    #[test]
    fn test_remote_rejection_message_is_verbatim() {
        let err = GatewayError::RemoteRejected("execution reverted: not deck owner".to_string());
        assert_eq!(err.to_string(), "execution reverted: not deck owner");
    }
}
