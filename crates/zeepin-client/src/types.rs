//! Node request and response structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClientError;

/// REST action name for raw transaction submission.
pub const SEND_RAW_TRANSACTION_ACTION: &str = "sendrawtransaction";
/// REST API version sent with submissions.
pub const REST_API_VERSION: &str = "1.0.0";

/// Body of a raw transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRawTransactionRequest {
    /// Always `sendrawtransaction`.
    #[serde(rename = "Action")]
    pub action: String,
    /// API version.
    #[serde(rename = "Version")]
    pub version: String,
    /// Signed transaction hex.
    #[serde(rename = "Data")]
    pub data: String,
}

impl SendRawTransactionRequest {
    /// Request carrying `tx_hex`.
    pub fn new(tx_hex: &str) -> Self {
        SendRawTransactionRequest {
            action: SEND_RAW_TRANSACTION_ACTION.to_string(),
            version: REST_API_VERSION.to_string(),
            data: tx_hex.to_string(),
        }
    }
}

/// Envelope wrapping every REST response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse<T> {
    /// Action the response answers.
    #[serde(rename = "Action", default)]
    pub action: String,
    /// Human-readable status.
    #[serde(rename = "Desc", default)]
    pub desc: String,
    /// Zero on success.
    #[serde(rename = "Error")]
    pub error: i64,
    /// Action-specific payload.
    #[serde(rename = "Result")]
    pub result: T,
    /// API version.
    #[serde(rename = "Version", default)]
    pub version: String,
}

impl<T> NodeResponse<T> {
    /// The payload, or `Rejected` when the error code is non-zero.
    pub fn into_result(self) -> Result<T, ClientError> {
        if self.error != 0 {
            return Err(ClientError::Rejected {
                code: self.error,
                description: self.desc,
            });
        }
        Ok(self.result)
    }
}

/// Outcome of a pre-executed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreExecResult {
    /// 1 on success.
    #[serde(rename = "State")]
    pub state: i64,
    /// Gas the execution would consume.
    #[serde(rename = "Gas", default)]
    pub gas: u64,
    /// Return value, usually hex.
    #[serde(rename = "Result")]
    pub result: Value,
}

impl PreExecResult {
    /// Interpret a hex return value as UTF-8 text. An empty result reads
    /// as `"0"`, which is how contracts report a zero balance.
    pub fn result_string(&self) -> Result<String, ClientError> {
        let hex_str = self.result.as_str().unwrap_or_default();
        if hex_str.is_empty() {
            return Ok("0".to_string());
        }
        let bytes = hex::decode(hex_str).map_err(|e| ClientError::Transport(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ClientError::Transport(e.to_string()))
    }
}

/// What a submission returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Accepted into the pool under this hash.
    Submitted {
        /// Display hash of the transaction.
        tx_hash: String,
    },
    /// Executed without being committed.
    PreExecuted(PreExecResult),
}

/// A contract notification attached to an executed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Emitting contract.
    #[serde(rename = "ContractAddress")]
    pub contract_address: String,
    /// Notification payload.
    #[serde(rename = "States")]
    pub states: Value,
}

/// Execution event of a committed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxEvent {
    /// Display hash of the transaction.
    #[serde(rename = "TxHash", default)]
    pub tx_hash: String,
    /// 1 on success, 0 on failure.
    #[serde(rename = "State")]
    pub state: i64,
    /// Gas consumed.
    #[serde(rename = "GasConsumed", default)]
    pub gas_consumed: u64,
    /// Notifications emitted during execution.
    #[serde(rename = "Notify", default)]
    pub notifications: Vec<Notification>,
}

impl TxEvent {
    /// Whether execution succeeded.
    pub fn is_success(&self) -> bool {
        self.state == 1
    }
}

/// Native asset balances keyed by asset name (`zpt`, `gala`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub BTreeMap<String, String>);

impl Balance {
    /// Balance of `asset` as the node reported it.
    pub fn get(&self, asset: &str) -> Option<&str> {
        self.0.get(asset).map(String::as_str)
    }
}
