//! Error types for node interaction.

use zeepin_script::ScriptError;
use zeepin_transaction::TransactionError;

/// Errors that can occur when building requests for, or reading responses
/// from, a Zeepin node.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failed to serialize or deserialize node JSON.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The node answered with a non-zero error code.
    #[error("node rejected request ({code}): {description}")]
    Rejected {
        /// The node's error code.
        code: i64,
        /// The node's description of the failure.
        description: String,
    },

    /// No contract of that name is configured for the network.
    #[error("unknown contract: {0}")]
    UnknownContract(String),

    /// The node transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Building or encoding the transaction failed.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// An address or contract hash was malformed.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}
