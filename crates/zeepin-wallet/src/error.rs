/// Error types for keystore, account and wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// AEAD tag mismatch, bad KDF output, or the decrypted key does not
    /// belong to the expected address.
    #[error("decryption failed: {0}")]
    Decryption(String),
    /// A keystore object is missing required fields.
    #[error("invalid keystore: {0}")]
    InvalidKeystore(String),
    /// The key being encrypted does not derive the target address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("script error: {0}")]
    Script(#[from] zeepin_script::ScriptError),
    #[error("primitives error: {0}")]
    Primitives(#[from] zeepin_primitives::PrimitivesError),
}
