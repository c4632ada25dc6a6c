/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// A caller-supplied value is out of range or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Amount is not a positive integer, or does not fit its field.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Multi-signature accumulation limits were exceeded.
    #[error("too many signatures: {0}")]
    TooManySignatures(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// An underlying script error (forwarded from `zeepin-script`).
    #[error("script error: {0}")]
    Script(#[from] zeepin_script::ScriptError),
    /// An underlying primitives error (forwarded from `zeepin-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] zeepin_primitives::PrimitivesError),
}
