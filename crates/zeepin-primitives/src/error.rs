/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, key handling, signing, and binary/hex decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("signature scheme {scheme} does not match key type {key_type}")]
    SchemeMismatch {
        scheme: &'static str,
        key_type: &'static str,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("varint too large")]
    VarIntTooLarge,

    #[error("unexpected end of data")]
    TruncatedInput,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::Format(e.to_string())
    }
}
