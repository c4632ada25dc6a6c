/// Error types for program encoding, parsing and addresses.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A caller-supplied value is out of range or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed program bytes or hex.
    #[error("format error: {0}")]
    Format(String),

    /// A push or length prefix runs past the end of the program.
    #[error("truncated input")]
    TruncatedInput,

    /// Push data longer than PUSHDATA4 can describe.
    #[error("value too large: {0} bytes")]
    ValueTooLarge(usize),

    /// The program is neither single-sig nor multi-sig.
    #[error("unsupported program: {0}")]
    UnsupportedProgram(String),

    /// Address string has the wrong length or encoding.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Base58 address does not re-encode to itself.
    #[error("address checksum failed")]
    Checksum,

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] zeepin_primitives::PrimitivesError),
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::Format(e.to_string())
    }
}
