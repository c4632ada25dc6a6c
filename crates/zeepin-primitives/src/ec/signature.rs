//! Scheme-tagged signature values.

use std::fmt;

use crate::params::SignatureScheme;
use crate::util::hex_to_bytes;
use crate::PrimitivesError;

/// A raw signature together with the scheme that produced it.
///
/// The wire form is one scheme-tag byte followed by the raw signature
/// (`r || s` for ECDSA, `R || S` for EdDSA).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Scheme used to hash and sign.
    pub algorithm: SignatureScheme,
    /// Raw signature bytes, without the scheme tag.
    pub value: Vec<u8>,
    /// Optional identifier of the signing public key.
    pub public_key_id: Option<String>,
}

impl Signature {
    pub fn new(algorithm: SignatureScheme, value: Vec<u8>, public_key_id: Option<String>) -> Self {
        Signature {
            algorithm,
            value,
            public_key_id,
        }
    }

    /// Serialize as `scheme_tag || value`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.value.len());
        out.push(self.algorithm.hex());
        out.extend_from_slice(&self.value);
        out
    }

    pub fn serialize_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    /// Parse a tagged signature.
    ///
    /// # Returns
    /// The signature, or an error if the input is empty or the scheme tag
    /// is unknown.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let (tag, value) = bytes.split_first().ok_or(PrimitivesError::TruncatedInput)?;
        let algorithm = SignatureScheme::from_hex(*tag)?;
        if value.is_empty() {
            return Err(PrimitivesError::InvalidSignature(
                "signature value is empty".to_string(),
            ));
        }
        Ok(Signature {
            algorithm,
            value: value.to_vec(),
            public_key_id: None,
        })
    }

    pub fn deserialize_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::deserialize(&hex_to_bytes(hex_str)?)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize_hex())
    }
}
