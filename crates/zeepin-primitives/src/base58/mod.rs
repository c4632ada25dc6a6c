//! Base58 over the Bitcoin alphabet, with a 4-byte checksum suffix.
//!
//! WIF keys checksum with double SHA-256, addresses with a single SHA-256;
//! the `_with` variants take the digest.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Digest whose first 4 bytes form the checksum.
pub type ChecksumFn = fn(&[u8]) -> [u8; 32];

pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// # Returns
/// The bytes, or `InvalidBase58` for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// `base58(data || digest(data)[..4])`.
pub fn check_encode_with(data: &[u8], digest: ChecksumFn) -> String {
    let checksum = digest(data);
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode and strip a 4-byte checksum computed with `digest`.
///
/// # Returns
/// The payload, `InvalidBase58` for bad or short input, or
/// `ChecksumMismatch` when the trailing 4 bytes do not match.
pub fn check_decode_with(s: &str, digest: ChecksumFn) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    if checksum != &digest(payload)[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Base58Check with a double-SHA-256 checksum, as used by WIF.
pub fn check_encode(data: &[u8]) -> String {
    check_encode_with(data, sha256d)
}

pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    check_decode_with(s, sha256d)
}
