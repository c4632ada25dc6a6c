//! Hash function primitives for the Zeepin SDK.
//!
//! Provides the SHA-2 and SHA-3 families, RIPEMD-160, Hash160 and the
//! double SHA-256 used for transaction sign content. Every signature scheme
//! selects one of these as its pre-signing digest.

use ripemd::Ripemd160;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

fn digest<D: Digest>(data: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute SHA-224 of the input data.
pub fn sha224(data: &[u8]) -> [u8; 28] {
    Sha224::digest(data).into()
}

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256: SHA-256(SHA-256(data)).
///
/// This is the transaction sign content digest and the WIF checksum hash.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute SHA-384 of the input data.
pub fn sha384(data: &[u8]) -> [u8; 48] {
    let mut output = [0u8; 48];
    output.copy_from_slice(&Sha384::digest(data));
    output
}

/// Compute SHA-512 of the input data.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    output.copy_from_slice(&Sha512::digest(data));
    output
}

/// Compute SHA3-224 of the input data.
pub fn sha3_224(data: &[u8]) -> Vec<u8> {
    digest::<Sha3_224>(data)
}

/// Compute SHA3-256 of the input data.
pub fn sha3_256(data: &[u8]) -> Vec<u8> {
    digest::<Sha3_256>(data)
}

/// Compute SHA3-384 of the input data.
pub fn sha3_384(data: &[u8]) -> Vec<u8> {
    digest::<Sha3_384>(data)
}

/// Compute SHA3-512 of the input data.
pub fn sha3_512(data: &[u8]) -> Vec<u8> {
    digest::<Sha3_512>(data)
}

/// Compute RIPEMD-160 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used to turn a verification program into its 20-byte program hash.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
