/// Zeepin SDK - Cryptographic primitives, hashing, and utilities.
///
/// This crate provides the foundational building blocks for the Zeepin SDK:
/// - Hash functions (SHA-2, SHA-3, RIPEMD-160, Hash160)
/// - Variable-length integer encoding and byte cursors
/// - Base58 encoding/decoding
/// - Key type, curve and signature scheme tables
/// - Private/public keys over P-256, P-384 and Ed25519 with scheme-aware signing

pub mod hash;
pub mod util;
pub mod base58;
pub mod params;
pub mod ec;
pub mod signable;

mod error;
pub use error::PrimitivesError;
pub use params::{Curve, KeyParameters, KeyType, SignatureScheme};
pub use ec::{PrivateKey, PublicKey, Signature};
pub use signable::Signable;
