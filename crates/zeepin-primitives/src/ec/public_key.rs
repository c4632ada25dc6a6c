//! Public keys with algorithm-aware wire encoding and verification.
//!
//! ECDSA keys serialize as the bare compressed point (33 bytes on P-256, 49
//! on P-384). Other key types are prefixed with their key type tag and curve
//! tag.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use ed25519_dalek::Verifier;
use num_bigint::BigUint;
use p256::ecdsa::signature::hazmat::PrehashVerifier;

use crate::ec::signature::Signature;
use crate::params::{Curve, KeyParameters, KeyType};
use crate::util::{hex_to_bytes, ByteReader};
use crate::PrimitivesError;

/// Length of an untagged (legacy ECDSA P-256) public key.
pub const COMPRESSED_P256_LEN: usize = 33;

/// Length of an untagged ECDSA P-384 public key.
pub const COMPRESSED_P384_LEN: usize = 49;

#[derive(Clone, Debug)]
enum PointMaterial {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

/// A public key for one of the supported algorithms.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: PointMaterial,
}

impl PublicKey {
    pub(crate) fn from_p256(vk: p256::ecdsa::VerifyingKey) -> Self {
        PublicKey {
            inner: PointMaterial::P256(vk),
        }
    }

    pub(crate) fn from_p384(vk: p384::ecdsa::VerifyingKey) -> Self {
        PublicKey {
            inner: PointMaterial::P384(vk),
        }
    }

    pub(crate) fn from_ed25519(vk: ed25519_dalek::VerifyingKey) -> Self {
        PublicKey {
            inner: PointMaterial::Ed25519(vk),
        }
    }

    /// Build a public key from raw key bytes of a known algorithm and curve.
    ///
    /// # Arguments
    /// * `key_type` - The key algorithm.
    /// * `curve` - The curve the point lives on.
    /// * `bytes` - SEC1 point bytes for ECDSA, 32 raw bytes for Ed25519.
    ///
    /// # Returns
    /// The key, `UnsupportedAlgorithm` for combinations without an
    /// implementation, or `InvalidPublicKey` for bytes that are not a point.
    pub fn from_key_bytes(
        key_type: KeyType,
        curve: Curve,
        bytes: &[u8],
    ) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        match (key_type, curve) {
            (KeyType::Ecdsa, Curve::P256) => p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(Self::from_p256)
                .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string())),
            (KeyType::Ecdsa, Curve::P384) => p384::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(Self::from_p384)
                .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string())),
            (KeyType::Eddsa, Curve::Ed25519) => {
                let raw: [u8; 32] = bytes.try_into().map_err(|_| {
                    PrimitivesError::InvalidPublicKey(format!(
                        "ed25519 key must be 32 bytes, got {}",
                        bytes.len()
                    ))
                })?;
                ed25519_dalek::VerifyingKey::from_bytes(&raw)
                    .map(Self::from_ed25519)
                    .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))
            }
            (k, c) => Err(PrimitivesError::UnsupportedAlgorithm(format!("{} on {}", k, c))),
        }
    }

    /// Parse a serialized public key.
    ///
    /// A 33-byte input carries no tags and is read as ECDSA on P-256, and a
    /// 49-byte compressed point as ECDSA on P-384. Anything else starts with
    /// the key type tag and the curve tag.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() == COMPRESSED_P256_LEN {
            return Self::from_key_bytes(KeyType::Ecdsa, Curve::P256, bytes);
        }
        if bytes.len() == COMPRESSED_P384_LEN && matches!(bytes[0], 0x02 | 0x03) {
            return Self::from_key_bytes(KeyType::Ecdsa, Curve::P384, bytes);
        }
        let mut reader = ByteReader::new(bytes);
        let key_type = KeyType::from_hex(reader.read_u8()?)?;
        let curve = Curve::from_hex(reader.read_u8()?)?;
        let key = reader.read_bytes(reader.remaining())?;
        Self::from_key_bytes(key_type, curve, key)
    }

    /// Parse a hex-encoded serialized public key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::deserialize(&hex_to_bytes(hex_str)?)
    }

    pub fn key_type(&self) -> KeyType {
        match self.inner {
            PointMaterial::P256(_) | PointMaterial::P384(_) => KeyType::Ecdsa,
            PointMaterial::Ed25519(_) => KeyType::Eddsa,
        }
    }

    pub fn curve(&self) -> Curve {
        match self.inner {
            PointMaterial::P256(_) => Curve::P256,
            PointMaterial::P384(_) => Curve::P384,
            PointMaterial::Ed25519(_) => Curve::Ed25519,
        }
    }

    pub fn parameters(&self) -> KeyParameters {
        KeyParameters::new(self.curve())
    }

    /// Raw key bytes without tags: compressed SEC1 point or Ed25519 bytes.
    pub fn key_bytes(&self) -> Vec<u8> {
        match &self.inner {
            PointMaterial::P256(vk) => vk.to_encoded_point(true).as_bytes().to_vec(),
            PointMaterial::P384(vk) => vk.to_encoded_point(true).as_bytes().to_vec(),
            PointMaterial::Ed25519(vk) => vk.to_bytes().to_vec(),
        }
    }

    /// Affine `(x, y)` coordinates, big-endian, for ECDSA keys.
    pub fn affine_coordinates(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let point = match &self.inner {
            PointMaterial::P256(vk) => {
                let p = vk.to_encoded_point(false);
                (p.x()?.to_vec(), p.y()?.to_vec())
            }
            PointMaterial::P384(vk) => {
                let p = vk.to_encoded_point(false);
                (p.x()?.to_vec(), p.y()?.to_vec())
            }
            PointMaterial::Ed25519(_) => return None,
        };
        Some(point)
    }

    /// Wire encoding used inside verification programs.
    pub fn serialize(&self) -> Vec<u8> {
        match self.inner {
            PointMaterial::P256(_) | PointMaterial::P384(_) => self.key_bytes(),
            PointMaterial::Ed25519(_) => {
                let key = self.key_bytes();
                let mut out = Vec::with_capacity(2 + key.len());
                out.push(self.key_type().hex());
                out.push(self.curve().hex());
                out.extend_from_slice(&key);
                out
            }
        }
    }

    pub fn serialize_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    /// Verify `signature` over `msg`, hashing the message with the
    /// signature's own scheme first.
    ///
    /// # Returns
    /// `true` only if the scheme belongs to this key's algorithm and the
    /// signature checks out.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        if signature.algorithm.key_type() != self.key_type() {
            return false;
        }
        let hash = signature.algorithm.compute_hash(msg);
        match &self.inner {
            PointMaterial::P256(vk) => p256::ecdsa::Signature::from_slice(&signature.value)
                .map(|sig| vk.verify_prehash(&hash, &sig).is_ok())
                .unwrap_or(false),
            PointMaterial::P384(vk) => p384::ecdsa::Signature::from_slice(&signature.value)
                .map(|sig| vk.verify_prehash(&hash, &sig).is_ok())
                .unwrap_or(false),
            PointMaterial::Ed25519(vk) => ed25519_dalek::Signature::from_slice(&signature.value)
                .map(|sig| vk.verify(&hash, &sig).is_ok())
                .unwrap_or(false),
        }
    }

    /// Canonical ordering used to sort the keys of a multi-signature program.
    ///
    /// Keys order first by key type tag. ECDSA keys then compare their affine
    /// X coordinate and, on a tie, Y. EdDSA keys compare their raw value as an
    /// unsigned big-endian integer.
    pub fn canonical_cmp(&self, other: &PublicKey) -> Ordering {
        let by_type = self.key_type().hex().cmp(&other.key_type().hex());
        if by_type != Ordering::Equal {
            return by_type;
        }
        match (self.affine_coordinates(), other.affine_coordinates()) {
            (Some((ax, ay)), Some((bx, by))) => BigUint::from_bytes_be(&ax)
                .cmp(&BigUint::from_bytes_be(&bx))
                .then_with(|| BigUint::from_bytes_be(&ay).cmp(&BigUint::from_bytes_be(&by))),
            _ => BigUint::from_bytes_be(&self.key_bytes())
                .cmp(&BigUint::from_bytes_be(&other.key_bytes())),
        }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.serialize() == other.serialize()
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialize().hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize_hex())
    }
}
