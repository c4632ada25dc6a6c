//! Key type, curve and signature scheme tables.
//!
//! All three are closed enums with static lookup by their one-byte wire tag
//! and by their textual label. The labels are the ones written into keystore
//! files (`"ECDSA"`, `"P-256"`, `"SHA256withECDSA"`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash;
use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// Named elliptic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "P-224")]
    P224,
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
    #[serde(rename = "sm2p256v1")]
    Sm2P256v1,
    #[serde(rename = "ed25519")]
    Ed25519,
}

impl Curve {
    pub const ALL: [Curve; 6] = [
        Curve::P224,
        Curve::P256,
        Curve::P384,
        Curve::P521,
        Curve::Sm2P256v1,
        Curve::Ed25519,
    ];

    /// One-byte wire tag.
    pub fn hex(&self) -> u8 {
        match self {
            Curve::P224 => 1,
            Curve::P256 => 2,
            Curve::P384 => 3,
            Curve::P521 => 4,
            Curve::Sm2P256v1 => 20,
            Curve::Ed25519 => 25,
        }
    }

    /// Keystore label, e.g. `"P-256"`.
    pub fn label(&self) -> &'static str {
        match self {
            Curve::P224 => "P-224",
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Sm2P256v1 => "sm2p256v1",
            Curve::Ed25519 => "ed25519",
        }
    }

    /// Curve-library preset name.
    pub fn preset(&self) -> &'static str {
        match self {
            Curve::P224 => "p224",
            Curve::P256 => "p256",
            Curve::P384 => "p384",
            Curve::P521 => "p521",
            Curve::Sm2P256v1 => "sm2p256v1",
            Curve::Ed25519 => "ed25519",
        }
    }

    pub fn from_hex(tag: u8) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex() == tag)
            .ok_or_else(|| PrimitivesError::UnsupportedAlgorithm(format!("curve tag {:#04x}", tag)))
    }

    pub fn from_label(label: &str) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| PrimitivesError::UnsupportedAlgorithm(format!("curve {}", label)))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SignatureScheme
// ---------------------------------------------------------------------------

/// Hash function and signature algorithm pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureScheme {
    #[serde(rename = "SHA224withECDSA")]
    EcdsaWithSha224,
    #[serde(rename = "SHA256withECDSA")]
    EcdsaWithSha256,
    #[serde(rename = "SHA384withECDSA")]
    EcdsaWithSha384,
    #[serde(rename = "SHA512withECDSA")]
    EcdsaWithSha512,
    #[serde(rename = "SHA3-224withECDSA")]
    EcdsaWithSha3_224,
    #[serde(rename = "SHA3-256withECDSA")]
    EcdsaWithSha3_256,
    #[serde(rename = "SHA3-384withECDSA")]
    EcdsaWithSha3_384,
    #[serde(rename = "SHA3-512withECDSA")]
    EcdsaWithSha3_512,
    #[serde(rename = "RIPEMD160withECDSA")]
    EcdsaWithRipemd160,
    #[serde(rename = "SM3withSM2")]
    Sm2WithSm3,
    #[serde(rename = "SHA512withEdDSA")]
    EddsaWithSha512,
}

impl SignatureScheme {
    pub const ALL: [SignatureScheme; 11] = [
        SignatureScheme::EcdsaWithSha224,
        SignatureScheme::EcdsaWithSha256,
        SignatureScheme::EcdsaWithSha384,
        SignatureScheme::EcdsaWithSha512,
        SignatureScheme::EcdsaWithSha3_224,
        SignatureScheme::EcdsaWithSha3_256,
        SignatureScheme::EcdsaWithSha3_384,
        SignatureScheme::EcdsaWithSha3_512,
        SignatureScheme::EcdsaWithRipemd160,
        SignatureScheme::Sm2WithSm3,
        SignatureScheme::EddsaWithSha512,
    ];

    /// One-byte wire tag, prefixed to serialized signatures.
    pub fn hex(&self) -> u8 {
        match self {
            SignatureScheme::EcdsaWithSha224 => 0,
            SignatureScheme::EcdsaWithSha256 => 1,
            SignatureScheme::EcdsaWithSha384 => 2,
            SignatureScheme::EcdsaWithSha512 => 3,
            SignatureScheme::EcdsaWithSha3_224 => 4,
            SignatureScheme::EcdsaWithSha3_256 => 5,
            SignatureScheme::EcdsaWithSha3_384 => 6,
            SignatureScheme::EcdsaWithSha3_512 => 7,
            SignatureScheme::EcdsaWithRipemd160 => 8,
            SignatureScheme::Sm2WithSm3 => 9,
            SignatureScheme::EddsaWithSha512 => 10,
        }
    }

    /// Keystore label, e.g. `"SHA256withECDSA"`.
    pub fn label(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaWithSha224 => "SHA224withECDSA",
            SignatureScheme::EcdsaWithSha256 => "SHA256withECDSA",
            SignatureScheme::EcdsaWithSha384 => "SHA384withECDSA",
            SignatureScheme::EcdsaWithSha512 => "SHA512withECDSA",
            SignatureScheme::EcdsaWithSha3_224 => "SHA3-224withECDSA",
            SignatureScheme::EcdsaWithSha3_256 => "SHA3-256withECDSA",
            SignatureScheme::EcdsaWithSha3_384 => "SHA3-384withECDSA",
            SignatureScheme::EcdsaWithSha3_512 => "SHA3-512withECDSA",
            SignatureScheme::EcdsaWithRipemd160 => "RIPEMD160withECDSA",
            SignatureScheme::Sm2WithSm3 => "SM3withSM2",
            SignatureScheme::EddsaWithSha512 => "SHA512withEdDSA",
        }
    }

    /// Compact JWS-style label, e.g. `"ES256"`.
    pub fn label_jws(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaWithSha224 => "ES224",
            SignatureScheme::EcdsaWithSha256 => "ES256",
            SignatureScheme::EcdsaWithSha384 => "ES384",
            SignatureScheme::EcdsaWithSha512 => "ES512",
            SignatureScheme::EcdsaWithSha3_224 => "ES3-224",
            SignatureScheme::EcdsaWithSha3_256 => "ES3-256",
            SignatureScheme::EcdsaWithSha3_384 => "ES3-384",
            SignatureScheme::EcdsaWithSha3_512 => "ES3-512",
            SignatureScheme::EcdsaWithRipemd160 => "ER160",
            SignatureScheme::Sm2WithSm3 => "SM",
            SignatureScheme::EddsaWithSha512 => "EDS512",
        }
    }

    /// The key algorithm this scheme signs with.
    pub fn key_type(&self) -> KeyType {
        match self {
            SignatureScheme::Sm2WithSm3 => KeyType::Sm2,
            SignatureScheme::EddsaWithSha512 => KeyType::Eddsa,
            _ => KeyType::Ecdsa,
        }
    }

    /// Digest applied to the message before the signature primitive runs.
    ///
    /// SM2 hashes inside its own signing routine, so the message passes
    /// through unchanged for that scheme.
    pub fn compute_hash(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            SignatureScheme::EcdsaWithSha224 => hash::sha224(msg).to_vec(),
            SignatureScheme::EcdsaWithSha256 => hash::sha256(msg).to_vec(),
            SignatureScheme::EcdsaWithSha384 => hash::sha384(msg).to_vec(),
            SignatureScheme::EcdsaWithSha512 | SignatureScheme::EddsaWithSha512 => {
                hash::sha512(msg).to_vec()
            }
            SignatureScheme::EcdsaWithSha3_224 => hash::sha3_224(msg),
            SignatureScheme::EcdsaWithSha3_256 => hash::sha3_256(msg),
            SignatureScheme::EcdsaWithSha3_384 => hash::sha3_384(msg),
            SignatureScheme::EcdsaWithSha3_512 => hash::sha3_512(msg),
            SignatureScheme::EcdsaWithRipemd160 => hash::ripemd160(msg).to_vec(),
            SignatureScheme::Sm2WithSm3 => msg.to_vec(),
        }
    }

    pub fn from_hex(tag: u8) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|s| s.hex() == tag)
            .ok_or_else(|| {
                PrimitivesError::UnsupportedAlgorithm(format!("signature scheme tag {:#04x}", tag))
            })
    }

    pub fn from_label(label: &str) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .ok_or_else(|| {
                PrimitivesError::UnsupportedAlgorithm(format!("signature scheme {}", label))
            })
    }

    pub fn from_label_jws(label: &str) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|s| s.label_jws() == label)
            .ok_or_else(|| {
                PrimitivesError::UnsupportedAlgorithm(format!("signature scheme {}", label))
            })
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// KeyType
// ---------------------------------------------------------------------------

/// Key algorithm family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    #[default]
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "SM2")]
    Sm2,
    #[serde(rename = "EDDSA")]
    Eddsa,
}

impl KeyType {
    pub const ALL: [KeyType; 3] = [KeyType::Ecdsa, KeyType::Sm2, KeyType::Eddsa];

    /// One-byte wire tag, prefixed to tagged public keys.
    pub fn hex(&self) -> u8 {
        match self {
            KeyType::Ecdsa => 0x12,
            KeyType::Sm2 => 0x13,
            KeyType::Eddsa => 0x14,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyType::Ecdsa => "ECDSA",
            KeyType::Sm2 => "SM2",
            KeyType::Eddsa => "EDDSA",
        }
    }

    /// Scheme used when the caller does not name one.
    pub fn default_scheme(&self) -> SignatureScheme {
        match self {
            KeyType::Ecdsa => SignatureScheme::EcdsaWithSha256,
            KeyType::Sm2 => SignatureScheme::Sm2WithSm3,
            KeyType::Eddsa => SignatureScheme::EddsaWithSha512,
        }
    }

    /// Curve used when the caller does not name one.
    pub fn default_curve(&self) -> Curve {
        match self {
            KeyType::Ecdsa => Curve::P256,
            KeyType::Sm2 => Curve::Sm2P256v1,
            KeyType::Eddsa => Curve::Ed25519,
        }
    }

    pub fn from_hex(tag: u8) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|k| k.hex() == tag)
            .ok_or_else(|| PrimitivesError::UnsupportedAlgorithm(format!("key type tag {:#04x}", tag)))
    }

    pub fn from_label(label: &str) -> Result<Self, PrimitivesError> {
        Self::ALL
            .into_iter()
            .find(|k| k.label() == label)
            .ok_or_else(|| PrimitivesError::UnsupportedAlgorithm(format!("key type {}", label)))
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters attached to a key. Serializes as `{"curve":"P-256"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyParameters {
    pub curve: Curve,
}

impl KeyParameters {
    pub fn new(curve: Curve) -> Self {
        KeyParameters { curve }
    }
}

impl Default for KeyParameters {
    fn default() -> Self {
        KeyParameters { curve: Curve::P256 }
    }
}
