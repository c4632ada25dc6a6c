//! Private keys with scheme-aware signing.
//!
//! Wraps the RustCrypto ECDSA signing keys for P-256/P-384 and the
//! ed25519-dalek signing key. Adds WIF encoding, hex import/export and the
//! hash-then-sign pipeline driven by `SignatureScheme`.

use std::fmt;

use ed25519_dalek::Signer;
use p256::ecdsa::signature::hazmat::PrehashSigner;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::params::{Curve, KeyParameters, KeyType, SignatureScheme};
use crate::signable::Signable;
use crate::util::hex_to_bytes;
use crate::PrimitivesError;

/// WIF version byte.
pub const WIF_PREFIX: u8 = 0x80;

/// Compression flag byte appended to WIF payloads.
const COMPRESS_MAGIC: u8 = 0x01;

/// Length of a P-256 or Ed25519 secret.
const SECRET_LEN: usize = 32;

/// Length of a P-384 secret.
const SECRET_LEN_P384: usize = 48;

#[derive(Clone)]
enum SecretMaterial {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

/// A private key for one of the supported algorithms.
///
/// The underlying signing keys wipe their scalar on drop. Byte exports are
/// returned as `Zeroizing` buffers.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SecretMaterial,
}

impl PrivateKey {
    /// Generate a random ECDSA P-256 key.
    pub fn random() -> Self {
        PrivateKey {
            inner: SecretMaterial::P256(p256::ecdsa::SigningKey::random(&mut OsRng)),
        }
    }

    /// Generate a random key of the given algorithm and curve.
    ///
    /// # Returns
    /// The key, or `UnsupportedAlgorithm` for combinations without an
    /// implementation (SM2, P-224, P-521).
    pub fn random_with(key_type: KeyType, params: KeyParameters) -> Result<Self, PrimitivesError> {
        let inner = match (key_type, params.curve) {
            (KeyType::Ecdsa, Curve::P256) => {
                SecretMaterial::P256(p256::ecdsa::SigningKey::random(&mut OsRng))
            }
            (KeyType::Ecdsa, Curve::P384) => {
                SecretMaterial::P384(p384::ecdsa::SigningKey::random(&mut OsRng))
            }
            (KeyType::Eddsa, Curve::Ed25519) => {
                SecretMaterial::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
            }
            (k, c) => {
                return Err(PrimitivesError::UnsupportedAlgorithm(format!("{} on {}", k, c)))
            }
        };
        Ok(PrivateKey { inner })
    }

    /// Create an ECDSA P-256 key from a raw 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        Self::from_bytes_with(bytes, KeyType::Ecdsa, KeyParameters::default())
    }

    /// Create a key of the given algorithm and curve from raw secret bytes.
    ///
    /// # Arguments
    /// * `bytes` - The secret: 32 bytes for P-256 and Ed25519, 48 for P-384.
    /// * `key_type` - The key algorithm.
    /// * `params` - Curve parameters.
    ///
    /// # Returns
    /// The key, `InvalidPrivateKey` for wrong lengths or out-of-range
    /// scalars, or `UnsupportedAlgorithm`.
    pub fn from_bytes_with(
        bytes: &[u8],
        key_type: KeyType,
        params: KeyParameters,
    ) -> Result<Self, PrimitivesError> {
        let expect_len = |len: usize| {
            if bytes.len() != len {
                return Err(PrimitivesError::InvalidPrivateKey(format!(
                    "expected {} bytes, got {}",
                    len,
                    bytes.len()
                )));
            }
            Ok(())
        };
        let inner = match (key_type, params.curve) {
            (KeyType::Ecdsa, Curve::P256) => {
                expect_len(SECRET_LEN)?;
                let key = p256::ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
                SecretMaterial::P256(key)
            }
            (KeyType::Ecdsa, Curve::P384) => {
                expect_len(SECRET_LEN_P384)?;
                let key = p384::ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
                SecretMaterial::P384(key)
            }
            (KeyType::Eddsa, Curve::Ed25519) => {
                let seed: [u8; SECRET_LEN] = bytes.try_into().map_err(|_| {
                    PrimitivesError::InvalidPrivateKey(format!(
                        "expected {} bytes, got {}",
                        SECRET_LEN,
                        bytes.len()
                    ))
                })?;
                let seed = Zeroizing::new(seed);
                SecretMaterial::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed))
            }
            (k, c) => {
                return Err(PrimitivesError::UnsupportedAlgorithm(format!("{} on {}", k, c)))
            }
        };
        Ok(PrivateKey { inner })
    }

    /// Create an ECDSA P-256 key from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_hex_with(hex_str, KeyType::Ecdsa, KeyParameters::default())
    }

    /// Create a key of the given algorithm and curve from a hex string.
    pub fn from_hex_with(
        hex_str: &str,
        key_type: KeyType,
        params: KeyParameters,
    ) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex_to_bytes(hex_str)?);
        Self::from_bytes_with(&bytes, key_type, params)
    }

    /// Decode a WIF string (0x80 prefix, compressed flag, double-SHA-256
    /// checksum) into an ECDSA P-256 key.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = Zeroizing::new(base58::check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => e,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?);
        let key = match payload.len() {
            34 if payload[33] == COMPRESS_MAGIC => &payload[1..33],
            33 => &payload[1..],
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed private key: invalid length {}",
                    n + 4
                )))
            }
        };
        if payload[0] != WIF_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "unexpected version byte {:#04x}",
                payload[0]
            )));
        }
        Self::from_bytes(key)
    }

    /// Encode a 32-byte secret as compressed WIF.
    pub fn to_wif(&self) -> Result<String, PrimitivesError> {
        let secret = self.to_bytes();
        if secret.len() != SECRET_LEN {
            return Err(PrimitivesError::InvalidWif(format!(
                "WIF holds {} byte secrets, key has {}",
                SECRET_LEN,
                secret.len()
            )));
        }
        let mut payload = Zeroizing::new(Vec::with_capacity(SECRET_LEN + 2));
        payload.push(WIF_PREFIX);
        payload.extend_from_slice(&secret);
        payload.push(COMPRESS_MAGIC);
        Ok(base58::check_encode(&payload))
    }

    /// Raw secret bytes.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(match &self.inner {
            SecretMaterial::P256(k) => k.to_bytes().to_vec(),
            SecretMaterial::P384(k) => k.to_bytes().to_vec(),
            SecretMaterial::Ed25519(k) => k.to_bytes().to_vec(),
        })
    }

    /// Raw secret bytes as lowercase hex.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    pub fn key_type(&self) -> KeyType {
        match self.inner {
            SecretMaterial::P256(_) | SecretMaterial::P384(_) => KeyType::Ecdsa,
            SecretMaterial::Ed25519(_) => KeyType::Eddsa,
        }
    }

    pub fn parameters(&self) -> KeyParameters {
        let curve = match self.inner {
            SecretMaterial::P256(_) => Curve::P256,
            SecretMaterial::P384(_) => Curve::P384,
            SecretMaterial::Ed25519(_) => Curve::Ed25519,
        };
        KeyParameters::new(curve)
    }

    /// Derive the public key: the curve point for ECDSA, the Edwards point
    /// for EdDSA.
    pub fn get_public_key(&self) -> PublicKey {
        match &self.inner {
            SecretMaterial::P256(k) => PublicKey::from_p256(*k.verifying_key()),
            SecretMaterial::P384(k) => PublicKey::from_p384(*k.verifying_key()),
            SecretMaterial::Ed25519(k) => PublicKey::from_ed25519(k.verifying_key()),
        }
    }

    /// True if `scheme` signs with this key's algorithm.
    pub fn is_scheme_supported(&self, scheme: SignatureScheme) -> bool {
        scheme.key_type() == self.key_type()
    }

    /// Sign `msg` with `scheme`, or the key type's default scheme.
    ///
    /// The message is hashed with the scheme's digest, then signed. ECDSA
    /// output is the low-S normalised `r || s`, each padded to the curve's
    /// field size. EdDSA output is `R || S`.
    ///
    /// # Returns
    /// The tagged signature, or `SchemeMismatch` if the scheme belongs to a
    /// different key algorithm.
    pub fn sign(
        &self,
        msg: &[u8],
        scheme: Option<SignatureScheme>,
    ) -> Result<Signature, PrimitivesError> {
        self.sign_with_id(msg, scheme, None)
    }

    /// Like `sign`, attaching a public key identifier to the signature.
    pub fn sign_with_id(
        &self,
        msg: &[u8],
        scheme: Option<SignatureScheme>,
        public_key_id: Option<String>,
    ) -> Result<Signature, PrimitivesError> {
        let scheme = scheme.unwrap_or_else(|| self.key_type().default_scheme());
        if !self.is_scheme_supported(scheme) {
            return Err(PrimitivesError::SchemeMismatch {
                scheme: scheme.label(),
                key_type: self.key_type().label(),
            });
        }
        let hash = scheme.compute_hash(msg);
        let value = self.compute_signature(&hash)?;
        Ok(Signature::new(scheme, value, public_key_id))
    }

    /// Sign the sign content of a `Signable`.
    pub fn sign_signable(
        &self,
        signable: &dyn Signable,
        scheme: Option<SignatureScheme>,
    ) -> Result<Signature, PrimitivesError> {
        self.sign(&signable.get_sign_content(), scheme)
    }

    fn compute_signature(&self, hash: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        match &self.inner {
            SecretMaterial::P256(k) => {
                let sig: p256::ecdsa::Signature = k
                    .sign_prehash(hash)
                    .map_err(|e| PrimitivesError::SigningFailed(e.to_string()))?;
                let sig = sig.normalize_s().unwrap_or(sig);
                Ok(sig.to_bytes().to_vec())
            }
            SecretMaterial::P384(k) => {
                let sig: p384::ecdsa::Signature = k
                    .sign_prehash(hash)
                    .map_err(|e| PrimitivesError::SigningFailed(e.to_string()))?;
                let sig = sig.normalize_s().unwrap_or(sig);
                Ok(sig.to_bytes().to_vec())
            }
            SecretMaterial::Ed25519(k) => Ok(k.sign(hash).to_bytes().to_vec()),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key_type", &self.key_type())
            .field("curve", &self.parameters().curve)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "c19f16785b8f3543bbaf5e1dbb5d398dfa6c85aaad54fc9d71203ce83e505c07";

    #[test]
    fn test_hex_roundtrip() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(key.to_hex().as_str(), KEY_HEX);
        assert_eq!(key.key_type(), KeyType::Ecdsa);
        assert_eq!(key.parameters().curve, Curve::P256);
    }

    #[test]
    fn test_from_bytes_rejects_bad_lengths() {
        assert!(matches!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(PrimitivesError::InvalidPrivateKey(_))
        ));
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("abc").is_err());
    }

    #[test]
    fn test_unsupported_algorithms() {
        let sm2 = PrivateKey::from_bytes_with(
            &[7u8; 32],
            KeyType::Sm2,
            KeyParameters::new(Curve::Sm2P256v1),
        );
        assert!(matches!(sm2, Err(PrimitivesError::UnsupportedAlgorithm(_))));
        assert!(PrivateKey::random_with(KeyType::Ecdsa, KeyParameters::new(Curve::P521)).is_err());
    }

    #[test]
    fn test_public_key_is_deterministic() {
        let a = PrivateKey::from_hex(KEY_HEX).unwrap().get_public_key();
        let b = PrivateKey::from_hex(KEY_HEX).unwrap().get_public_key();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wif_roundtrip() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let wif = key.to_wif().unwrap();
        assert!(wif.starts_with('K') || wif.starts_with('L'));
        let back = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(back.to_hex(), key.to_hex());
    }

    #[test]
    fn test_wif_known_vector() {
        // Standard compressed WIF for the secret 0x00..01.
        let key = PrivateKey::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(key.to_bytes().as_slice(), &expected);
    }

    #[test]
    fn test_wif_bad_checksum() {
        let mut wif = PrivateKey::from_hex(KEY_HEX).unwrap().to_wif().unwrap();
        let last = wif.pop().unwrap();
        wif.push(if last == '1' { '2' } else { '1' });
        assert!(PrivateKey::from_wif(&wif).is_err());
    }

    // -----------------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------------

    #[test]
    fn test_ecdsa_sign_verify_default_scheme() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let msg = b"zeepin transaction content";
        let sig = key.sign(msg, None).unwrap();
        assert_eq!(sig.algorithm, SignatureScheme::EcdsaWithSha256);
        assert_eq!(sig.value.len(), 64);
        assert!(key.get_public_key().verify(msg, &sig));
        assert!(!key.get_public_key().verify(b"other content", &sig));
    }

    #[test]
    fn test_ecdsa_signatures_are_low_s_and_deterministic() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let a = key.sign(b"abc", None).unwrap();
        let b = key.sign(b"abc", None).unwrap();
        assert_eq!(a, b);
        let s = p256::ecdsa::Signature::from_slice(&a.value).unwrap();
        assert!(s.normalize_s().is_none());
    }

    #[test]
    fn test_ecdsa_every_digest_scheme() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let pk = key.get_public_key();
        for scheme in SignatureScheme::ALL {
            if scheme.key_type() != KeyType::Ecdsa {
                continue;
            }
            let sig = key.sign(b"payload", Some(scheme)).unwrap();
            assert!(pk.verify(b"payload", &sig), "{}", scheme);
        }
    }

    #[test]
    fn test_scheme_mismatch() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let err = key.sign(b"x", Some(SignatureScheme::EddsaWithSha512)).unwrap_err();
        assert!(matches!(err, PrimitivesError::SchemeMismatch { .. }));
    }

    #[test]
    fn test_eddsa_sign_verify() {
        let key = PrivateKey::from_hex_with(
            KEY_HEX,
            KeyType::Eddsa,
            KeyParameters::new(Curve::Ed25519),
        )
        .unwrap();
        let sig = key.sign(b"hello", None).unwrap();
        assert_eq!(sig.algorithm, SignatureScheme::EddsaWithSha512);
        assert_eq!(sig.value.len(), 64);
        assert!(key.get_public_key().verify(b"hello", &sig));
    }

    #[test]
    fn test_p384_sign_verify() {
        let key = PrivateKey::random_with(KeyType::Ecdsa, KeyParameters::new(Curve::P384)).unwrap();
        let sig = key.sign(b"hello", Some(SignatureScheme::EcdsaWithSha384)).unwrap();
        assert_eq!(sig.value.len(), 96);
        assert!(key.get_public_key().verify(b"hello", &sig));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let dbg = format!("{:?}", key);
        assert!(!dbg.contains(KEY_HEX));
    }
}
