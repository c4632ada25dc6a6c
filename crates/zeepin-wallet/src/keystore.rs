//! Password-based private key envelope.
//!
//! The passphrase is stretched with scrypt over a 16-byte salt into 64
//! bytes. Bytes `0..12` are the AES-256-GCM nonce and bytes `32..64` the
//! key. The base58 address is the associated data, so a ciphertext only
//! opens for the address it was sealed to. The result is
//! `base64(ciphertext || tag)`.
//!
//! Passphrases are NFC-normalized before stretching.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;
use zeepin_primitives::util::random_bytes;
use zeepin_primitives::{KeyParameters, KeyType, PrivateKey};
use zeepin_script::Address;

use crate::WalletError;

/// Salt length after normalization.
pub const SALT_LEN: usize = 16;

/// Derived key length the envelope layout requires.
pub const DERIVED_KEY_LEN: usize = 64;

const NONCE_LEN: usize = 12;

/// scrypt cost parameters, written into wallet files as
/// `{"dkLen":64,"n":1024,"p":8,"r":8}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    #[serde(rename = "dkLen")]
    pub dk_len: usize,
    pub n: u32,
    pub p: u32,
    pub r: u32,
}

impl ScryptParams {
    /// Default block size and parallelism with a custom cost.
    pub fn with_cost(n: u32) -> Self {
        ScryptParams {
            n,
            ..Self::default()
        }
    }

    fn derive(&self, passphrase: &str, salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        if self.dk_len != DERIVED_KEY_LEN {
            return Err(WalletError::InvalidParameter(format!(
                "derived key length must be {}, got {}",
                DERIVED_KEY_LEN, self.dk_len
            )));
        }
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(WalletError::InvalidParameter(format!(
                "scrypt cost must be a power of two greater than 1, got {}",
                self.n
            )));
        }
        let log_n = self.n.trailing_zeros() as u8;
        let params = scrypt::Params::new(log_n, self.r, self.p, self.dk_len)
            .map_err(|e| WalletError::InvalidParameter(format!("scrypt parameters: {}", e)))?;
        let passphrase = Zeroizing::new(passphrase.nfc().collect::<String>());
        let mut derived = Zeroizing::new(vec![0u8; self.dk_len]);
        scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut derived)
            .map_err(|e| WalletError::InvalidParameter(format!("scrypt output: {}", e)))?;
        Ok(derived)
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        ScryptParams {
            dk_len: DERIVED_KEY_LEN,
            n: 1024,
            p: 8,
            r: 8,
        }
    }
}

/// Fresh random salt.
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&random_bytes(SALT_LEN));
    salt
}

/// Accept a salt as 16 raw bytes, 24 base64 characters or 32 hex
/// characters.
pub fn normalize_salt(salt: &[u8]) -> Result<[u8; SALT_LEN], WalletError> {
    let decoded = match salt.len() {
        SALT_LEN => salt.to_vec(),
        24 => STANDARD
            .decode(salt)
            .map_err(|e| WalletError::InvalidParameter(format!("salt is not base64: {}", e)))?,
        32 => hex::decode(salt)
            .map_err(|e| WalletError::InvalidParameter(format!("salt is not hex: {}", e)))?,
        n => {
            return Err(WalletError::InvalidParameter(format!(
                "salt must be 16 bytes, got {} input bytes",
                n
            )))
        }
    };
    decoded.as_slice().try_into().map_err(|_| {
        WalletError::InvalidParameter(format!("salt decodes to {} bytes", decoded.len()))
    })
}

fn cipher_for(derived: &[u8]) -> Result<Aes256Gcm, WalletError> {
    Aes256Gcm::new_from_slice(&derived[32..DERIVED_KEY_LEN])
        .map_err(|e| WalletError::InvalidParameter(format!("cipher key: {}", e)))
}

/// Seal `key` for `address`.
///
/// # Arguments
/// * `key` - The private key; it must derive `address`.
/// * `address` - Bound as associated data.
/// * `salt` - Raw, base64 or hex salt (see `normalize_salt`).
/// * `passphrase` - The password.
/// * `params` - scrypt cost parameters.
///
/// # Returns
/// `base64(ciphertext || tag)`, or `InvalidAddress` if `key` does not
/// belong to `address`.
pub fn encrypt(
    key: &PrivateKey,
    address: &Address,
    salt: &[u8],
    passphrase: &str,
    params: &ScryptParams,
) -> Result<String, WalletError> {
    let own = Address::from_pub_key(&key.get_public_key())?;
    if own != *address {
        return Err(WalletError::InvalidAddress(format!(
            "key belongs to {}, not {}",
            own, address
        )));
    }
    let salt = normalize_salt(salt)?;
    let derived = params.derive(passphrase, &salt)?;
    let cipher = cipher_for(&derived)?;
    let plaintext = key.to_bytes();
    let aad = address.to_base58();
    let sealed = cipher
        .encrypt(
            Nonce::from_slice(&derived[..NONCE_LEN]),
            Payload {
                msg: plaintext.as_slice(),
                aad: aad.as_bytes(),
            },
        )
        .map_err(|_| WalletError::InvalidParameter("aes-gcm encryption failed".to_string()))?;
    debug!(address = %address, n = params.n, "sealed private key");
    Ok(STANDARD.encode(sealed))
}

/// Open an ECDSA P-256 key sealed by `encrypt`.
pub fn decrypt(
    encrypted: &str,
    address: &Address,
    salt: &[u8],
    passphrase: &str,
    params: &ScryptParams,
) -> Result<PrivateKey, WalletError> {
    decrypt_with(
        encrypted,
        address,
        salt,
        passphrase,
        params,
        KeyType::Ecdsa,
        KeyParameters::default(),
    )
}

/// Open a sealed key of the given algorithm.
///
/// # Returns
/// The key, or `Decryption` if the tag does not verify or the decrypted key
/// does not derive `address`.
pub fn decrypt_with(
    encrypted: &str,
    address: &Address,
    salt: &[u8],
    passphrase: &str,
    params: &ScryptParams,
    key_type: KeyType,
    key_params: KeyParameters,
) -> Result<PrivateKey, WalletError> {
    let salt = normalize_salt(salt)?;
    let sealed = STANDARD
        .decode(encrypted)
        .map_err(|e| WalletError::Decryption(format!("ciphertext is not base64: {}", e)))?;
    let derived = params.derive(passphrase, &salt)?;
    let cipher = cipher_for(&derived)?;
    let aad = address.to_base58();
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&derived[..NONCE_LEN]),
            Payload {
                msg: sealed.as_slice(),
                aad: aad.as_bytes(),
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| WalletError::Decryption("authentication tag mismatch".to_string()))?;

    let key = PrivateKey::from_bytes_with(&plaintext, key_type, key_params)
        .map_err(|e| WalletError::Decryption(format!("decrypted key is invalid: {}", e)))?;
    if Address::from_pub_key(&key.get_public_key())? != *address {
        warn!(address = %address, "decrypted key does not match address");
        return Err(WalletError::Decryption(
            "decrypted key does not match address".to_string(),
        ));
    }
    debug!(address = %address, "opened private key");
    Ok(key)
}

/// Decode a password that arrives base64-encoded. Anything that does not
/// round-trip through base64 to valid UTF-8 is returned unchanged.
pub fn transform_password(password: &str) -> String {
    match STANDARD.decode(password) {
        Ok(bytes) if STANDARD.encode(&bytes) == password => {
            String::from_utf8(bytes).unwrap_or_else(|_| password.to_string())
        }
        _ => password.to_string(),
    }
}
