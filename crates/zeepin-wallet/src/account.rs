//! Keystore accounts.
//!
//! An account holds an address, its public key and the sealed private key
//! together with the salt and algorithm metadata needed to open it again.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use zeepin_primitives::util::random_bytes;
use zeepin_primitives::{KeyParameters, KeyType, PrivateKey, SignatureScheme};
use zeepin_script::Address;

use crate::keystore::{self, random_salt, ScryptParams};
use crate::WalletError;

/// A wallet account. Serializes with the keystore file field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub algorithm: KeyType,
    #[serde(rename = "enc-alg")]
    pub enc_alg: String,
    pub hash: String,
    #[serde(rename = "isDefault")]
    pub is_default: bool,
    /// `base64(ciphertext || tag)` of the private key.
    pub key: String,
    pub label: String,
    pub lock: bool,
    pub parameters: KeyParameters,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Base64 of the 16-byte salt.
    pub salt: String,
    #[serde(rename = "signatureScheme")]
    pub signature_scheme: SignatureScheme,
}

/// The fields of `accounts[0]` an import needs, pulled from an untyped
/// keystore object.
struct KeystoreEntry {
    address: Address,
    key: String,
    salt: String,
    label: String,
    algorithm: KeyType,
    parameters: KeyParameters,
    params: ScryptParams,
}

impl KeystoreEntry {
    fn from_value(keystore: &Value) -> Result<Self, WalletError> {
        check_keystore(keystore)?;
        let entry = &keystore["accounts"][0];
        let field = |name: &str| entry[name].as_str().unwrap_or_default().to_string();

        let address = Address::from_base58(&field("address"))?;
        let algorithm = match entry["algorithm"].as_str() {
            Some(label) => KeyType::from_label(label)?,
            None => KeyType::Ecdsa,
        };
        let parameters = match entry["parameters"]["curve"].as_str() {
            Some(curve) => KeyParameters::new(zeepin_primitives::Curve::from_label(curve)?),
            None => KeyParameters::new(algorithm.default_curve()),
        };
        let params = match keystore["scrypt"]["n"].as_u64() {
            Some(n) => {
                let n = u32::try_from(n).map_err(|_| {
                    WalletError::InvalidKeystore(format!("scrypt cost {} out of range", n))
                })?;
                ScryptParams::with_cost(n)
            }
            None => ScryptParams::default(),
        };
        Ok(KeystoreEntry {
            address,
            key: field("key"),
            salt: field("salt"),
            label: field("label"),
            algorithm,
            parameters,
            params,
        })
    }

    fn open(&self, password: &str) -> Result<PrivateKey, WalletError> {
        keystore::decrypt_with(
            &self.key,
            &self.address,
            self.salt.as_bytes(),
            password,
            &self.params,
            self.algorithm,
            self.parameters,
        )
    }
}

/// Require `accounts[0]` with non-empty `address`, `key` and `salt`.
pub fn check_keystore(keystore: &Value) -> Result<(), WalletError> {
    let entry = keystore["accounts"]
        .get(0)
        .ok_or_else(|| WalletError::InvalidKeystore("no accounts".to_string()))?;
    for name in ["address", "key", "salt"] {
        match entry[name].as_str() {
            Some(v) if !v.is_empty() => {}
            _ => {
                return Err(WalletError::InvalidKeystore(format!(
                    "accounts[0].{} is missing",
                    name
                )))
            }
        }
    }
    Ok(())
}

fn random_label() -> String {
    hex::encode(random_bytes(4))
}

impl Account {
    /// Seal `key` under `password` with a fresh salt.
    ///
    /// # Arguments
    /// * `key` - The private key to store.
    /// * `password` - Passphrase for the envelope.
    /// * `label` - Display label; a random 4-byte hex string if `None`.
    /// * `params` - scrypt cost parameters.
    pub fn from_private_key(
        key: &PrivateKey,
        password: &str,
        label: Option<&str>,
        params: &ScryptParams,
    ) -> Result<Self, WalletError> {
        let public_key = key.get_public_key();
        let address = Address::from_pub_key(&public_key)?;
        let salt = random_salt();
        let sealed = keystore::encrypt(key, &address, &salt, password, params)?;
        let key_type = key.key_type();
        debug!(address = %address, "created account");
        Ok(Account {
            address,
            algorithm: key_type,
            enc_alg: "aes-256-gcm".to_string(),
            hash: "sha256".to_string(),
            is_default: true,
            key: sealed,
            label: label.map(str::to_string).unwrap_or_else(random_label),
            lock: false,
            parameters: key.parameters(),
            public_key: public_key.serialize_hex(),
            salt: STANDARD.encode(salt),
            signature_scheme: key_type.default_scheme(),
        })
    }

    /// New account with a random ECDSA P-256 key.
    pub fn create(
        password: &str,
        label: Option<&str>,
        params: &ScryptParams,
    ) -> Result<Self, WalletError> {
        Self::from_private_key(&PrivateKey::random(), password, label, params)
    }

    /// Import a hex-encoded ECDSA P-256 private key.
    pub fn import_by_private_key(
        password: &str,
        private_key: &str,
        label: Option<&str>,
        params: &ScryptParams,
    ) -> Result<Self, WalletError> {
        let key = PrivateKey::from_hex(private_key)?;
        Self::from_private_key(&key, password, label, params)
    }

    /// Import a WIF-encoded private key.
    pub fn import_by_wif(
        password: &str,
        wif: &str,
        label: Option<&str>,
        params: &ScryptParams,
    ) -> Result<Self, WalletError> {
        let key = PrivateKey::from_wif(wif)?;
        Self::from_private_key(&key, password, label, params)
    }

    /// Import `accounts[0]` of a keystore object, proving the password by
    /// opening the key. The sealed key and salt are kept as they are.
    pub fn import_by_keystore(password: &str, keystore: &Value) -> Result<Self, WalletError> {
        let entry = KeystoreEntry::from_value(keystore)?;
        let key = entry.open(password)?;
        debug!(address = %entry.address, "imported account from keystore");
        Ok(Account {
            address: entry.address,
            algorithm: entry.algorithm,
            enc_alg: "aes-256-gcm".to_string(),
            hash: "sha256".to_string(),
            is_default: true,
            key: entry.key,
            label: entry.label,
            lock: false,
            parameters: entry.parameters,
            public_key: key.get_public_key().serialize_hex(),
            salt: entry.salt,
            signature_scheme: entry.algorithm.default_scheme(),
        })
    }

    /// Re-seal `accounts[0]` of a keystore object under a new password and
    /// a fresh salt, keeping the keystore's scrypt cost.
    pub fn modify_password(
        old_password: &str,
        new_password: &str,
        keystore: &Value,
    ) -> Result<Self, WalletError> {
        let entry = KeystoreEntry::from_value(keystore)?;
        let key = entry.open(old_password)?;
        let account = Self::from_private_key(
            &key,
            new_password,
            Some(entry.label.as_str()),
            &entry.params,
        )?;
        debug!(address = %account.address, "changed account password");
        Ok(account)
    }

    /// Open the sealed private key.
    pub fn export_private_key(
        &self,
        password: &str,
        params: &ScryptParams,
    ) -> Result<PrivateKey, WalletError> {
        keystore::decrypt_with(
            &self.key,
            &self.address,
            self.salt.as_bytes(),
            password,
            params,
            self.algorithm,
            self.parameters,
        )
    }

    pub fn to_json(&self) -> Result<String, WalletError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY_HEX: &str = "c19f16785b8f3543bbaf5e1dbb5d398dfa6c85aaad54fc9d71203ce83e505c07";
    const PUBLIC_KEY_HEX: &str = "02d3d048aca7bdee582a611d0b8acc45642950dc6167aee63abbdcd1a5781c6319";
    const ADDRESS: &str = "ZTSkqL4oxqgKmPsUqbfJ5tDgBi62BMtqs9";

    const FAST: ScryptParams = ScryptParams {
        dk_len: 64,
        n: 16,
        p: 8,
        r: 8,
    };

    fn keystore_of(account: &Account, n: u32) -> Value {
        json!({
            "scrypt": { "n": n },
            "accounts": [serde_json::to_value(account).unwrap()],
        })
    }

    #[test]
    fn test_import_by_private_key_fields() {
        let account = Account::import_by_private_key("pw", KEY_HEX, None, &FAST).unwrap();
        assert_eq!(account.address.to_base58(), ADDRESS);
        assert_eq!(account.public_key, PUBLIC_KEY_HEX);
        assert_eq!(account.label.len(), 8);
        assert_eq!(account.signature_scheme, SignatureScheme::EcdsaWithSha256);
        assert!(account.is_default);
        assert!(!account.lock);
        assert_eq!(STANDARD.decode(&account.salt).unwrap().len(), 16);

        let key = account.export_private_key("pw", &FAST).unwrap();
        assert_eq!(key.to_hex().as_str(), KEY_HEX);
        assert!(account.export_private_key("wrong", &FAST).is_err());
    }

    #[test]
    fn test_json_field_names() {
        let account = Account::import_by_private_key("pw", KEY_HEX, Some("main"), &FAST).unwrap();
        let value: Value = serde_json::from_str(&account.to_json().unwrap()).unwrap();
        assert_eq!(value["address"], ADDRESS);
        assert_eq!(value["algorithm"], "ECDSA");
        assert_eq!(value["enc-alg"], "aes-256-gcm");
        assert_eq!(value["hash"], "sha256");
        assert_eq!(value["isDefault"], true);
        assert_eq!(value["label"], "main");
        assert_eq!(value["lock"], false);
        assert_eq!(value["parameters"]["curve"], "P-256");
        assert_eq!(value["publicKey"], PUBLIC_KEY_HEX);
        assert_eq!(value["signatureScheme"], "SHA256withECDSA");
        assert_eq!(Account::from_json(&account.to_json().unwrap()).unwrap(), account);
    }

    #[test]
    fn test_import_by_wif() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let wif = key.to_wif().unwrap();
        let account = Account::import_by_wif("pw", &wif, None, &FAST).unwrap();
        assert_eq!(account.address.to_base58(), ADDRESS);
    }

    #[test]
    fn test_import_by_keystore() {
        let original = Account::import_by_private_key("pw", KEY_HEX, Some("x"), &FAST).unwrap();
        let imported = Account::import_by_keystore("pw", &keystore_of(&original, FAST.n)).unwrap();
        assert_eq!(imported.address, original.address);
        assert_eq!(imported.key, original.key);
        assert_eq!(imported.salt, original.salt);
        assert_eq!(imported.public_key, PUBLIC_KEY_HEX);

        assert!(matches!(
            Account::import_by_keystore("nope", &keystore_of(&original, FAST.n)),
            Err(WalletError::Decryption(_))
        ));
    }

    #[test]
    fn test_modify_password_reseals_with_new_salt() {
        let original = Account::import_by_private_key("old", KEY_HEX, Some("x"), &FAST).unwrap();
        let changed =
            Account::modify_password("old", "new", &keystore_of(&original, FAST.n)).unwrap();
        assert_eq!(changed.address, original.address);
        assert_eq!(changed.label, "x");
        assert_ne!(changed.salt, original.salt);
        assert_eq!(
            changed.export_private_key("new", &FAST).unwrap().to_hex().as_str(),
            KEY_HEX
        );
        assert!(changed.export_private_key("old", &FAST).is_err());
    }

    #[test]
    fn test_check_keystore() {
        assert!(matches!(
            check_keystore(&json!({})),
            Err(WalletError::InvalidKeystore(_))
        ));
        assert!(check_keystore(&json!({"accounts": []})).is_err());
        assert!(check_keystore(&json!({"accounts": [{"address": "a", "key": "b"}]})).is_err());
        assert!(check_keystore(&json!({"accounts": [{"address": "a", "key": "b", "salt": "c"}]}))
            .is_ok());
    }
}
