//! Tests for the zeepin-wallet crate.
//!
//! Scenarios spanning keystore, account and wallet: a keystore file
//! written by one wallet is imported by another, keys opened from it sign
//! verifiable messages, and tampering with stored fields is detected.

use serde_json::Value;
use zeepin_primitives::Signable;
use zeepin_script::Address;

use crate::keystore::{self, ScryptParams};
use crate::{transform_password, Account, Wallet, WalletError};

const FAST: ScryptParams = ScryptParams {
    dk_len: 64,
    n: 16,
    p: 8,
    r: 8,
};

struct Message(&'static [u8]);

impl Signable for Message {
    fn get_sign_content(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn serialize_unsigned_data(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// -----------------------------------------------------------------------
// Keystore file exchange
// -----------------------------------------------------------------------

/// A wallet file round-trips through JSON text and its key signs.
#[test]
fn test_keystore_file_exchange() {
    init_tracing();
    let wallet = Wallet::create_with("hunter2", Some("main"), FAST).unwrap();
    let text = wallet.to_json().unwrap();

    let keystore: Value = serde_json::from_str(&text).unwrap();
    let imported = Wallet::import_by_keystore("hunter2", &keystore).unwrap();
    let account = imported.default_account().unwrap();
    assert_eq!(account.label, "main");

    let key = account.export_private_key("hunter2", &imported.scrypt).unwrap();
    let sig = key.sign_signable(&Message(b"zeepin"), None).unwrap();
    assert!(key.get_public_key().verify(b"zeepin", &sig));
    assert_eq!(account.public_key, key.get_public_key().serialize_hex());
}

/// A base64-transported password opens the account sealed with the plain
/// password.
#[test]
fn test_transformed_password_opens_account() {
    let account = Account::create("correct horse", None, &FAST).unwrap();
    let password = transform_password("Y29ycmVjdCBob3JzZQ==");
    assert!(account.export_private_key(&password, &FAST).is_ok());
}

// -----------------------------------------------------------------------
// Tampering
// -----------------------------------------------------------------------

/// Pointing an account at a different address makes the key unreadable.
#[test]
fn test_swapped_address_is_rejected() {
    let mut account = Account::create("pw", None, &FAST).unwrap();
    let other = Account::create("pw", None, &FAST).unwrap();
    account.address = other.address;
    assert!(matches!(
        account.export_private_key("pw", &FAST),
        Err(WalletError::Decryption(_))
    ));
}

/// Reusing another account's ciphertext under this account's address and
/// salt fails, even with the right password.
#[test]
fn test_swapped_ciphertext_is_rejected() {
    let mut account = Account::create("pw", None, &FAST).unwrap();
    let other = Account::create("pw", None, &FAST).unwrap();
    account.key = other.key.clone();
    assert!(account.export_private_key("pw", &FAST).is_err());
}

/// Changing the stored salt breaks decryption.
#[test]
fn test_changed_salt_is_rejected() {
    let mut account = Account::create("pw", None, &FAST).unwrap();
    account.salt = "AAAAAAAAAAAAAAAAAAAAAA==".to_string();
    assert!(account.export_private_key("pw", &FAST).is_err());
}

/// The envelope functions work directly on a key and address.
#[test]
fn test_envelope_direct() {
    let key = zeepin_primitives::PrivateKey::random();
    let address = Address::from_pub_key(&key.get_public_key()).unwrap();
    let salt = keystore::random_salt();
    let sealed = keystore::encrypt(&key, &address, &salt, "pw", &FAST).unwrap();
    let salt_b64 = {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(salt)
    };
    let opened = keystore::decrypt(&sealed, &address, salt_b64.as_bytes(), "pw", &FAST).unwrap();
    assert_eq!(opened.to_bytes(), key.to_bytes());
}
