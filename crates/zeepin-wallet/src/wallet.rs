//! Wallet files: a named list of accounts with a default and shared scrypt
//! parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use zeepin_script::Address;

use crate::account::{check_keystore, Account};
use crate::keystore::ScryptParams;
use crate::WalletError;

pub const WALLET_NAME: &str = "com.github.zeepin";
pub const WALLET_VERSION: &str = "1.0";

/// A wallet. Serializes as
/// `{accounts, defaultAccountAddress, name, scrypt, version}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub accounts: Vec<Account>,
    #[serde(rename = "defaultAccountAddress")]
    pub default_account_address: String,
    pub name: String,
    pub scrypt: ScryptParams,
    pub version: String,
}

impl Wallet {
    fn with_account(account: Account, scrypt: ScryptParams) -> Self {
        Wallet {
            default_account_address: account.address.to_base58(),
            accounts: vec![account],
            name: WALLET_NAME.to_string(),
            scrypt,
            version: WALLET_VERSION.to_string(),
        }
    }

    /// New wallet holding one freshly generated account.
    pub fn create(password: &str, label: Option<&str>) -> Result<Self, WalletError> {
        Self::create_with(password, label, ScryptParams::default())
    }

    /// `create` with explicit scrypt parameters.
    pub fn create_with(
        password: &str,
        label: Option<&str>,
        scrypt: ScryptParams,
    ) -> Result<Self, WalletError> {
        let account = Account::create(password, label, &scrypt)?;
        debug!(address = %account.address, "created wallet");
        Ok(Self::with_account(account, scrypt))
    }

    pub fn import_by_private_key(
        password: &str,
        private_key: &str,
        label: Option<&str>,
    ) -> Result<Self, WalletError> {
        let scrypt = ScryptParams::default();
        let account = Account::import_by_private_key(password, private_key, label, &scrypt)?;
        Ok(Self::with_account(account, scrypt))
    }

    pub fn import_by_wif(password: &str, wif: &str, label: Option<&str>) -> Result<Self, WalletError> {
        let scrypt = ScryptParams::default();
        let account = Account::import_by_wif(password, wif, label, &scrypt)?;
        Ok(Self::with_account(account, scrypt))
    }

    /// Import the first account of a keystore object. The wallet adopts the
    /// keystore's scrypt cost.
    pub fn import_by_keystore(password: &str, keystore: &Value) -> Result<Self, WalletError> {
        let account = Account::import_by_keystore(password, keystore)?;
        let mut scrypt = ScryptParams::default();
        if let Some(n) = keystore["scrypt"]["n"].as_u64().and_then(|n| u32::try_from(n).ok()) {
            scrypt.n = n;
        }
        Ok(Self::with_account(account, scrypt))
    }

    /// Re-seal the first account of a keystore object under `new_password`.
    pub fn modify_password(
        old_password: &str,
        new_password: &str,
        keystore: &Value,
    ) -> Result<Self, WalletError> {
        let account = Account::modify_password(old_password, new_password, keystore)?;
        let mut scrypt = ScryptParams::default();
        if let Some(n) = keystore["scrypt"]["n"].as_u64().and_then(|n| u32::try_from(n).ok()) {
            scrypt.n = n;
        }
        Ok(Self::with_account(account, scrypt))
    }

    /// Add an account unless one with the same address is present.
    pub fn add_account(&mut self, account: Account) {
        if self.accounts.iter().any(|a| a.address == account.address) {
            return;
        }
        self.accounts.push(account);
    }

    pub fn set_default_account(&mut self, address: &Address) {
        self.default_account_address = address.to_base58();
    }

    /// The account whose address is the default, if present.
    pub fn default_account(&self) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.address.to_base58() == self.default_account_address)
    }

    pub fn to_json(&self) -> Result<String, WalletError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a wallet file, requiring a usable first account.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        let value: Value = serde_json::from_str(json)?;
        check_keystore(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}
