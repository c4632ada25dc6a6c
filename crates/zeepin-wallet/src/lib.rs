/// Zeepin SDK - Keystore envelope, accounts and wallet files.
///
/// Seals private keys with scrypt and AES-256-GCM bound to their address,
/// and reads and writes the JSON wallet format with its account entries.

mod error;
pub use error::WalletError;

pub mod keystore;
pub mod account;
pub mod wallet;

pub use account::Account;
pub use keystore::{transform_password, ScryptParams};
pub use wallet::Wallet;

#[cfg(test)]
mod tests;
