/// Zeepin SDK - Transaction building, signing, and serialization.
///
/// Provides the Transaction type with its fixed-point gas fields and invoke
/// payload, binary/hex serialization, sign content computation, single and
/// M-of-N signature accumulation, and builders for native transfers and
/// contract invocations.

pub mod fixed64;
pub mod payload;
pub mod transaction;
pub mod tx_signature;
pub mod sign;
pub mod builder;

mod error;
pub use error::TransactionError;
pub use fixed64::Fixed64;
pub use payload::Payload;
pub use transaction::{Transaction, TxType};
pub use tx_signature::TxSignature;
pub use builder::{TokenType, Transfer};

#[cfg(test)]
mod tests;
