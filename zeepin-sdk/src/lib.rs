#![deny(missing_docs)]

//! Zeepin Chain SDK - Complete SDK.
//!
//! Re-exports all Zeepin SDK components for convenient single-crate usage.

pub use zeepin_primitives as primitives;
pub use zeepin_script as script;
pub use zeepin_transaction as transaction;
pub use zeepin_wallet as wallet;
pub use zeepin_client as client;
