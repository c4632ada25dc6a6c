#![deny(missing_docs)]

//! # zeepin-client
//!
//! Node-facing boundary of the Zeepin SDK.
//!
//! This crate carries the network presets (node URLs, named token
//! contracts, gas defaults), the request and response structures a node
//! speaks, and the [`NodeClient`] trait a host implements over its own
//! transport. Transfers and contract balance queries are built on top of
//! that trait.
//!
//! # Example
//!
//! ```no_run
//! use zeepin_client::NetworkConfig;
//!
//! let config = NetworkConfig::testnet().unwrap();
//! let zusd = config.contract_address("zusd").unwrap();
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::NodeClient;
pub use config::NetworkConfig;
pub use error::ClientError;
pub use types::{Balance, SubmitResult, TxEvent};
