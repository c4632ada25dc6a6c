//! Node client boundary and the operations built on it.
//!
//! The transport itself (REST, JSON-RPC, WebSocket) lives outside this
//! crate. A host implements [`NodeClient`] over its transport of choice;
//! the functions here build, sign and encode transactions and interpret
//! what the node returns.

use tracing::debug;
use zeepin_primitives::PrivateKey;
use zeepin_script::Address;
use zeepin_transaction::builder::{make_contract_invoke_tx, make_transfer_tx, TokenType};
use zeepin_transaction::sign::{add_sign, sign_transaction};
use zeepin_transaction::Transaction;

use crate::config::NetworkConfig;
use crate::error::ClientError;
use crate::types::{Balance, SubmitResult, TxEvent};

/// Operations a Zeepin node exposes.
pub trait NodeClient {
    /// Submit a signed transaction. With `pre_exec` the node executes it
    /// without committing and returns the execution result.
    fn submit_transaction(&self, tx_hex: &str, pre_exec: bool) -> Result<SubmitResult, ClientError>;

    /// Execution event of a committed transaction, or `None` while it is
    /// still pending.
    fn get_transaction_event(&self, tx_hash: &str) -> Result<Option<TxEvent>, ClientError>;

    /// Native asset balances of `address`.
    fn get_balance(&self, address: &Address) -> Result<Balance, ClientError>;
}

/// Encode and submit `tx`.
pub fn submit<C: NodeClient>(
    client: &C,
    tx: &Transaction,
    pre_exec: bool,
) -> Result<SubmitResult, ClientError> {
    let tx_hex = tx.to_hex()?;
    debug!(tx_hash = %tx.tx_hash(), pre_exec, "submitting transaction");
    client.submit_transaction(&tx_hex, pre_exec)
}

/// Build, sign and submit a native transfer from `from_key`'s address.
///
/// When `payer_key` is given its address pays the gas and it co-signs.
///
/// # Returns
/// The transaction hash reported by the node.
pub fn transfer<C: NodeClient>(
    client: &C,
    config: &NetworkConfig,
    token_type: TokenType,
    from_key: &PrivateKey,
    to: &Address,
    amount: &str,
    payer_key: Option<&PrivateKey>,
) -> Result<String, ClientError> {
    let from = Address::from_pub_key(&from_key.get_public_key())?;
    let payer = payer_key
        .map(|k| Address::from_pub_key(&k.get_public_key()))
        .transpose()?;
    let mut transfer = make_transfer_tx(
        token_type,
        &from,
        to,
        amount,
        config.gas_price,
        config.gas_limit,
        payer,
    )?;
    sign_transaction(&mut transfer.tx, from_key, None)?;
    if let Some(key) = payer_key {
        add_sign(&mut transfer.tx, key, None)?;
    }
    match submit(client, &transfer.tx, false)? {
        SubmitResult::Submitted { tx_hash } => Ok(tx_hash),
        SubmitResult::PreExecuted(_) => Err(ClientError::Transport(
            "node pre-executed a committed submission".to_string(),
        )),
    }
}

/// Balance of `address` in a named JSON-parameter token contract, read by
/// pre-executing `balanceOf`. The query is paid by the configured default
/// payer and signed by `signer`.
pub fn contract_balance<C: NodeClient>(
    client: &C,
    config: &NetworkConfig,
    contract_name: &str,
    address: &Address,
    signer: &PrivateKey,
) -> Result<String, ClientError> {
    let contract = config.contract_address(contract_name)?;
    let owner = address.to_base58();
    let mut tx = make_contract_invoke_tx(
        "balanceOf",
        &[owner.as_str()],
        &contract,
        Some(config.gas_price),
        Some(config.gas_limit),
        Some(config.default_payer),
    )?;
    sign_transaction(&mut tx, signer, None)?;
    match submit(client, &tx, true)? {
        SubmitResult::PreExecuted(result) => result.result_string(),
        SubmitResult::Submitted { .. } => Err(ClientError::Transport(
            "node committed a pre-execution query".to_string(),
        )),
    }
}

/// `Some(true)` once the transaction executed successfully, `Some(false)`
/// if it failed, `None` while pending.
pub fn transaction_succeeded<C: NodeClient>(
    client: &C,
    tx_hash: &str,
) -> Result<Option<bool>, ClientError> {
    Ok(client
        .get_transaction_event(tx_hash)?
        .map(|event| event.is_success()))
}
