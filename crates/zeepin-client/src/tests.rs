//! Tests for the client boundary against an in-memory node.

use std::cell::RefCell;

use zeepin_primitives::{PrivateKey, Signable, Signature};
use zeepin_script::Address;
use zeepin_transaction::builder::TokenType;
use zeepin_transaction::Transaction;

use crate::client::{contract_balance, transaction_succeeded, transfer, NodeClient};
use crate::config::NetworkConfig;
use crate::error::ClientError;
use crate::types::{Balance, PreExecResult, SubmitResult, TxEvent};

/// Records submissions and answers from canned data.
#[derive(Default)]
struct MockNode {
    submitted: RefCell<Vec<(String, bool)>>,
    pre_exec_result: Option<String>,
    event: Option<TxEvent>,
}

impl NodeClient for MockNode {
    fn submit_transaction(&self, tx_hex: &str, pre_exec: bool) -> Result<SubmitResult, ClientError> {
        self.submitted
            .borrow_mut()
            .push((tx_hex.to_string(), pre_exec));
        if pre_exec {
            return Ok(SubmitResult::PreExecuted(PreExecResult {
                state: 1,
                gas: 20000,
                result: serde_json::Value::String(self.pre_exec_result.clone().unwrap_or_default()),
            }));
        }
        let tx = Transaction::from_hex(tx_hex)?;
        Ok(SubmitResult::Submitted {
            tx_hash: tx.tx_hash(),
        })
    }

    fn get_transaction_event(&self, _tx_hash: &str) -> Result<Option<TxEvent>, ClientError> {
        Ok(self.event.clone())
    }

    fn get_balance(&self, _address: &Address) -> Result<Balance, ClientError> {
        Ok(serde_json::from_str(r#"{"zpt":"10","gala":"3"}"#)?)
    }
}

fn verify_all(tx: &Transaction) -> bool {
    let content = tx.get_sign_content();
    tx.sigs.iter().all(|entry| {
        let sig = Signature::deserialize(&entry.sig_data[0]).unwrap();
        entry.pub_keys[0].verify(&content, &sig)
    })
}

// -----------------------------------------------------------------------
// Transfers
// -----------------------------------------------------------------------

#[test]
fn test_transfer_submits_signed_tx() {
    let node = MockNode::default();
    let config = NetworkConfig::testnet().unwrap();
    let from = PrivateKey::random();
    let to = Address::from_pub_key(&PrivateKey::random().get_public_key()).unwrap();

    let tx_hash = transfer(&node, &config, TokenType::Zpt, &from, &to, "100000", None).unwrap();

    let submitted = node.submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert!(!submitted[0].1);
    let tx = Transaction::from_hex(&submitted[0].0).unwrap();
    assert_eq!(tx.tx_hash(), tx_hash);
    assert_eq!(tx.payer, Address::from_pub_key(&from.get_public_key()).unwrap());
    assert_eq!(tx.gas_price, config.gas_price);
    assert_eq!(tx.sigs.len(), 1);
    assert!(verify_all(&tx));
}

#[test]
fn test_transfer_with_payer_cosigns() {
    let node = MockNode::default();
    let config = NetworkConfig::testnet().unwrap();
    let from = PrivateKey::random();
    let payer = PrivateKey::random();
    let to = Address::from_pub_key(&from.get_public_key()).unwrap();

    transfer(&node, &config, TokenType::Gala, &from, &to, "5", Some(&payer)).unwrap();

    let tx = Transaction::from_hex(&node.submitted.borrow()[0].0).unwrap();
    assert_eq!(tx.payer, Address::from_pub_key(&payer.get_public_key()).unwrap());
    assert_eq!(tx.sigs.len(), 2);
    assert!(verify_all(&tx));
}

#[test]
fn test_transfer_rejects_bad_amount_before_submitting() {
    let node = MockNode::default();
    let config = NetworkConfig::testnet().unwrap();
    let from = PrivateKey::random();
    let to = Address::from_pub_key(&from.get_public_key()).unwrap();
    assert!(matches!(
        transfer(&node, &config, TokenType::Zpt, &from, &to, "0", None),
        Err(ClientError::Transaction(_))
    ));
    assert!(node.submitted.borrow().is_empty());
}

// -----------------------------------------------------------------------
// Queries
// -----------------------------------------------------------------------

#[test]
fn test_contract_balance_pre_executes() {
    let node = MockNode {
        pre_exec_result: Some(hex::encode("4200")),
        ..Default::default()
    };
    let config = NetworkConfig::testnet().unwrap();
    let owner = Address::from_pub_key(&PrivateKey::random().get_public_key()).unwrap();

    let balance = contract_balance(&node, &config, "zusd", &owner, &PrivateKey::random()).unwrap();
    assert_eq!(balance, "4200");

    let submitted = node.submitted.borrow();
    assert!(submitted[0].1);
    let tx = Transaction::from_hex(&submitted[0].0).unwrap();
    assert_eq!(tx.payer, config.default_payer);
    assert_eq!(tx.tx_attributes, 0x01);
    let code = String::from_utf8_lossy(tx.payload.code()).to_string();
    assert!(code.contains("balanceOf"));
    assert!(code.contains(&owner.to_base58()));
}

#[test]
fn test_contract_balance_unknown_contract() {
    let node = MockNode::default();
    let config = NetworkConfig::testnet().unwrap();
    let owner = Address::default();
    assert!(matches!(
        contract_balance(&node, &config, "nope", &owner, &PrivateKey::random()),
        Err(ClientError::UnknownContract(_))
    ));
}

#[test]
fn test_event_and_balance() {
    let pending = MockNode::default();
    assert_eq!(transaction_succeeded(&pending, "ab").unwrap(), None);

    let done = MockNode {
        event: Some(TxEvent {
            tx_hash: "ab".to_string(),
            state: 0,
            gas_consumed: 0,
            notifications: vec![],
        }),
        ..Default::default()
    };
    assert_eq!(transaction_succeeded(&done, "ab").unwrap(), Some(false));

    let balance = done.get_balance(&Address::default()).unwrap();
    assert_eq!(balance.get("gala"), Some("3"));
}
