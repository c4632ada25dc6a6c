//! Transaction builders for token transfers and contract calls.
//!
//! Three invocation formats share the same transaction envelope:
//! - native contracts (ZPT, GALA): struct/array arguments, the method name
//!   and contract hash, then a SYSCALL to the native dispatcher;
//! - JSON-parameter contracts: a tagged, length-prefixed JSON argument
//!   blob addressed to an arbitrary contract;
//! - APPCALL: pre-encoded arguments followed by APPCALL and the contract
//!   hash.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use zeepin_script::builder::ProgramBuilder;
use zeepin_script::native::{build_native_code_script, NativeArg};
use zeepin_script::opcodes::{OP_APPCALL, OP_SYSCALL};
use zeepin_script::Address;

use crate::fixed64::Fixed64;
use crate::payload::Payload;
use crate::transaction::{Transaction, TxType};
use crate::TransactionError;

/// ZPT native contract hash.
pub const ZPT_CONTRACT: &str = "0000000000000000000000000000000000000001";
/// GALA native contract hash.
pub const GALA_CONTRACT: &str = "0000000000000000000000000000000000000002";
/// Syscall name of the native contract dispatcher.
pub const NATIVE_INVOKE_NAME: &str = "ZeepinChain.Native.Invoke";

/// Attribute byte set on JSON-parameter contract invocations.
const CONTRACT_INVOKE_ATTRIBUTES: u8 = 0x01;
/// Version tag leading a JSON-parameter invocation.
const CONTRACT_INVOKE_TAG: &[u8] = b"1";

/// Native asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Zpt,
    Gala,
}

impl TokenType {
    pub fn label(&self) -> &'static str {
        match self {
            TokenType::Zpt => "zpt",
            TokenType::Gala => "gala",
        }
    }

    /// Address of the asset's native contract.
    pub fn contract(&self) -> Address {
        let mut hash = [0u8; 20];
        hash[19] = match self {
            TokenType::Zpt => 0x01,
            TokenType::Gala => 0x02,
        };
        Address::new(hash)
    }
}

impl FromStr for TokenType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zpt" => Ok(TokenType::Zpt),
            "gala" => Ok(TokenType::Gala),
            other => Err(TransactionError::InvalidParameter(format!(
                "unknown token type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transfer transaction together with the values it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub tx: Transaction,
    pub token_type: TokenType,
    pub from: Address,
    pub to: Address,
    pub amount: BigInt,
    pub method: String,
}

/// Parse a transfer amount, accepting only integers greater than zero.
pub fn verify_amount(amount: &str) -> Result<BigInt, TransactionError> {
    let value = BigInt::from_str(amount)
        .map_err(|_| TransactionError::InvalidAmount(format!("'{}' is not an integer", amount)))?;
    if value <= BigInt::zero() {
        return Err(TransactionError::InvalidAmount(format!(
            "'{}' is not positive",
            amount
        )));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Native contracts
// ---------------------------------------------------------------------------

/// Invoke transaction calling `func_name` on a native contract.
///
/// # Arguments
/// * `func_name` - Contract method.
/// * `params` - Arguments already encoded by `build_native_code_script`.
/// * `contract` - Native contract address.
/// * `gas_price`, `gas_limit` - Left at zero when `None`.
/// * `payer` - Left all-zero when `None`.
pub fn make_native_contract_tx(
    func_name: &str,
    params: &[u8],
    contract: &Address,
    gas_price: Option<Fixed64>,
    gas_limit: Option<Fixed64>,
    payer: Option<Address>,
) -> Result<Transaction, TransactionError> {
    let mut code = ProgramBuilder::new();
    code.append(params);
    code.push_data(func_name.as_bytes())?
        .push_data(contract.as_bytes())?
        .push_int(0)
        .push_opcode(OP_SYSCALL)
        .push_data(NATIVE_INVOKE_NAME.as_bytes())?;

    let mut tx = Transaction::new();
    tx.tx_type = TxType::Invoke;
    tx.payload = Payload::invoke(code.into_bytes());
    if let Some(price) = gas_price {
        tx.gas_price = price;
    }
    if let Some(limit) = gas_limit {
        tx.gas_limit = limit;
    }
    if let Some(payer) = payer {
        tx.payer = payer;
    }
    Ok(tx)
}

/// Native transfer of `amount` from `from` to `to`. The payer defaults to
/// the sender.
pub fn make_transfer_tx(
    token_type: TokenType,
    from: &Address,
    to: &Address,
    amount: &str,
    gas_price: Fixed64,
    gas_limit: Fixed64,
    payer: Option<Address>,
) -> Result<Transfer, TransactionError> {
    let amount = verify_amount(amount)?;
    let state = NativeArg::Struct(vec![
        NativeArg::Address(*from),
        NativeArg::Address(*to),
        NativeArg::BigInt(amount.clone()),
    ]);
    let params = build_native_code_script(&[NativeArg::Array(vec![state])])?;
    let tx = make_native_contract_tx(
        "transfer",
        &params,
        &token_type.contract(),
        Some(gas_price),
        Some(gas_limit),
        Some(payer.unwrap_or(*from)),
    )?;
    Ok(Transfer {
        tx,
        token_type,
        from: *from,
        to: *to,
        amount,
        method: "transfer".to_string(),
    })
}

/// Withdraw GALA unlocked by ZPT holdings: `transferFrom` on the GALA
/// contract with the ZPT contract as the sender.
pub fn make_withdraw_gala_tx(
    from: &Address,
    to: &Address,
    amount: &str,
    payer: &Address,
    gas_price: Fixed64,
    gas_limit: Fixed64,
) -> Result<Transfer, TransactionError> {
    let amount = verify_amount(amount)?;
    let state = NativeArg::Struct(vec![
        NativeArg::Address(*from),
        NativeArg::Address(TokenType::Zpt.contract()),
        NativeArg::Address(*to),
        NativeArg::BigInt(amount.clone()),
    ]);
    let params = build_native_code_script(&[state])?;
    let tx = make_native_contract_tx(
        "transferFrom",
        &params,
        &TokenType::Gala.contract(),
        Some(gas_price),
        Some(gas_limit),
        Some(*payer),
    )?;
    Ok(Transfer {
        tx,
        token_type: TokenType::Gala,
        from: *from,
        to: *to,
        amount,
        method: "transferFrom".to_string(),
    })
}

// ---------------------------------------------------------------------------
// JSON-parameter contracts
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ContractParam<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct ContractParams<'a> {
    #[serde(rename = "Params")]
    params: Vec<ContractParam<'a>>,
}

fn length_byte(len: usize, what: &str) -> Result<u8, TransactionError> {
    u8::try_from(len).map_err(|_| {
        TransactionError::InvalidParameter(format!("{} is {} bytes, at most 255 allowed", what, len))
    })
}

/// Invoke `method` on a JSON-parameter contract with string arguments.
///
/// The code is `"1" || reversed contract hash || u8 len || method ||
/// u8 len || {"Params":[{"type":"string","value":..},..]}` and the
/// attribute byte is set to 0x01.
pub fn make_contract_invoke_tx(
    method: &str,
    args: &[&str],
    contract: &Address,
    gas_price: Option<Fixed64>,
    gas_limit: Option<Fixed64>,
    payer: Option<Address>,
) -> Result<Transaction, TransactionError> {
    let params = ContractParams {
        params: args
            .iter()
            .map(|value| ContractParam {
                kind: "string",
                value,
            })
            .collect(),
    };
    let json = serde_json::to_string(&params)
        .map_err(|e| TransactionError::Serialization(e.to_string()))?;

    let mut contract_hash = *contract.as_bytes();
    contract_hash.reverse();

    let mut code = Vec::with_capacity(CONTRACT_INVOKE_TAG.len() + 22 + method.len() + json.len());
    code.extend_from_slice(CONTRACT_INVOKE_TAG);
    code.extend_from_slice(&contract_hash);
    code.push(length_byte(method.len(), "method name")?);
    code.extend_from_slice(method.as_bytes());
    code.push(length_byte(json.len(), "argument json")?);
    code.extend_from_slice(json.as_bytes());

    let mut tx = Transaction::new();
    tx.tx_type = TxType::Invoke;
    tx.payload = Payload::invoke(code);
    tx.tx_attributes = CONTRACT_INVOKE_ATTRIBUTES;
    if let Some(price) = gas_price {
        tx.gas_price = price;
    }
    if let Some(limit) = gas_limit {
        tx.gas_limit = limit;
    }
    if let Some(payer) = payer {
        tx.payer = payer;
    }
    Ok(tx)
}

/// Token transfer on a JSON-parameter contract. Arguments are the base58
/// sender, base58 recipient and decimal amount. The payer defaults to the
/// sender.
pub fn make_contract_transfer_tx(
    contract: &Address,
    from: &Address,
    to: &Address,
    amount: &str,
    gas_price: Fixed64,
    gas_limit: Fixed64,
    payer: Option<Address>,
) -> Result<Transaction, TransactionError> {
    verify_amount(amount)?;
    let from_b58 = from.to_base58();
    let to_b58 = to.to_base58();
    make_contract_invoke_tx(
        "transfer",
        &[&from_b58, &to_b58, amount],
        contract,
        Some(gas_price),
        Some(gas_limit),
        Some(payer.unwrap_or(*from)),
    )
}

// ---------------------------------------------------------------------------
// APPCALL contracts
// ---------------------------------------------------------------------------

/// Invoke a contract with arguments already encoded as pushes:
/// `args || APPCALL || contract hash`.
pub fn make_app_call_tx(
    args: &[u8],
    contract: &Address,
    gas_price: Option<Fixed64>,
    gas_limit: Option<Fixed64>,
    payer: Option<Address>,
) -> Transaction {
    let mut code = ProgramBuilder::new();
    code.append(args)
        .push_opcode(OP_APPCALL)
        .append(contract.as_bytes());

    let mut tx = Transaction::new();
    tx.tx_type = TxType::Invoke;
    tx.payload = Payload::invoke(code.into_bytes());
    if let Some(price) = gas_price {
        tx.gas_price = price;
    }
    if let Some(limit) = gas_limit {
        tx.gas_limit = limit;
    }
    if let Some(payer) = payer {
        tx.payer = payer;
    }
    tx
}
