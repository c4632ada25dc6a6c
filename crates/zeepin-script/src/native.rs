//! Argument encoding for native-contract invocations.
//!
//! Arguments form an owned tree. Top-level arguments are emitted last to
//! first so the contract pops them in declaration order. A struct is built
//! on the alt stack: `0 NEWSTRUCT TOALTSTACK`, then each member followed by
//! `DUPFROMALTSTACK SWAP APPEND`, then `FROMALTSTACK`. An array is its
//! elements, its length, then `PACK`.

use num_bigint::BigInt;

use crate::address::Address;
use crate::builder::ProgramBuilder;
use crate::opcodes::*;
use crate::ScriptError;

/// One native-contract argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeArg {
    /// Raw bytes, pushed as data.
    Bytes(Vec<u8>),
    Bool(bool),
    Int(i64),
    BigInt(BigInt),
    /// Pushed as its raw 20-byte program hash.
    Address(Address),
    Struct(Vec<NativeArg>),
    Array(Vec<NativeArg>),
}

/// Encode a list of top-level arguments in reverse order.
pub fn build_native_code_script(list: &[NativeArg]) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    for arg in list.iter().rev() {
        b.append(&create_code_param_script(arg)?);
    }
    Ok(b.into_bytes())
}

/// Encode a single argument.
pub fn create_code_param_script(arg: &NativeArg) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    match arg {
        NativeArg::Bytes(data) => {
            b.push_data(data)?;
        }
        NativeArg::Bool(v) => {
            b.push_bool(*v);
        }
        NativeArg::Int(v) => {
            b.push_int(*v);
        }
        NativeArg::BigInt(v) => {
            b.push_bignum(v)?;
        }
        NativeArg::Address(addr) => {
            b.push_data(addr.as_bytes())?;
        }
        NativeArg::Struct(members) => {
            b.push_int(0)
                .push_opcode(OP_NEWSTRUCT)
                .push_opcode(OP_TOALTSTACK);
            for member in members {
                b.append(&create_code_param_script(member)?)
                    .push_opcode(OP_DUPFROMALTSTACK)
                    .push_opcode(OP_SWAP)
                    .push_opcode(OP_APPEND);
            }
            b.push_opcode(OP_FROMALTSTACK);
        }
        NativeArg::Array(items) => {
            let len = i64::try_from(items.len())
                .map_err(|_| ScriptError::ValueTooLarge(items.len()))?;
            b.append(&build_native_code_script(items)?)
                .push_int(len)
                .push_opcode(OP_PACK);
        }
    }
    Ok(b.into_bytes())
}
