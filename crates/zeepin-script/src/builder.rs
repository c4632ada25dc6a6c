//! Push encoding for NeoVM programs.
//!
//! `ProgramBuilder` accumulates opcodes and data pushes into a byte
//! program. The free functions return a single encoded push and are what
//! the program and native-argument encoders compose.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use zeepin_primitives::PublicKey;

use crate::opcodes::*;
use crate::ScriptError;

/// Build the PUSHBYTES/PUSHDATA prefix for `data_len` bytes.
///
/// # Returns
/// The length byte for up to 75 bytes, else PUSHDATA1/2/4 followed by a
/// little-endian length, or `ValueTooLarge` from 2^32 bytes up.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_PUSHBYTES75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len < 0x100 {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len < 0x1_0000 {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if (data_len as u64) < 0x1_0000_0000 {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::ValueTooLarge(data_len))
    }
}

/// Minimal little-endian two's-complement encoding of an integer.
///
/// High bytes equal to the sign extension are dropped; if the top kept bit
/// disagrees with the sign, one 0x00 or 0xff byte is appended. Zero
/// encodes as a single 0x00 byte.
pub fn bigint_to_bytes(value: &BigInt) -> Vec<u8> {
    value.to_signed_bytes_le()
}

/// Incrementally assembled program bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramBuilder {
    code: Vec<u8>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        ProgramBuilder { code: Vec::new() }
    }

    /// Append a single opcode.
    pub fn push_opcode(&mut self, op: u8) -> &mut Self {
        self.code.push(op);
        self
    }

    /// Append already-encoded program bytes verbatim.
    pub fn append(&mut self, code: &[u8]) -> &mut Self {
        self.code.extend_from_slice(code);
        self
    }

    /// Push non-empty data with the shortest length prefix.
    ///
    /// # Returns
    /// `InvalidParameter` for empty data, `ValueTooLarge` past PUSHDATA4.
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        if data.is_empty() {
            return Err(ScriptError::InvalidParameter(
                "cannot push empty bytes".to_string(),
            ));
        }
        self.push_data(data)
    }

    /// Push data with the shortest length prefix. Empty data encodes as a
    /// zero-length push.
    pub fn push_data(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.code.extend_from_slice(&prefix);
        self.code.extend_from_slice(data);
        Ok(self)
    }

    /// Decode `hex_str` and push it as data.
    pub fn push_hex_string(&mut self, hex_str: &str) -> Result<&mut Self, ScriptError> {
        let data = zeepin_primitives::util::hex_to_bytes(hex_str)?;
        self.push_data(&data)
    }

    /// Push a contract-argument integer: -1 and 0..=15 use the dedicated
    /// opcodes, anything else pushes its two's-complement bytes.
    pub fn push_int(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => self.push_opcode(OP_PUSHM1),
            0 => self.push_opcode(OP_PUSH0),
            1..=15 => self.push_opcode(OP_PUSH1 - 1 + value as u8),
            _ => self.push_short(&bigint_to_bytes(&BigInt::from(value))),
        }
    }

    /// Arbitrary-precision variant of `push_int`.
    pub fn push_bignum(&mut self, value: &BigInt) -> Result<&mut Self, ScriptError> {
        match value.to_i64() {
            Some(v) if (-1..=15).contains(&v) => Ok(self.push_int(v)),
            _ => self.push_data(&bigint_to_bytes(value)),
        }
    }

    /// Push a count inside a verification program: 0..=16 use the
    /// dedicated opcodes, larger values push their bytes.
    pub fn push_num(&mut self, value: usize) -> &mut Self {
        match value {
            0 => self.push_opcode(OP_PUSH0),
            1..=16 => self.push_opcode(OP_PUSH1 - 1 + value as u8),
            _ => self.push_short(&bigint_to_bytes(&BigInt::from(value))),
        }
    }

    /// Push a serialized public key with the shortest length prefix.
    pub fn push_pub_key(&mut self, pk: &PublicKey) -> Result<&mut Self, ScriptError> {
        self.push_data(&pk.serialize())
    }

    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        self.push_opcode(if value { OP_PUSHT } else { OP_PUSHF })
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.code
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.code
    }

    // Integers from i64 or usize encode in at most 9 bytes, so one length
    // byte always suffices.
    fn push_short(&mut self, data: &[u8]) -> &mut Self {
        debug_assert!(data.len() <= OP_PUSHBYTES75 as usize);
        self.code.push(data.len() as u8);
        self.code.extend_from_slice(data);
        self
    }
}

/// Encode `data` as a single non-empty push.
pub fn push_bytes(data: &[u8]) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    b.push_bytes(data)?;
    Ok(b.into_bytes())
}

/// Encode hex data as a single push; empty input is a zero-length push.
pub fn push_hex_string(hex_str: &str) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    b.push_hex_string(hex_str)?;
    Ok(b.into_bytes())
}

pub fn push_int(value: i64) -> Vec<u8> {
    let mut b = ProgramBuilder::new();
    b.push_int(value);
    b.into_bytes()
}

pub fn push_bignum(value: &BigInt) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    b.push_bignum(value)?;
    Ok(b.into_bytes())
}

pub fn push_num(value: usize) -> Vec<u8> {
    let mut b = ProgramBuilder::new();
    b.push_num(value);
    b.into_bytes()
}

pub fn push_bool(value: bool) -> Vec<u8> {
    vec![if value { OP_PUSHT } else { OP_PUSHF }]
}
