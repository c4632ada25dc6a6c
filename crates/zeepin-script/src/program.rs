//! Verification and invocation programs.
//!
//! A verification program states who may authorise a transaction: a single
//! key followed by CHECKSIG, or an M-of-N key set followed by
//! CHECKMULTISIG. An invocation program carries the signatures that satisfy
//! it. Both are plain sequences of pushes and are parsed with the same
//! push reader.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use zeepin_primitives::util::ByteReader;
use zeepin_primitives::PublicKey;

use crate::builder::ProgramBuilder;
use crate::opcodes::*;
use crate::ScriptError;

/// Largest key set accepted by the general multi-sig program builder.
pub const MULTISIG_MAX_KEYS: usize = 1024;

/// Canonical ordering for the keys of a multi-signature program.
pub fn compare_public_keys(a: &PublicKey, b: &PublicKey) -> Ordering {
    a.canonical_cmp(b)
}

/// Single-signature program: `push(pubkey) CHECKSIG`.
pub fn program_from_pub_key(pk: &PublicKey) -> Result<Vec<u8>, ScriptError> {
    let mut b = ProgramBuilder::new();
    b.push_pub_key(pk)?.push_opcode(OP_CHECKSIG);
    Ok(b.into_bytes())
}

/// M-of-N program: `M push(pk_1) .. push(pk_N) N CHECKMULTISIG` with the
/// keys in canonical order.
///
/// # Arguments
/// * `pub_keys` - The N keys, in any order.
/// * `m` - Signature threshold.
///
/// # Returns
/// The program, or `InvalidParameter` unless `1 <= m <= n <= 1024`.
pub fn program_from_multi_pub_key(pub_keys: &[PublicKey], m: usize) -> Result<Vec<u8>, ScriptError> {
    multisig_program(pub_keys, m, MULTISIG_MAX_KEYS)
}

pub(crate) fn multisig_program(
    pub_keys: &[PublicKey],
    m: usize,
    max_keys: usize,
) -> Result<Vec<u8>, ScriptError> {
    let n = pub_keys.len();
    if !(1 <= m && m <= n && n <= max_keys) {
        return Err(ScriptError::InvalidParameter(format!(
            "wrong multi-sig param: m={} n={} (max {})",
            m, n, max_keys
        )));
    }
    let mut sorted = pub_keys.to_vec();
    sorted.sort_by(compare_public_keys);

    let mut b = ProgramBuilder::new();
    b.push_num(m);
    for pk in &sorted {
        b.push_pub_key(pk)?;
    }
    b.push_num(n).push_opcode(OP_CHECKMULTISIG);
    Ok(b.into_bytes())
}

/// Invocation program: each signature pushed in ascending byte order.
pub fn program_from_params(sigs: &[Vec<u8>]) -> Result<Vec<u8>, ScriptError> {
    let mut sorted = sigs.to_vec();
    sorted.sort();
    let mut b = ProgramBuilder::new();
    for sig in &sorted {
        b.push_bytes(sig)?;
    }
    Ok(b.into_bytes())
}

/// Read one data push (PUSHBYTES1..75 or PUSHDATA1/2/4).
///
/// # Returns
/// The pushed bytes, `Format` for any other opcode, or `TruncatedInput`.
pub fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Vec<u8>, ScriptError> {
    let code = reader.read_u8().map_err(|_| ScriptError::TruncatedInput)?;
    let len = match code {
        OP_PUSHDATA4 => reader.read_u32_le().map_err(|_| ScriptError::TruncatedInput)? as usize,
        OP_PUSHDATA2 => reader.read_u16_le().map_err(|_| ScriptError::TruncatedInput)? as usize,
        OP_PUSHDATA1 => reader.read_u8().map_err(|_| ScriptError::TruncatedInput)? as usize,
        OP_PUSHBYTES1..=OP_PUSHBYTES75 => (code - OP_PUSHBYTES1 + 1) as usize,
        other => {
            return Err(ScriptError::Format(format!(
                "unexpected opcode {:#04x} ({})",
                other,
                opcode_to_string(other)
            )))
        }
    };
    let data = reader.read_bytes(len).map_err(|_| ScriptError::TruncatedInput)?;
    Ok(data.to_vec())
}

/// Read a count pushed by `push_num`: PUSH0, PUSH1..16 or a data push of
/// its little-endian bytes.
pub fn read_num(reader: &mut ByteReader<'_>) -> Result<usize, ScriptError> {
    let code = reader.read_u8().map_err(|_| ScriptError::TruncatedInput)?;
    match code {
        OP_PUSH0 => Ok(0),
        OP_PUSH1..=OP_PUSH16 => Ok((code - OP_PUSH1 + 1) as usize),
        _ => {
            reader.unread(1)?;
            let bytes = read_bytes(reader)?;
            BigInt::from_signed_bytes_le(&bytes)
                .to_usize()
                .ok_or_else(|| ScriptError::Format("count out of range".to_string()))
        }
    }
}

/// Split a program made only of data pushes into its pushed values.
pub fn get_params_from_program(program: &[u8]) -> Result<Vec<Vec<u8>>, ScriptError> {
    let mut reader = ByteReader::new(program);
    let mut params = Vec::new();
    while !reader.is_empty() {
        params.push(read_bytes(&mut reader)?);
    }
    Ok(params)
}

/// Threshold and key set recovered from a verification program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramInfo {
    pub m: usize,
    pub pub_keys: Vec<PublicKey>,
}

/// Parse a single- or multi-signature verification program.
///
/// The final opcode selects the shape. For CHECKMULTISIG the first push is
/// M, the last push is N, and every push between them is a public key; N
/// must equal the number of keys.
///
/// # Returns
/// The parsed info, `UnsupportedProgram` for any other trailing opcode, or
/// a decode error for malformed pushes.
pub fn get_program_info(program: &[u8]) -> Result<ProgramInfo, ScriptError> {
    let (&end, body) = program
        .split_last()
        .ok_or_else(|| ScriptError::UnsupportedProgram("empty program".to_string()))?;
    let mut reader = ByteReader::new(body);
    match end {
        OP_CHECKSIG => {
            let pk = PublicKey::deserialize(&read_bytes(&mut reader)?)?;
            if !reader.is_empty() {
                return Err(ScriptError::UnsupportedProgram(
                    "trailing bytes before CHECKSIG".to_string(),
                ));
            }
            Ok(ProgramInfo {
                m: 1,
                pub_keys: vec![pk],
            })
        }
        OP_CHECKMULTISIG => {
            let m = read_num(&mut reader)?;
            let mut pushes = Vec::new();
            while !reader.is_empty() {
                let start = reader.position();
                let code = reader.read_u8()?;
                reader.unread(1)?;
                if code == OP_PUSH0 || (OP_PUSH1..=OP_PUSH16).contains(&code) {
                    let n = read_num(&mut reader)?;
                    if !reader.is_empty() {
                        return Err(ScriptError::UnsupportedProgram(format!(
                            "unexpected count at offset {}",
                            start
                        )));
                    }
                    return finish_multisig(m, n, pushes);
                }
                pushes.push(read_bytes(&mut reader)?);
            }
            // N was encoded as a data push.
            let n_bytes = pushes
                .pop()
                .ok_or_else(|| ScriptError::UnsupportedProgram("missing key count".to_string()))?;
            let n = BigInt::from_signed_bytes_le(&n_bytes)
                .to_usize()
                .ok_or_else(|| ScriptError::Format("key count out of range".to_string()))?;
            finish_multisig(m, n, pushes)
        }
        other => Err(ScriptError::UnsupportedProgram(format!(
            "unsupported trailing opcode {:#04x}",
            other
        ))),
    }
}

fn finish_multisig(m: usize, n: usize, keys: Vec<Vec<u8>>) -> Result<ProgramInfo, ScriptError> {
    if n != keys.len() || m < 1 || m > n {
        return Err(ScriptError::UnsupportedProgram(format!(
            "inconsistent multi-sig program: m={} n={} keys={}",
            m,
            n,
            keys.len()
        )));
    }
    let pub_keys = keys
        .iter()
        .map(|k| PublicKey::deserialize(k))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProgramInfo { m, pub_keys })
}
