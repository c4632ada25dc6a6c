//! Transaction payloads.

use zeepin_primitives::util::{ByteReader, ByteWriter};

use crate::TransactionError;

/// Code executed by an Invoke transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvokeCode {
    pub code: Vec<u8>,
}

/// The body of a transaction. Written as length-prefixed bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    InvokeCode(InvokeCode),
}

impl Payload {
    pub fn invoke(code: Vec<u8>) -> Self {
        Payload::InvokeCode(InvokeCode { code })
    }

    pub fn code(&self) -> &[u8] {
        match self {
            Payload::InvokeCode(p) => &p.code,
        }
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        match self {
            Payload::InvokeCode(p) => writer.write_var_bytes(&p.code),
        }
    }

    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let code = reader
            .read_var_bytes()
            .map_err(|e| TransactionError::Serialization(format!("reading payload: {}", e)))?;
        Ok(Payload::invoke(code.to_vec()))
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::InvokeCode(InvokeCode::default())
    }
}
