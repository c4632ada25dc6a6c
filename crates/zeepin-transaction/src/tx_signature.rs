//! Transaction signature entries.
//!
//! Each entry pairs an invocation program (the signatures) with the
//! verification program they satisfy. On the wire both are length-prefixed.

use zeepin_primitives::util::{ByteReader, ByteWriter};
use zeepin_primitives::{PrivateKey, PublicKey, Signable, SignatureScheme};
use zeepin_script::program::{
    get_params_from_program, get_program_info, program_from_multi_pub_key, program_from_params,
    program_from_pub_key,
};

use crate::TransactionError;

/// Threshold `m`, the key set of the verification condition, and the
/// collected signatures (each a scheme tag byte followed by the raw
/// signature).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxSignature {
    pub m: usize,
    pub pub_keys: Vec<PublicKey>,
    pub sig_data: Vec<Vec<u8>>,
}

impl TxSignature {
    /// Single-signature entry for `key` over `signable`.
    pub fn create(
        signable: &dyn Signable,
        key: &PrivateKey,
        scheme: Option<SignatureScheme>,
    ) -> Result<Self, TransactionError> {
        let sig = key.sign_signable(signable, scheme)?;
        Ok(TxSignature {
            m: 1,
            pub_keys: vec![key.get_public_key()],
            sig_data: vec![sig.serialize()],
        })
    }

    /// Verification program: single-sig for one key, M-of-N otherwise.
    pub fn verification_program(&self) -> Result<Vec<u8>, TransactionError> {
        match self.pub_keys.len() {
            0 => Err(TransactionError::InvalidParameter(
                "no public keys in signature".to_string(),
            )),
            1 => Ok(program_from_pub_key(&self.pub_keys[0])?),
            _ => Ok(program_from_multi_pub_key(&self.pub_keys, self.m)?),
        }
    }

    /// Invocation program: the signatures pushed in ascending order.
    pub fn invocation_program(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(program_from_params(&self.sig_data)?)
    }

    pub fn write_to(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        let invocation = self.invocation_program()?;
        let verification = self.verification_program()?;
        writer.write_var_bytes(&invocation);
        writer.write_var_bytes(&verification);
        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>, TransactionError> {
        let mut w = ByteWriter::new();
        self.write_to(&mut w)?;
        Ok(w.into_bytes())
    }

    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let invocation = reader.read_var_bytes().map_err(|e| {
            TransactionError::Serialization(format!("reading invocation program: {}", e))
        })?;
        let verification = reader.read_var_bytes().map_err(|e| {
            TransactionError::Serialization(format!("reading verification program: {}", e))
        })?;
        let sig_data = get_params_from_program(invocation)?;
        let info = get_program_info(verification)?;
        Ok(TxSignature {
            m: info.m,
            pub_keys: info.pub_keys,
            sig_data,
        })
    }

    /// True if `pub_keys` is the same key set as this entry's, in any order.
    pub fn has_same_keys(&self, pub_keys: &[PublicKey]) -> bool {
        same_key_set(&self.pub_keys, pub_keys)
    }
}

pub(crate) fn same_key_set(a: &[PublicKey], b: &[PublicKey]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(|x, y| x.canonical_cmp(y));
    b.sort_by(|x, y| x.canonical_cmp(y));
    a == b
}
