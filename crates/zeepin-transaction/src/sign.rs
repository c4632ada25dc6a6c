//! Signing and multi-signature accumulation.

use tracing::debug;
use zeepin_primitives::{PrivateKey, PublicKey, SignatureScheme};

use crate::transaction::Transaction;
use crate::tx_signature::TxSignature;
use crate::TransactionError;

/// Most signature entries a transaction may carry.
pub const TX_MAX_SIG_SIZE: usize = 16;

/// Replace the signature list with one single-signature entry by `key`.
pub fn sign_transaction(
    tx: &mut Transaction,
    key: &PrivateKey,
    scheme: Option<SignatureScheme>,
) -> Result<(), TransactionError> {
    let entry = TxSignature::create(&*tx, key, scheme)?;
    tx.sigs = vec![entry];
    debug!(tx_hash = %tx.tx_hash(), "signed transaction");
    Ok(())
}

/// Append a single-signature entry by `key`, for example a payer
/// co-signing a transaction already signed by the sender.
///
/// Signing twice with the same key is a no-op.
pub fn add_sign(
    tx: &mut Transaction,
    key: &PrivateKey,
    scheme: Option<SignatureScheme>,
) -> Result<(), TransactionError> {
    let pk = key.get_public_key();
    if tx.sigs.iter().any(|s| s.pub_keys.len() == 1 && s.pub_keys[0] == pk) {
        return Ok(());
    }
    if tx.sigs.len() >= TX_MAX_SIG_SIZE {
        return Err(TransactionError::TooManySignatures(format!(
            "transaction already holds {} signature entries",
            tx.sigs.len()
        )));
    }
    let entry = TxSignature::create(&*tx, key, scheme)?;
    tx.sigs.push(entry);
    debug!(tx_hash = %tx.tx_hash(), entries = tx.sigs.len(), "added signature");
    Ok(())
}

/// Add `key`'s signature towards an M-of-N condition over `pub_keys`.
///
/// If an entry with the same key set (in any order) exists, the signature
/// joins it; otherwise a new entry is appended.
///
/// # Returns
/// `InvalidParameter` unless `1 <= m <= pub_keys.len()`.
/// `TooManySignatures` if the transaction already holds 16 entries, or
/// the matching entry already holds N signatures.
pub fn sign_tx(
    tx: &mut Transaction,
    m: usize,
    pub_keys: &[PublicKey],
    key: &PrivateKey,
    scheme: Option<SignatureScheme>,
) -> Result<(), TransactionError> {
    if pub_keys.is_empty() || m == 0 || m > pub_keys.len() {
        return Err(TransactionError::InvalidParameter(format!(
            "invalid multi-sig threshold {} of {}",
            m,
            pub_keys.len()
        )));
    }

    if tx.sigs.len() >= TX_MAX_SIG_SIZE {
        return Err(TransactionError::TooManySignatures(format!(
            "transaction already holds {} signature entries",
            tx.sigs.len()
        )));
    }

    if let Some(idx) = tx.sigs.iter().position(|s| s.has_same_keys(pub_keys)) {
        if tx.sigs[idx].sig_data.len() + 1 > pub_keys.len() {
            return Err(TransactionError::TooManySignatures(format!(
                "entry already holds {} of {} signatures",
                tx.sigs[idx].sig_data.len(),
                pub_keys.len()
            )));
        }
        let sig = key.sign_signable(&*tx, scheme)?;
        tx.sigs[idx].sig_data.push(sig.serialize());
        debug!(
            collected = tx.sigs[idx].sig_data.len(),
            m, "joined existing multi-sig entry"
        );
        return Ok(());
    }

    let sig = key.sign_signable(&*tx, scheme)?;
    tx.sigs.push(TxSignature {
        m,
        pub_keys: pub_keys.to_vec(),
        sig_data: vec![sig.serialize()],
    });
    debug!(m, n = pub_keys.len(), "started multi-sig entry");
    Ok(())
}
