//! Tests for the zeepin-transaction crate.
//!
//! End-to-end scenarios: building a native transfer with a known key,
//! signing, serializing and parsing it back, M-of-N accumulation across
//! signers, and sign content sensitivity to the unsigned fields.

use zeepin_primitives::{PrivateKey, PublicKey, Signable, Signature};
use zeepin_script::program::program_from_multi_pub_key;
use zeepin_script::Address;

use crate::builder::{make_transfer_tx, TokenType};
use crate::fixed64::Fixed64;
use crate::sign::{add_sign, sign_transaction, sign_tx};
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Test vectors
// -----------------------------------------------------------------------

const PRIVATE_KEY_HEX: &str = "c19f16785b8f3543bbaf5e1dbb5d398dfa6c85aaad54fc9d71203ce83e505c07";
const PUBLIC_KEY_HEX: &str = "02d3d048aca7bdee582a611d0b8acc45642950dc6167aee63abbdcd1a5781c6319";
const ADDRESS: &str = "ZTSkqL4oxqgKmPsUqbfJ5tDgBi62BMtqs9";
const RECIPIENT: &str = "ZC3Fmgr3oS56Rg9vxZeVo2mwMMcU8qy3jG";

fn transfer_from_vector() -> Transaction {
    let from = Address::from_base58(ADDRESS).expect("valid sender");
    let to = Address::from_base58(RECIPIENT).expect("valid recipient");
    let mut transfer = make_transfer_tx(
        TokenType::Zpt,
        &from,
        &to,
        "100",
        Fixed64::new(500),
        Fixed64::new(20000),
        None,
    )
    .expect("transfer builds");
    transfer.tx.nonce = [0xde, 0xad, 0xbe, 0xef];
    transfer.tx
}

// -----------------------------------------------------------------------
// Single-signer transfer
// -----------------------------------------------------------------------

/// A signed transfer serializes, parses back to the same value, and the
/// parsed signature verifies against the recomputed sign content.
#[test]
fn test_signed_transfer_roundtrip() {
    let key = PrivateKey::from_hex(PRIVATE_KEY_HEX).expect("valid key");
    assert_eq!(key.get_public_key().serialize_hex(), PUBLIC_KEY_HEX);

    let mut tx = transfer_from_vector();
    assert_eq!(tx.payer.to_base58(), ADDRESS);
    sign_transaction(&mut tx, &key, None).expect("signs");

    let hex = tx.to_hex().expect("serializes");
    let parsed = Transaction::from_hex(&hex).expect("parses");
    assert_eq!(parsed, tx);
    assert_eq!(parsed.to_hex().unwrap(), hex);

    let entry = &parsed.sigs[0];
    assert_eq!(entry.m, 1);
    assert_eq!(
        hex::encode(entry.verification_program().unwrap()),
        format!("21{}ac", PUBLIC_KEY_HEX)
    );
    let sig = Signature::deserialize(&entry.sig_data[0]).expect("signature decodes");
    assert!(entry.pub_keys[0].verify(&parsed.get_sign_content(), &sig));
}

/// 10.0000 ZPT at gas price 1 and limit 20000: the parsed transaction keeps
/// every unsigned field and carries exactly one entry for the sender's key.
#[test]
fn test_transfer_at_default_gas() {
    let key = PrivateKey::from_hex(PRIVATE_KEY_HEX).unwrap();
    let from = Address::from_base58(ADDRESS).unwrap();
    let to = Address::from_base58(RECIPIENT).unwrap();
    let mut tx = make_transfer_tx(
        TokenType::Zpt,
        &from,
        &to,
        "100000",
        Fixed64::new(1),
        Fixed64::new(20000),
        None,
    )
    .unwrap()
    .tx;
    sign_transaction(&mut tx, &key, None).unwrap();

    let parsed = Transaction::from_bytes(&tx.serialize().unwrap()).unwrap();
    assert_eq!(parsed.version, tx.version);
    assert_eq!(parsed.tx_type, tx.tx_type);
    assert_eq!(parsed.gas_price, Fixed64::new(1));
    assert_eq!(parsed.gas_limit, Fixed64::new(20000));
    assert_eq!(parsed.payer, from);
    assert_eq!(parsed.payload.code(), tx.payload.code());
    assert_eq!(parsed.sigs.len(), 1);
    assert_eq!(parsed.sigs[0].pub_keys, vec![key.get_public_key()]);
    assert_eq!(parsed.sigs[0].pub_keys[0].serialize_hex(), PUBLIC_KEY_HEX);
}

/// The signed hex ends with one signature entry: count, 66-byte invocation
/// and 35-byte verification program.
#[test]
fn test_signed_transfer_tail_layout() {
    let key = PrivateKey::from_hex(PRIVATE_KEY_HEX).unwrap();
    let mut tx = transfer_from_vector();
    let unsigned_len = tx.serialize_unsigned_data().len();
    sign_transaction(&mut tx, &key, None).unwrap();
    let bytes = tx.serialize().unwrap();
    assert_eq!(bytes.len(), unsigned_len + 1 + 1 + 66 + 1 + 35);
    assert_eq!(bytes[unsigned_len], 0x01);
    assert_eq!(bytes[unsigned_len + 1], 0x42);
    assert_eq!(bytes[unsigned_len + 2], 0x41);
}

/// A sender and a distinct payer both sign.
#[test]
fn test_payer_cosigns() {
    let sender = PrivateKey::from_hex(PRIVATE_KEY_HEX).unwrap();
    let payer = PrivateKey::random();
    let mut tx = transfer_from_vector();
    tx.payer = Address::from_pub_key(&payer.get_public_key()).unwrap();
    sign_transaction(&mut tx, &sender, None).unwrap();
    add_sign(&mut tx, &payer, None).unwrap();

    let parsed = Transaction::from_bytes(&tx.serialize().unwrap()).unwrap();
    assert_eq!(parsed.sigs.len(), 2);
    let content = parsed.get_sign_content();
    for entry in &parsed.sigs {
        let sig = Signature::deserialize(&entry.sig_data[0]).unwrap();
        assert!(entry.pub_keys[0].verify(&content, &sig));
    }
}

// -----------------------------------------------------------------------
// Multi-signature accumulation
// -----------------------------------------------------------------------

/// Two of three signers contribute to one entry; the entry serializes as
/// a 2-of-3 program and survives a parse.
#[test]
fn test_two_of_three_multisig() {
    let keys: Vec<PrivateKey> = (0..3).map(|_| PrivateKey::random()).collect();
    let pub_keys: Vec<PublicKey> = keys.iter().map(|k| k.get_public_key()).collect();
    let multi = Address::from_multi_pub_keys(2, &pub_keys).unwrap();

    let mut tx = transfer_from_vector();
    tx.payer = multi;
    sign_tx(&mut tx, 2, &pub_keys, &keys[2], None).unwrap();
    sign_tx(&mut tx, 2, &pub_keys, &keys[0], None).unwrap();

    let parsed = Transaction::from_bytes(&tx.serialize().unwrap()).unwrap();
    assert_eq!(parsed.sigs.len(), 1);
    let entry = &parsed.sigs[0];
    assert_eq!(entry.m, 2);
    assert_eq!(entry.sig_data.len(), 2);
    assert!(entry.has_same_keys(&pub_keys));
    assert_eq!(
        entry.verification_program().unwrap(),
        program_from_multi_pub_key(&pub_keys, 2).unwrap()
    );
    assert_eq!(Address::from_vm_code(&entry.verification_program().unwrap()), multi);

    let content = parsed.get_sign_content();
    let verified = entry
        .sig_data
        .iter()
        .filter(|raw| {
            let sig = Signature::deserialize(raw).unwrap();
            pub_keys.iter().any(|pk| pk.verify(&content, &sig))
        })
        .count();
    assert_eq!(verified, 2);
}

#[test]
fn test_multisig_overflow_is_rejected() {
    let keys: Vec<PrivateKey> = (0..2).map(|_| PrivateKey::random()).collect();
    let pub_keys: Vec<PublicKey> = keys.iter().map(|k| k.get_public_key()).collect();
    let mut tx = transfer_from_vector();
    for key in &keys {
        sign_tx(&mut tx, 1, &pub_keys, key, None).unwrap();
    }
    assert!(matches!(
        sign_tx(&mut tx, 1, &pub_keys, &keys[0], None),
        Err(TransactionError::TooManySignatures(_))
    ));
}

// -----------------------------------------------------------------------
// Sign content
// -----------------------------------------------------------------------

/// Changing any unsigned field changes the sign content; signatures do not.
#[test]
fn test_sign_content_covers_unsigned_fields() {
    let base = transfer_from_vector();
    let content = base.get_sign_content();

    let mut tampered = base.clone();
    tampered.gas_price = Fixed64::new(501);
    assert_ne!(tampered.get_sign_content(), content);

    let mut tampered = base.clone();
    tampered.nonce = [0, 0, 0, 0];
    assert_ne!(tampered.get_sign_content(), content);

    let mut tampered = base.clone();
    tampered.tx_attributes = 1;
    assert_ne!(tampered.get_sign_content(), content);

    let mut signed = base.clone();
    sign_transaction(&mut signed, &PrivateKey::random(), None).unwrap();
    assert_eq!(signed.get_sign_content(), content);
    assert_eq!(signed.tx_hash(), base.tx_hash());
}

/// Flipping a bit inside the serialized payload survives the parse and
/// changes the sign content.
#[test]
fn test_payload_bit_flip_changes_sign_content() {
    let tx = transfer_from_vector();
    let mut bytes = tx.serialize().unwrap();
    // version, type, nonce, gas price, gas limit, payer
    let length_at = 1 + 1 + 4 + 8 + 8 + 20;
    let payload_len = bytes[length_at] as usize;
    assert!(payload_len > 0 && payload_len < 0xfd);
    bytes[length_at + payload_len / 2] ^= 0x01;

    let tampered = Transaction::from_bytes(&bytes).expect("still parses");
    assert_ne!(tampered.payload, tx.payload);
    assert_eq!(tampered.gas_price, tx.gas_price);
    assert_ne!(tampered.get_sign_content(), tx.get_sign_content());
}
