//! Core transaction type for the Zeepin chain.
//!
//! Holds the fixed header fields, the payload, the attribute byte and the
//! signature list. Supports binary and hex serialization and computes the
//! double-SHA-256 sign content over the unsigned portion.

use std::fmt;

use zeepin_primitives::hash::sha256d;
use zeepin_primitives::util::{random_bytes, ByteReader, ByteWriter};
use zeepin_primitives::Signable;
use zeepin_script::Address;

use crate::fixed64::Fixed64;
use crate::payload::Payload;
use crate::sign::TX_MAX_SIG_SIZE;
use crate::tx_signature::TxSignature;
use crate::TransactionError;

/// Transaction type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxType {
    BookKeeper,
    Claim,
    Enrollment,
    Vote,
    Deploy,
    Invoke,
}

impl TxType {
    pub fn hex(&self) -> u8 {
        match self {
            TxType::BookKeeper => 0x02,
            TxType::Claim => 0x03,
            TxType::Enrollment => 0x04,
            TxType::Vote => 0x05,
            TxType::Deploy => 0xd0,
            TxType::Invoke => 0xd1,
        }
    }

    pub fn from_hex(tag: u8) -> Result<Self, TransactionError> {
        match tag {
            0x02 => Ok(TxType::BookKeeper),
            0x03 => Ok(TxType::Claim),
            0x04 => Ok(TxType::Enrollment),
            0x05 => Ok(TxType::Vote),
            0xd0 => Ok(TxType::Deploy),
            0xd1 => Ok(TxType::Invoke),
            other => Err(TransactionError::Serialization(format!(
                "unknown transaction type {:#04x}",
                other
            ))),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A Zeepin transaction.
///
/// # Wire format
///
/// | Field       | Size                         |
/// |-------------|------------------------------|
/// | version     | 1 byte                       |
/// | type        | 1 byte                       |
/// | nonce       | 4 bytes                      |
/// | gas price   | 8 bytes (LE)                 |
/// | gas limit   | 8 bytes (LE)                 |
/// | payer       | 20 bytes                     |
/// | payload     | VarInt length + code         |
/// | attributes  | 1 byte                       |
/// | sig count   | VarInt                       |
/// | sigs        | variable (per signature)     |
///
/// Everything up to and including the attribute byte is the unsigned
/// portion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub version: u8,
    pub tx_type: TxType,
    pub nonce: [u8; 4],
    pub gas_price: Fixed64,
    pub gas_limit: Fixed64,
    pub payer: Address,
    pub payload: Payload,
    pub tx_attributes: u8,
    pub sigs: Vec<TxSignature>,
}

impl Transaction {
    /// Create an unsigned Invoke transaction with a random nonce, zero gas,
    /// an all-zero payer and empty code.
    pub fn new() -> Self {
        let mut nonce = [0u8; 4];
        nonce.copy_from_slice(&random_bytes(4));
        Transaction {
            version: 0,
            tx_type: TxType::Invoke,
            nonce,
            gas_price: Fixed64::default(),
            gas_limit: Fixed64::default(),
            payer: Address::default(),
            payload: Payload::default(),
            tx_attributes: 0,
            sigs: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a signed transaction from hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = zeepin_primitives::util::hex_to_bytes(hex_str)
            .map_err(|e| TransactionError::Serialization(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a signed transaction, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let field = |name: &'static str| {
            move |e: zeepin_primitives::PrimitivesError| {
                TransactionError::Serialization(format!("reading {}: {}", name, e))
            }
        };
        let version = reader.read_u8().map_err(field("version"))?;
        let tx_type = TxType::from_hex(reader.read_u8().map_err(field("type"))?)?;
        let nonce = reader.read_array::<4>().map_err(field("nonce"))?;
        let gas_price = Fixed64::read_from(reader)?;
        let gas_limit = Fixed64::read_from(reader)?;
        let payer = Address::new(reader.read_array::<20>().map_err(field("payer"))?);
        let payload = Payload::read_from(reader)?;
        let tx_attributes = reader.read_u8().map_err(field("attributes"))?;

        let sig_count = reader.read_varint().map_err(field("signature count"))?;
        if sig_count.value() > TX_MAX_SIG_SIZE as u64 {
            return Err(TransactionError::TooManySignatures(format!(
                "{} signature entries, at most {} allowed",
                sig_count.value(),
                TX_MAX_SIG_SIZE
            )));
        }
        let mut sigs = Vec::new();
        for _ in 0..sig_count.value() {
            sigs.push(TxSignature::read_from(reader)?);
        }

        Ok(Transaction {
            version,
            tx_type,
            nonce,
            gas_price,
            gas_limit,
            payer,
            payload,
            tx_attributes,
            sigs,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    fn write_unsigned(&self, w: &mut ByteWriter) {
        w.write_u8(self.version);
        w.write_u8(self.tx_type.hex());
        w.write_bytes(&self.nonce);
        self.gas_price.write_to(w);
        self.gas_limit.write_to(w);
        w.write_bytes(self.payer.as_bytes());
        self.payload.write_to(w);
        w.write_u8(self.tx_attributes);
    }

    /// Unsigned bytes followed by the signature count and each signature.
    pub fn serialize(&self) -> Result<Vec<u8>, TransactionError> {
        let mut w = ByteWriter::new();
        self.write_unsigned(&mut w);
        w.write_varint(self.sigs.len().into());
        for sig in &self.sigs {
            sig.write_to(&mut w)?;
        }
        Ok(w.into_bytes())
    }

    pub fn to_hex(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(self.serialize()?))
    }

    /// Sign content as hex.
    pub fn sign_content_hex(&self) -> String {
        hex::encode(self.get_sign_content())
    }

    /// Display hash: the byte-reversed sign content, as hex.
    pub fn tx_hash(&self) -> String {
        let mut hash = sha256d(&self.serialize_unsigned_data());
        hash.reverse();
        hex::encode(hash)
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Signable for Transaction {
    /// `SHA256(SHA256(unsigned bytes))`.
    fn get_sign_content(&self) -> Vec<u8> {
        sha256d(&self.serialize_unsigned_data()).to_vec()
    }

    fn serialize_unsigned_data(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        self.write_unsigned(&mut w);
        w.into_bytes()
    }
}
