//! Fixed64 wire amounts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeepin_primitives::util::{ByteReader, ByteWriter};

use crate::TransactionError;

/// Longest accepted decimal form.
const MAX_DIGITS: usize = 16;

/// An 8-byte little-endian unsigned amount, used for gas price and limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fixed64(u64);

impl Fixed64 {
    pub fn new(value: u64) -> Self {
        Fixed64(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.0);
    }

    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let value = reader
            .read_u64_le()
            .map_err(|e| TransactionError::Serialization(format!("reading fixed64: {}", e)))?;
        Ok(Fixed64(value))
    }
}

impl FromStr for Fixed64 {
    type Err = TransactionError;

    /// Parse a non-negative decimal of at most 16 digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > MAX_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TransactionError::InvalidAmount(format!("invalid fixed64 value '{}'", s)));
        }
        s.parse::<u64>()
            .map(Fixed64)
            .map_err(|e| TransactionError::InvalidAmount(e.to_string()))
    }
}

impl From<u64> for Fixed64 {
    fn from(value: u64) -> Self {
        Fixed64(value)
    }
}

impl fmt::Display for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
