//! Zeepin addresses.
//!
//! An address is the 20-byte Hash160 of a verification program. It is shown
//! either as 40 hex characters or as a 34-character base58 string carrying
//! the 0x50 version byte and a 4-byte single-SHA-256 checksum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeepin_primitives::base58;
use zeepin_primitives::hash::{hash160, sha256};
use zeepin_primitives::{PrimitivesError, PublicKey};

use crate::program::{multisig_program, program_from_pub_key};
use crate::ScriptError;

/// Address version byte.
pub const ADDR_VERSION: u8 = 0x50;

/// Largest key set accepted when deriving a multi-sig address.
pub const MULTI_ADDRESS_MAX_KEYS: usize = 24;

const HEX_LEN: usize = 40;
const BASE58_LEN: usize = 34;

/// A 20-byte program hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    program_hash: [u8; 20],
}

impl Address {
    pub fn new(program_hash: [u8; 20]) -> Self {
        Address { program_hash }
    }

    /// Parse either representation: 40 hex characters or a 34-character
    /// base58 string.
    ///
    /// # Returns
    /// The address, `InvalidAddress` for any other length or bad encoding,
    /// or `Checksum` when a base58 string does not re-encode to itself.
    pub fn parse(value: &str) -> Result<Self, ScriptError> {
        match value.len() {
            HEX_LEN => Self::from_hex(value),
            BASE58_LEN => Self::from_base58(value),
            n => Err(ScriptError::InvalidAddress(format!(
                "expected {} hex or {} base58 characters, got {}",
                HEX_LEN, BASE58_LEN, n
            ))),
        }
    }

    /// Parse the raw program hash from hex.
    pub fn from_hex(value: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(value)?;
        let program_hash: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad program hash '{}'", value)))?;
        Ok(Address { program_hash })
    }

    /// Decode a base58 address, requiring the decoded hash to re-encode to
    /// exactly `value`.
    pub fn from_base58(value: &str) -> Result<Self, ScriptError> {
        let decoded = base58::check_decode_with(value, sha256).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => ScriptError::Checksum,
            other => ScriptError::InvalidAddress(format!("'{}': {}", value, other)),
        })?;
        if decoded.len() != 21 || decoded[0] != ADDR_VERSION {
            return Err(ScriptError::InvalidAddress(format!(
                "invalid address payload for '{}'",
                value
            )));
        }
        let mut program_hash = [0u8; 20];
        program_hash.copy_from_slice(&decoded[1..]);
        let address = Address { program_hash };
        if address.to_base58() != value {
            return Err(ScriptError::Checksum);
        }
        Ok(address)
    }

    /// Address of a single-signature program for `pk`.
    pub fn from_pub_key(pk: &PublicKey) -> Result<Self, ScriptError> {
        Ok(Self::from_vm_code(&program_from_pub_key(pk)?))
    }

    /// Address of an M-of-N program over `pub_keys`.
    ///
    /// # Returns
    /// The address, or `InvalidParameter` unless `1 <= m <= n <= 24`.
    pub fn from_multi_pub_keys(m: usize, pub_keys: &[PublicKey]) -> Result<Self, ScriptError> {
        let program = multisig_program(pub_keys, m, MULTI_ADDRESS_MAX_KEYS)?;
        Ok(Self::from_vm_code(&program))
    }

    /// Address of arbitrary code, as used for deployed contracts.
    pub fn from_vm_code(code: &[u8]) -> Self {
        Address {
            program_hash: hash160(code),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.program_hash
    }

    /// Base58 form: `base58(0x50 || hash || sha256(0x50 || hash)[..4])`.
    pub fn to_base58(&self) -> String {
        let mut data = [0u8; 21];
        data[0] = ADDR_VERSION;
        data[1..].copy_from_slice(&self.program_hash);
        base58::check_encode_with(&data, sha256)
    }

    /// Raw program hash as hex, the form written into transactions.
    pub fn serialize(&self) -> String {
        hex::encode(self.program_hash)
    }

    /// Byte-reversed program hash as hex, the display form.
    pub fn to_hex_string(&self) -> String {
        let mut reversed = self.program_hash;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeepin_primitives::PrivateKey;

    const KEY_HEX: &str = "c19f16785b8f3543bbaf5e1dbb5d398dfa6c85aaad54fc9d71203ce83e505c07";
    const KEY_ADDRESS: &str = "ZTSkqL4oxqgKmPsUqbfJ5tDgBi62BMtqs9";

    #[test]
    fn test_from_pub_key_vector() {
        let pk = PrivateKey::from_hex(KEY_HEX).unwrap().get_public_key();
        let address = Address::from_pub_key(&pk).unwrap();
        assert_eq!(address.serialize(), "a8fbb6da841e737486e791c10ee3a8053909c086");
        assert_eq!(address.to_base58(), KEY_ADDRESS);
    }

    #[test]
    fn test_native_contract_address() {
        let address = Address::parse("0000000000000000000000000000000000000001").unwrap();
        assert_eq!(address.to_base58(), "ZC3Fmgr3oS56Rg9vxZeVo2mwMMcTzHMV8a");
        let back = Address::parse("ZC3Fmgr3oS56Rg9vxZeVo2mwMMcTzHMV8a").unwrap();
        assert_eq!(back.serialize(), "0000000000000000000000000000000000000001");
        assert_eq!(back.to_hex_string(), "0100000000000000000000000000000000000000");
    }

    #[test]
    fn test_parse_rejects_bad_lengths() {
        assert!(matches!(Address::parse("abcd"), Err(ScriptError::InvalidAddress(_))));
        assert!(Address::parse(&"zz".repeat(20)).is_err());
    }

    #[test]
    fn test_base58_tamper_fails_checksum() {
        // Last character changed.
        assert!(matches!(
            Address::parse("ZTSkqL4oxqgKmPsUqbfJ5tDgBi62BMtqs8"),
            Err(ScriptError::Checksum)
        ));
    }

    #[test]
    fn test_base58_wrong_version_rejected() {
        let mut data = [0u8; 21];
        data[0] = 0x17;
        let encoded = base58::check_encode_with(&data, sha256);
        assert!(matches!(
            Address::from_base58(&encoded),
            Err(ScriptError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_multi_address_matches_program_hash() {
        let pks: Vec<PublicKey> = (0..3).map(|_| PrivateKey::random().get_public_key()).collect();
        let address = Address::from_multi_pub_keys(2, &pks).unwrap();
        let program = crate::program::program_from_multi_pub_key(&pks, 2).unwrap();
        assert_eq!(address, Address::from_vm_code(&program));
    }

    #[test]
    fn test_multi_address_caps_keys() {
        let pks: Vec<PublicKey> = (0..25).map(|_| PrivateKey::random().get_public_key()).collect();
        assert!(Address::from_multi_pub_keys(2, &pks).is_err());
        assert!(Address::from_multi_pub_keys(2, &pks[..24]).is_ok());
        assert!(Address::from_multi_pub_keys(0, &pks[..3]).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let address = Address::parse(KEY_ADDRESS).unwrap();
        assert_eq!(address.to_string(), KEY_ADDRESS);
        assert_eq!(KEY_ADDRESS.parse::<Address>().unwrap(), address);
    }
}
