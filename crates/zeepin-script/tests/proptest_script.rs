use proptest::prelude::*;

use num_bigint::BigInt;
use zeepin_primitives::util::ByteReader;
use zeepin_primitives::{PrivateKey, PublicKey};
use zeepin_script::builder::{push_bignum, push_bytes};
use zeepin_script::program::{
    compare_public_keys, get_params_from_program, get_program_info, program_from_multi_pub_key,
    read_bytes,
};
use zeepin_script::Address;

fn key_set(seeds: &[[u8; 32]]) -> Vec<PublicKey> {
    let mut keys: Vec<PublicKey> = seeds
        .iter()
        .filter_map(|s| PrivateKey::from_bytes(s).ok())
        .map(|sk| sk.get_public_key())
        .collect();
    keys.sort_by(compare_public_keys);
    keys.dedup();
    keys
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn multisig_program_info_roundtrip(
        seeds in prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..=24),
        m_seed in any::<usize>(),
    ) {
        let keys = key_set(&seeds);
        prop_assume!(!keys.is_empty());
        let m = 1 + m_seed % keys.len();
        let program = program_from_multi_pub_key(&keys, m).unwrap();
        let info = get_program_info(&program).unwrap();
        prop_assert_eq!(info.m, m);
        prop_assert_eq!(info.pub_keys, keys);
    }

    #[test]
    fn address_hex_base58_roundtrip(hash in prop::array::uniform20(any::<u8>())) {
        let address = Address::new(hash);
        let b58 = address.to_base58();
        prop_assert_eq!(b58.len(), 34);
        let parsed = Address::parse(&b58).unwrap();
        prop_assert_eq!(parsed.serialize(), address.serialize());
        prop_assert_eq!(Address::parse(&address.serialize()).unwrap(), address);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn push_bytes_read_bytes_roundtrip(data in prop::collection::vec(any::<u8>(), 1..600)) {
        let encoded = push_bytes(&data).unwrap();
        let mut reader = ByteReader::new(&encoded);
        prop_assert_eq!(read_bytes(&mut reader).unwrap(), data);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn bignum_push_is_minimal(v in any::<i64>()) {
        prop_assume!(!(-1..=15).contains(&v));
        let encoded = push_bignum(&BigInt::from(v)).unwrap();
        let params = get_params_from_program(&encoded).unwrap();
        prop_assert_eq!(params.len(), 1);
        prop_assert_eq!(BigInt::from_signed_bytes_le(&params[0]), BigInt::from(v));
        let bytes = &params[0];
        if bytes.len() > 1 {
            let top = bytes[bytes.len() - 1];
            let next_sign = bytes[bytes.len() - 2] & 0x80;
            // The top byte is only kept when it carries information.
            prop_assert!(!(top == 0x00 && next_sign == 0) && !(top == 0xff && next_sign != 0));
        }
    }
}
