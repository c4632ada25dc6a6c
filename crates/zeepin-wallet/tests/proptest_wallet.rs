use proptest::prelude::*;

use zeepin_primitives::PrivateKey;
use zeepin_script::Address;
use zeepin_wallet::keystore::{decrypt, encrypt, ScryptParams};
use zeepin_wallet::WalletError;

const FAST: ScryptParams = ScryptParams {
    dk_len: 64,
    n: 16,
    p: 8,
    r: 8,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Sealing then opening returns the key; any other passphrase fails.
    #[test]
    fn envelope_roundtrip(
        secret in prop::array::uniform32(1u8..),
        salt in prop::array::uniform16(any::<u8>()),
        passphrase in "[ -~]{0,32}",
        other in "[ -~]{0,32}",
    ) {
        let key = match PrivateKey::from_bytes(&secret) {
            Ok(key) => key,
            Err(_) => return Ok(()),
        };
        let address = Address::from_pub_key(&key.get_public_key()).unwrap();
        let sealed = encrypt(&key, &address, &salt, &passphrase, &FAST).unwrap();
        let opened = decrypt(&sealed, &address, &salt, &passphrase, &FAST).unwrap();
        prop_assert_eq!(opened.to_bytes(), key.to_bytes());

        if other != passphrase {
            let result = decrypt(&sealed, &address, &salt, &other, &FAST);
            prop_assert!(matches!(result, Err(WalletError::Decryption(_))));
        }
    }

    /// Flipping a salt bit breaks decryption.
    #[test]
    fn salt_is_bound(salt in prop::array::uniform16(any::<u8>()), bit in 0usize..128) {
        let key = PrivateKey::random();
        let address = Address::from_pub_key(&key.get_public_key()).unwrap();
        let sealed = encrypt(&key, &address, &salt, "pw", &FAST).unwrap();
        let mut flipped = salt;
        flipped[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(decrypt(&sealed, &address, &flipped, "pw", &FAST).is_err());
    }
}
