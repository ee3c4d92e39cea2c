use addrcheck::{
    check_address, compress, encode_address, AddressFormat, CheckAddressParams, CoinConfig,
    PublicKeyPoint, XprivKeySource,
};
use bitcoin::secp256k1::{Secp256k1, SecretKey};
use proptest::prelude::*;

fn any_secret_key() -> impl Strategy<Value = SecretKey> {
    prop::array::uniform32(any::<u8>()).prop_filter_map("valid secp256k1 scalar", |bytes| {
        SecretKey::from_slice(&bytes).ok()
    })
}

fn bitcoin_config() -> CoinConfig {
    CoinConfig {
        p2pkh_version: 0x00,
        p2sh_version: 0x05,
        native_segwit_prefix: Some("bc".to_string()),
    }
}

proptest! {
    #[test]
    fn compress_is_deterministic_and_canonical(secret in any_secret_key()) {
        let secp = Secp256k1::new();
        let public_key = secret.public_key(&secp);
        let point = PublicKeyPoint::from_bytes(public_key.serialize_uncompressed());

        let first = compress(&point);
        let second = compress(&point);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.as_bytes(), &public_key.serialize());
    }

    #[test]
    fn every_format_stays_within_the_address_buffer(secret in any_secret_key()) {
        let secp = Secp256k1::new();
        let point = PublicKeyPoint::from_bytes(
            secret.public_key(&secp).serialize_uncompressed(),
        );
        let key = compress(&point);

        for format in [
            AddressFormat::Legacy,
            AddressFormat::P2shSegwit,
            AddressFormat::NativeSegwit,
            AddressFormat::CashAddr,
        ] {
            let address = encode_address(&key, format, &bitcoin_config()).unwrap();
            prop_assert!(!address.is_empty());
            prop_assert!(address.len() <= addrcheck::MAX_ADDRESS_LENGTH);
        }
    }

    #[test]
    fn single_character_mutation_never_matches(
        secret in any_secret_key(),
        position in any::<prop::sample::Index>(),
        replacement in b'a'..=b'z',
    ) {
        let secp = Secp256k1::new();
        let point = PublicKeyPoint::from_bytes(
            secret.public_key(&secp).serialize_uncompressed(),
        );
        let key = compress(&point);
        let address = encode_address(&key, AddressFormat::Legacy, &bitcoin_config()).unwrap();

        let mut mutated = address.clone().into_bytes();
        let index = position.index(mutated.len());
        prop_assume!(mutated[index] != replacement);
        mutated[index] = replacement;
        let mutated = String::from_utf8(mutated).unwrap();

        // Exact comparison on the re-encoded string
        prop_assert_ne!(address, mutated);
    }

    #[test]
    fn arbitrary_parameters_never_panic(
        parameters in prop::collection::vec(any::<u8>(), 0..64),
        claimed in "[ -~]{0,60}",
    ) {
        let keys = XprivKeySource::from_seed(&[0x42u8; 64]).unwrap();
        let params = CheckAddressParams {
            address_parameters: &parameters,
            address_to_check: &claimed,
        };
        let result = check_address(&params, &bitcoin_config(), &keys);

        if claimed.is_empty() {
            // Fast exit: not matched, and no diagnostic reason either
            prop_assert!(!result.matched);
            prop_assert_eq!(result.reason, None);
        }
        if result.matched {
            prop_assert_eq!(result.reason, None);
        }
    }
}
