use proptest::prelude::*;

use hdseed_primitives::base58;
use hdseed_primitives::ec::private_key::PrivateKey;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_and_public_tweak_agree(
        seed in prop::array::uniform32(any::<u8>()),
        tweak in prop::array::uniform32(any::<u8>()),
    ) {
        // Not all 32-byte arrays are valid scalars (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let private = pk.tweak_add(&tweak);
            let public = pk.pub_key().tweak_add(&tweak);
            match (private, public) {
                (Ok(child), Ok(child_pub)) => prop_assert_eq!(child.pub_key(), child_pub),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (a, b) => prop_assert!(false, "tweak results diverged: {:?} vs {:?}", a, b),
            }
        }
    }

    #[test]
    fn base58_check_roundtrip(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let encoded = base58::check_encode(&data);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), data);
    }
}
