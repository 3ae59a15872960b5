use proptest::prelude::*;

use hdseed_bip32::{ChildNumber, DerivationPath, ExtendedKey, KeyError, Network, HARDENED_OFFSET};

fn master() -> impl Strategy<Value = ExtendedKey> {
    prop::collection::vec(any::<u8>(), 16..=64)
        .prop_filter_map("seed yields no master key", |seed| {
            ExtendedKey::from_seed(&seed, Network::Main).ok()
        })
}

fn child() -> impl Strategy<Value = ChildNumber> {
    any::<u32>().prop_map(ChildNumber::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn public_derivation_commutes(key in master(), index in 0..HARDENED_OFFSET) {
        let via_private = key.derive_child(index).unwrap().neuter();
        let via_public = key.neuter().derive_child(index).unwrap();
        prop_assert_eq!(via_private, via_public);
    }

    #[test]
    fn hardened_on_neutered_fails(key in master(), index in 0..HARDENED_OFFSET) {
        prop_assert_eq!(
            key.neuter().derive_child(ChildNumber::hardened(index).unwrap()),
            Err(KeyError::HardenedDerivationRequiresPrivateKey)
        );
    }

    #[test]
    fn top_bit_decides_hardening(key in master(), raw in any::<u32>()) {
        let child = ChildNumber::from(raw);
        prop_assert_eq!(child.is_hardened(), raw >= HARDENED_OFFSET);
        prop_assert_eq!(child.to_u32(), raw);
        if child.is_hardened() {
            prop_assert_eq!(
                key.neuter().derive_child(child),
                Err(KeyError::HardenedDerivationRequiresPrivateKey)
            );
        }
    }

    #[test]
    fn serialization_roundtrip(key in master(), a in child(), b in child()) {
        let derived = key.derive_child(a).unwrap().derive_child(b).unwrap();
        prop_assert_eq!(&ExtendedKey::from_base58(&derived.to_base58()).unwrap(), &derived);
        let public = derived.neuter();
        prop_assert_eq!(&ExtendedKey::deserialize(&public.serialize()).unwrap(), &public);
    }

    #[test]
    fn path_matches_single_steps(key in master(), a in child(), b in child()) {
        let stepwise = key.derive_child(a).unwrap().derive_child(b).unwrap();
        let path = DerivationPath::from(vec![a, b]);
        prop_assert_eq!(key.derive_path(&path).unwrap(), stepwise);
    }

    #[test]
    fn derivation_is_deterministic(key in master(), a in child()) {
        prop_assert_eq!(key.derive_child(a).unwrap(), key.derive_child(a).unwrap());
    }

    #[test]
    fn path_text_roundtrip(children in prop::collection::vec(child(), 0..8)) {
        let path = DerivationPath::from(children);
        let parsed: DerivationPath = path.to_string().parse().unwrap();
        prop_assert_eq!(parsed, path);
    }
}
