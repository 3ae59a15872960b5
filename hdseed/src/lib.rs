#![deny(missing_docs)]

//! hdseed - deterministic wallet key material.
//!
//! Re-exports the hdseed crates for single-crate usage:
//! entropy becomes a [`mnemonic::Mnemonic`], the mnemonic becomes a seed,
//! and the seed roots a tree of [`bip32::ExtendedKey`]s.
//!
//! ```
//! use hdseed::bip32::{DerivationPath, ExtendedKey, Network};
//! use hdseed::mnemonic::{Language, Mnemonic};
//!
//! let mnemonic = Mnemonic::from_entropy(&[0u8; 16], Language::English).unwrap();
//! let master = ExtendedKey::from_mnemonic(&mnemonic, Network::Main).unwrap();
//! let path: DerivationPath = "m/44'/0'/0'/0/0".parse().unwrap();
//! let leaf = master.derive_path(&path).unwrap();
//! assert_eq!(leaf.depth(), 5);
//! ```

pub use hdseed_bip32 as bip32;
pub use hdseed_mnemonic as mnemonic;
pub use hdseed_primitives as primitives;
