//! hdseed bip32 - hierarchical deterministic key trees.
//!
//! A seed becomes a master [`ExtendedKey`]; children are derived on demand
//! by index or by [`DerivationPath`]. The tree is never materialized: every
//! derivation is a pure function of its parent.

mod error;
pub use error::KeyError;

pub mod network;
pub mod path;
pub mod extended_key;

pub use extended_key::{ExtendedKey, KeyMaterial};
pub use network::Network;
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
