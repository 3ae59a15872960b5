/// hdseed primitives - hashing, Base58Check and secp256k1 key arithmetic.
///
/// This crate provides the building blocks consumed by the mnemonic and
/// key-tree crates:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - HMAC-SHA512 and PBKDF2-HMAC-SHA512
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 private/public keys with the tweak-add operations used by
///   hierarchical derivation

pub mod hash;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
