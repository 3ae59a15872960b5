/// Elliptic curve keys on secp256k1.
///
/// Provides the private scalar and public point wrappers together with the
/// additive tweak operations that hierarchical key derivation is built on.

pub mod private_key;
pub mod public_key;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
