use hdseed_mnemonic::MnemonicError;
use hdseed_primitives::PrimitivesError;

/// Error types for key tree derivation and extended key encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("seed does not produce a valid master key")]
    InvalidMasterKey,

    #[error("child index {0} does not produce a valid key; try the next index")]
    InvalidChildKey(u32),

    #[error("hardened derivation requires a private key")]
    HardenedDerivationRequiresPrivateKey,

    #[error("maximum derivation depth of 255 exceeded")]
    DepthOverflow,

    #[error("invalid extended key serialization: {0}")]
    InvalidSerialization(String),

    #[error("invalid seed length: {0} bytes (expected 16 to 64)")]
    InvalidSeedLength(usize),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("derivation failed at path segment {position}: {source}")]
    PathSegment {
        position: usize,
        #[source]
        source: Box<KeyError>,
    },

    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),

    #[error("mnemonic error: {0}")]
    Mnemonic(#[from] MnemonicError),
}
