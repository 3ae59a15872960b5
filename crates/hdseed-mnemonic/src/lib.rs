//! hdseed mnemonic - BIP-39 recovery phrases.
//!
//! Converts entropy to a checksummed word phrase and back, and stretches a
//! phrase plus optional passphrase into the 64-byte seed that roots a
//! BIP-32 key tree.
//!
//! ```text
//! entropy --codec::encode--> words --normalize--> PBKDF2-HMAC-SHA512 --> seed
//! ```

mod error;
pub use error::MnemonicError;

pub mod wordlist;
pub mod normalize;
pub mod codec;
pub mod seed;
pub mod mnemonic;

pub use mnemonic::{Mnemonic, MnemonicOptions};
pub use seed::{derive_seed, Seed};
pub use wordlist::{Language, Wordlist};
