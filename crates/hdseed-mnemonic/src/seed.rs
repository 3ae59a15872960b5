//! Phrase + passphrase to 64-byte seed.
//!
//! `seed = PBKDF2-HMAC-SHA512(NFKD(phrase), NFKD("mnemonic" + passphrase), 2048)`.
//! No checksum validation happens here; any word sequence yields a seed.

use std::fmt;

use hdseed_primitives::hash::pbkdf2_sha512;
use zeroize::Zeroize;

use crate::normalize::{join, normalize};
use crate::wordlist::Language;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// A 512-bit seed. Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes.
    pub fn new(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Derive the seed for `words` in `language` under `passphrase`.
///
/// Words are joined with the language separator before normalization, so a
/// Japanese phrase hashes with ASCII spaces once NFKD folds U+3000.
pub fn derive_seed<S: AsRef<str>>(words: &[S], language: Language, passphrase: &str) -> Seed {
    let mut password = normalize(&join(words, language));
    let mut salt = normalize(&format!("{SALT_PREFIX}{passphrase}"));
    let seed = Seed(pbkdf2_sha512(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS));
    password.zeroize();
    salt.zeroize();
    seed
}
