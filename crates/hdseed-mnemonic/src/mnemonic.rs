//! The `Mnemonic` value type.
//!
//! A mnemonic binds a language, validated entropy, the phrase encoding that
//! entropy and an optional passphrase. The passphrase is not part of the
//! checksum; it only changes the derived seed.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use crate::codec::{decode, encode};
use crate::normalize::{join, normalize, split};
use crate::seed::{derive_seed, Seed};
use crate::wordlist::Language;
use crate::MnemonicError;

/// Entropy sizes accepted by [`Mnemonic::generate`], in bits.
pub const ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Construction options for [`Mnemonic::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicOptions {
    /// Wordlist used for the phrase.
    pub language: Language,
    /// Entropy size in bits; one of 128, 160, 192, 224 or 256.
    pub bits: usize,
    /// Passphrase mixed into the seed. Empty by default.
    pub passphrase: String,
}

impl Default for MnemonicOptions {
    fn default() -> Self {
        MnemonicOptions {
            language: Language::English,
            bits: 128,
            passphrase: String::new(),
        }
    }
}

/// A checksummed BIP-39 recovery phrase.
///
/// Entropy and passphrase are wiped when the value is dropped. `Debug`
/// never prints the phrase.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MnemonicJson", into = "MnemonicJson")]
pub struct Mnemonic {
    language: Language,
    entropy: Vec<u8>,
    words: Vec<&'static str>,
    passphrase: String,
}

impl Mnemonic {
    /// Encode caller-supplied entropy.
    ///
    /// # Returns
    /// `InvalidEntropyLength` unless the entropy is 16, 20, 24, 28 or 32 bytes.
    pub fn from_entropy(entropy: &[u8], language: Language) -> Result<Self, MnemonicError> {
        let words = encode(entropy, language)?;
        Ok(Mnemonic {
            language,
            entropy: entropy.to_vec(),
            words,
            passphrase: String::new(),
        })
    }

    /// Parse and validate a phrase in a known language.
    ///
    /// Leading and trailing whitespace is ignored and words may be separated
    /// by any run of Unicode whitespace.
    pub fn from_phrase(phrase: &str, language: Language) -> Result<Self, MnemonicError> {
        let entropy = decode(&split(phrase), language)?;
        Mnemonic::from_entropy(&entropy, language)
    }

    /// Parse a phrase, detecting its language.
    ///
    /// Every language whose list holds all the words is tried in
    /// [`Language::ALL`] order and the first one whose checksum verifies
    /// wins. If no candidate verifies, the error of the first candidate is
    /// returned.
    pub fn parse(phrase: &str) -> Result<Self, MnemonicError> {
        let words = split(phrase);
        let first = *words.first().ok_or(MnemonicError::InvalidPhraseLength(0))?;

        let candidates: Vec<Language> = Language::ALL
            .into_iter()
            .filter(|language| {
                let list = language.wordlist();
                words.iter().all(|word| list.contains(word))
            })
            .collect();

        if candidates.is_empty() {
            // Report the offending word against the language of the first one.
            let language = Language::detect(first)
                .ok_or_else(|| MnemonicError::UnknownWord(first.to_string()))?;
            return Mnemonic::from_phrase(phrase, language);
        }

        let mut first_err = None;
        for language in candidates {
            match Mnemonic::from_phrase(phrase, language) {
                Ok(mnemonic) => return Ok(mnemonic),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(first_err.unwrap_or(MnemonicError::InvalidPhraseLength(words.len())))
    }

    /// Generate a new mnemonic from the operating system's CSPRNG.
    pub fn generate(options: MnemonicOptions) -> Result<Self, MnemonicError> {
        Mnemonic::generate_with_rng(&mut OsRng, options)
    }

    /// Generate a new mnemonic from a caller-supplied CSPRNG.
    ///
    /// # Returns
    /// `InvalidEntropyBits` unless `options.bits` is one of 128, 160, 192,
    /// 224 or 256.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        options: MnemonicOptions,
    ) -> Result<Self, MnemonicError> {
        if !ENTROPY_BITS.contains(&options.bits) {
            return Err(MnemonicError::InvalidEntropyBits(options.bits));
        }
        let mut entropy = vec![0u8; options.bits / 8];
        rng.fill_bytes(&mut entropy);
        let result = Mnemonic::from_entropy(&entropy, options.language);
        entropy.zeroize();

        let mnemonic = result?.with_passphrase(&options.passphrase);
        debug!(
            language = %mnemonic.language,
            words = mnemonic.words.len(),
            "generated mnemonic"
        );
        Ok(mnemonic)
    }

    /// Whether `phrase` is a valid mnemonic in `language`.
    pub fn is_valid(phrase: &str, language: Language) -> bool {
        decode(&split(phrase), language).is_ok()
    }

    /// Return a copy carrying `passphrase`.
    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase.zeroize();
        self.passphrase = passphrase.to_string();
        self
    }

    /// The phrase, words joined with the language separator.
    pub fn phrase(&self) -> String {
        join(&self.words, self.language)
    }

    /// The phrase as individual words, in order.
    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    /// The encoded entropy.
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    /// Entropy size in bits.
    pub fn bits(&self) -> usize {
        self.entropy.len() * 8
    }

    /// Language of the wordlist the phrase is drawn from.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Passphrase mixed into the seed; empty when none was set.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Derive the 64-byte seed for this phrase and passphrase.
    pub fn to_seed(&self) -> Seed {
        derive_seed(&self.words, self.language, &self.passphrase)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("language", &self.language)
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

impl FromStr for Mnemonic {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::parse(s)
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        self.entropy.zeroize();
        self.passphrase.zeroize();
    }
}

/// JSON interchange form of a [`Mnemonic`].
#[derive(Serialize, Deserialize)]
struct MnemonicJson {
    language: Language,
    entropy: String,
    phrase: String,
    #[serde(default)]
    passphrase: String,
}

impl From<Mnemonic> for MnemonicJson {
    fn from(m: Mnemonic) -> Self {
        MnemonicJson {
            language: m.language,
            entropy: hex::encode(&m.entropy),
            phrase: m.phrase(),
            passphrase: m.passphrase.clone(),
        }
    }
}

impl TryFrom<MnemonicJson> for Mnemonic {
    type Error = MnemonicError;

    fn try_from(json: MnemonicJson) -> Result<Self, Self::Error> {
        let mut entropy = hex::decode(&json.entropy)?;
        let result = Mnemonic::from_entropy(&entropy, json.language);
        entropy.zeroize();
        let mnemonic = result?;

        let given = split(&json.phrase).into_iter().map(normalize);
        let expected = mnemonic.words.iter().map(|word| normalize(word));
        if !given.eq(expected) {
            return Err(MnemonicError::PhraseMismatch);
        }
        Ok(mnemonic.with_passphrase(&json.passphrase))
    }
}
