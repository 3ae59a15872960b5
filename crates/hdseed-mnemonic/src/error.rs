use crate::wordlist::Language;

/// Error types for mnemonic encoding, decoding and wordlist access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MnemonicError {
    #[error("invalid entropy length: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength(usize),
    #[error("invalid entropy size: {0} bits (expected 128, 160, 192, 224 or 256)")]
    InvalidEntropyBits(usize),
    #[error("invalid phrase length: {0} words (expected 12, 15, 18, 21 or 24)")]
    InvalidPhraseLength(usize),
    #[error("unknown word: {0}")]
    UnknownWord(String),
    #[error("word index out of range: {0}")]
    InvalidWordIndex(u16),
    #[error("checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid {language} wordlist: {reason}")]
    InvalidWordlist { language: Language, reason: String },
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    #[error("invalid entropy hex: {0}")]
    InvalidHex(String),
    #[error("phrase does not match entropy")]
    PhraseMismatch,
}

impl From<hex::FromHexError> for MnemonicError {
    fn from(e: hex::FromHexError) -> Self {
        MnemonicError::InvalidHex(e.to_string())
    }
}
