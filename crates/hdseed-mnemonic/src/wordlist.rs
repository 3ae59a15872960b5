//! Per-language BIP-39 wordlists.
//!
//! Each supported language owns a fixed, ordered table of exactly 2048
//! unique words. Tables are built once on first use and shared read-only
//! by every caller afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use bip39::Language as WordData;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::normalize::normalize;
use crate::MnemonicError;

/// Number of words in every BIP-39 wordlist.
pub const WORDLIST_SIZE: usize = 2048;

/// A language with a registered BIP-39 wordlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    English,
    Japanese,
    Spanish,
    French,
    Italian,
    ChineseSimplified,
    ChineseTraditional,
    Korean,
    Czech,
}

impl Language {
    /// Every supported language, in detection priority order.
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::Japanese,
        Language::Spanish,
        Language::French,
        Language::Italian,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::Korean,
        Language::Czech,
    ];

    /// Lowercase tag used in configuration and JSON.
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Japanese => "japanese",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::Italian => "italian",
            Language::ChineseSimplified => "chinese-simplified",
            Language::ChineseTraditional => "chinese-traditional",
            Language::Korean => "korean",
            Language::Czech => "czech",
        }
    }

    /// Separator placed between words of a phrase.
    ///
    /// Japanese does not delimit words with spaces, so its phrases use the
    /// ideographic space (U+3000).
    pub fn separator(self) -> &'static str {
        match self {
            Language::Japanese => "\u{3000}",
            _ => " ",
        }
    }

    /// The shared wordlist table for this language.
    ///
    /// # Panics
    /// If the bundled table is not 2048 unique words. This is a build
    /// configuration fault, not a runtime condition.
    pub fn wordlist(self) -> &'static Wordlist {
        static TABLES: [OnceLock<Wordlist>; 9] = [const { OnceLock::new() }; 9];
        TABLES[self as usize].get_or_init(|| {
            Wordlist::new(self, self.word_data().word_list())
                .unwrap_or_else(|e| panic!("bundled wordlist is unusable: {e}"))
        })
    }

    /// Find the first language whose wordlist contains `word`.
    pub fn detect(word: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.wordlist().contains(word))
    }

    fn word_data(self) -> WordData {
        match self {
            Language::English => WordData::English,
            Language::Japanese => WordData::Japanese,
            Language::Spanish => WordData::Spanish,
            Language::French => WordData::French,
            Language::Italian => WordData::Italian,
            Language::ChineseSimplified => WordData::SimplifiedChinese,
            Language::ChineseTraditional => WordData::TraditionalChinese,
            Language::Korean => WordData::Korean,
            Language::Czech => WordData::Czech,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.tag() == s)
            .ok_or_else(|| MnemonicError::UnknownLanguage(s.to_string()))
    }
}

/// An ordered table of 2048 words with reverse lookup.
///
/// Words are held in composed (NFC) form, which is how phrases are
/// displayed. Reverse lookup is keyed by the NFKD form of each word so that
/// composed and decomposed spellings of the same word resolve to one index.
pub struct Wordlist {
    language: Language,
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// Build a wordlist, validating size and uniqueness.
    ///
    /// # Returns
    /// `InvalidWordlist` if `words` does not hold exactly 2048 distinct
    /// entries after normalization.
    pub fn new(language: Language, words: &[&str]) -> Result<Self, MnemonicError> {
        if words.len() != WORDLIST_SIZE {
            return Err(MnemonicError::InvalidWordlist {
                language,
                reason: format!("expected {} words, got {}", WORDLIST_SIZE, words.len()),
            });
        }
        let mut index = HashMap::with_capacity(WORDLIST_SIZE);
        for (i, word) in words.iter().enumerate() {
            if index.insert(normalize(word), i as u16).is_some() {
                return Err(MnemonicError::InvalidWordlist {
                    language,
                    reason: format!("duplicate word {word:?}"),
                });
            }
        }
        let words = words.iter().map(|word| word.nfc().collect::<String>()).collect();
        Ok(Wordlist { language, words, index })
    }

    /// The language this table belongs to.
    pub fn language(&self) -> Language {
        self.language
    }

    /// All words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Index (0..2047) of `word`.
    ///
    /// # Returns
    /// `UnknownWord` if the word is not in this list.
    pub fn lookup_by_word(&self, word: &str) -> Result<u16, MnemonicError> {
        self.index
            .get(&normalize(word))
            .copied()
            .ok_or_else(|| MnemonicError::UnknownWord(word.to_string()))
    }

    /// Word stored at `index`.
    ///
    /// # Returns
    /// `InvalidWordIndex` unless `index < 2048`.
    pub fn lookup_by_index(&self, index: u16) -> Result<&str, MnemonicError> {
        self.words
            .get(usize::from(index))
            .map(String::as_str)
            .ok_or(MnemonicError::InvalidWordIndex(index))
    }

    /// Whether `word` belongs to this list.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&normalize(word))
    }

    /// Words starting with `prefix`, in list order.
    pub fn words_by_prefix(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize(prefix);
        self.words
            .iter()
            .map(String::as_str)
            .filter(|word| normalize(word).starts_with(&prefix))
            .collect()
    }
}

impl fmt::Debug for Wordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wordlist")
            .field("language", &self.language)
            .field("len", &self.words.len())
            .finish()
    }
}

/// Index of `word` in the wordlist for `language`.
pub fn lookup_by_word(language: Language, word: &str) -> Result<u16, MnemonicError> {
    language.wordlist().lookup_by_word(word)
}

/// Word at `index` in the wordlist for `language`.
pub fn lookup_by_index(language: Language, index: u16) -> Result<&'static str, MnemonicError> {
    language.wordlist().lookup_by_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_boundaries() {
        assert_eq!(lookup_by_word(Language::English, "abandon").unwrap(), 0);
        assert_eq!(lookup_by_word(Language::English, "zoo").unwrap(), 2047);
        assert_eq!(lookup_by_index(Language::English, 3).unwrap(), "about");
        assert_eq!(lookup_by_index(Language::English, 2047).unwrap(), "zoo");
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            lookup_by_index(Language::English, 2048),
            Err(MnemonicError::InvalidWordIndex(2048))
        );
    }

    #[test]
    fn test_unknown_word() {
        assert_eq!(
            lookup_by_word(Language::English, "xyz123"),
            Err(MnemonicError::UnknownWord("xyz123".to_string()))
        );
        // Lookup is case sensitive.
        assert!(lookup_by_word(Language::English, "Abandon").is_err());
    }

    #[test]
    fn test_every_language_has_full_table() {
        for language in Language::ALL {
            let list = language.wordlist();
            assert_eq!(list.words().len(), WORDLIST_SIZE, "{language}");
            assert_eq!(list.language(), language);
            for (i, word) in list.words().iter().enumerate() {
                assert_eq!(list.lookup_by_word(word).unwrap() as usize, i, "{language} {word}");
            }
        }
    }

    #[test]
    fn test_rejects_short_table() {
        static SHORT: [&str; 2] = ["one", "two"];
        let err = Wordlist::new(Language::English, &SHORT).unwrap_err();
        assert!(matches!(err, MnemonicError::InvalidWordlist { .. }));
    }

    #[test]
    fn test_rejects_duplicate_words() {
        let english = Language::English.wordlist().words();
        let mut copy: Vec<&str> = english.iter().map(String::as_str).collect();
        copy[1] = copy[0];
        let err = Wordlist::new(Language::English, &copy).unwrap_err();
        assert!(matches!(err, MnemonicError::InvalidWordlist { .. }));
    }

    #[test]
    fn test_japanese_lookup_ignores_composition() {
        // "あおぞら" with a precomposed and a combining dakuten.
        let composed = "\u{3042}\u{304a}\u{305e}\u{3089}";
        let decomposed = "\u{3042}\u{304a}\u{305d}\u{3099}\u{3089}";
        let list = Language::Japanese.wordlist();
        assert_eq!(list.lookup_by_word(composed).unwrap(), 3);
        assert_eq!(list.lookup_by_word(decomposed).unwrap(), 3);
        assert_eq!(list.lookup_by_index(3).unwrap(), composed);
    }

    #[test]
    fn test_words_are_composed() {
        for language in Language::ALL {
            for word in language.wordlist().words() {
                assert!(
                    unicode_normalization::is_nfc(word),
                    "{language} {word:?} is not composed"
                );
            }
        }
        // Hangul syllables are stored precomposed.
        assert_eq!(Language::Korean.wordlist().lookup_by_index(0).unwrap().chars().count(), 2);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(Language::detect("abandon"), Some(Language::English));
        assert_eq!(Language::detect("あいこくしん"), Some(Language::Japanese));
        assert_eq!(Language::detect("notaword"), None);
    }

    #[test]
    fn test_words_by_prefix() {
        let list = Language::English.wordlist();
        assert_eq!(list.words_by_prefix("zo"), vec!["zone", "zoo"]);
        assert!(list.words_by_prefix("qq").is_empty());
    }

    #[test]
    fn test_language_tags_roundtrip() {
        for language in Language::ALL {
            assert_eq!(language.tag().parse::<Language>().unwrap(), language);
            let json = serde_json::to_string(&language).unwrap();
            assert_eq!(json, format!("\"{}\"", language.tag()));
        }
        assert_eq!(
            "klingon".parse::<Language>(),
            Err(MnemonicError::UnknownLanguage("klingon".to_string()))
        );
    }

    #[test]
    fn test_separator() {
        assert_eq!(Language::English.separator(), " ");
        assert_eq!(Language::Japanese.separator(), "\u{3000}");
    }
}
