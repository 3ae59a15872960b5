//! Text normalization for phrases and passphrases.
//!
//! Seed derivation hashes the phrase as raw bytes, so every phrase and
//! passphrase goes through Unicode NFKD before use. Words are joined with
//! the separator of their language; for Japanese that is U+3000, which NFKD
//! folds to an ASCII space.

use unicode_normalization::UnicodeNormalization;

use crate::wordlist::Language;

/// Normalize `text` to Unicode NFKD.
pub fn normalize(text: &str) -> String {
    text.nfkd().collect()
}

/// Join `words` with the separator used by `language`.
pub fn join<S: AsRef<str>>(words: &[S], language: Language) -> String {
    let separator = language.separator();
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(word.as_ref());
    }
    out
}

/// Split a phrase into words on any Unicode whitespace, including U+3000.
pub fn split(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_nfkd() {
        // Precomposed e-acute decomposes to e + combining acute.
        assert_eq!(normalize("\u{e9}"), "e\u{301}");
        // Compatibility characters fold: the "meter" square becomes katakana.
        assert_eq!(normalize("\u{334d}"), "\u{30e1}\u{30fc}\u{30c8}\u{30eb}");
        assert_eq!(normalize("\u{3000}"), " ");
    }

    #[test]
    fn test_join_uses_language_separator() {
        assert_eq!(join(&["a", "b", "c"], Language::English), "a b c");
        assert_eq!(
            join(&["あ", "い"], Language::Japanese),
            "あ\u{3000}い"
        );
        assert_eq!(join::<&str>(&[], Language::English), "");
    }

    #[test]
    fn test_split_handles_ideographic_space() {
        assert_eq!(split("  a b\u{3000}c\n"), vec!["a", "b", "c"]);
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_join_then_split_is_lossless() {
        let words = ["あいこくしん", "あおぞら"];
        let joined = join(&words, Language::Japanese);
        assert_eq!(split(&joined), words);
    }
}
