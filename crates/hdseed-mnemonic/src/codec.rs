//! Entropy <-> word phrase codec.
//!
//! The entropy bits are followed by the first `ENT / 32` bits of
//! SHA-256(entropy); the combined bitstream is read most-significant-bit
//! first in 11-bit groups, each indexing the wordlist.

use hdseed_primitives::hash::sha256;

use crate::wordlist::Language;
use crate::MnemonicError;

/// Accepted entropy lengths in bytes.
pub const ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Accepted phrase lengths in words.
pub const PHRASE_LENGTHS: [usize; 5] = [12, 15, 18, 21, 24];

const BITS_PER_WORD: usize = 11;

/// Encode `entropy` as an ordered list of words.
///
/// # Returns
/// `InvalidEntropyLength` unless the entropy is 16, 20, 24, 28 or 32 bytes.
pub fn encode(entropy: &[u8], language: Language) -> Result<Vec<&'static str>, MnemonicError> {
    if !ENTROPY_LENGTHS.contains(&entropy.len()) {
        return Err(MnemonicError::InvalidEntropyLength(entropy.len()));
    }
    let wordlist = language.wordlist();

    // The checksum is at most 8 bits, so the first digest byte holds all of it.
    let mut bits = Vec::with_capacity(entropy.len() + 1);
    bits.extend_from_slice(entropy);
    bits.push(sha256(entropy)[0]);

    let total_bits = entropy.len() * 8 + checksum_bits(entropy.len());
    (0..total_bits / BITS_PER_WORD)
        .map(|word| {
            let index = (0..BITS_PER_WORD).fold(0u16, |acc, bit| {
                (acc << 1) | bit_at(&bits, word * BITS_PER_WORD + bit)
            });
            wordlist.lookup_by_index(index)
        })
        .collect()
}

/// Decode an ordered list of words back to entropy, verifying the checksum.
///
/// # Returns
/// `UnknownWord` for a word missing from the list, `InvalidPhraseLength`
/// for a word count other than 12, 15, 18, 21 or 24, and
/// `ChecksumMismatch` when the trailing checksum bits disagree with the
/// recovered entropy.
pub fn decode<S: AsRef<str>>(words: &[S], language: Language) -> Result<Vec<u8>, MnemonicError> {
    let wordlist = language.wordlist();
    let indices = words
        .iter()
        .map(|word| wordlist.lookup_by_word(word.as_ref()))
        .collect::<Result<Vec<u16>, _>>()?;

    if !PHRASE_LENGTHS.contains(&indices.len()) {
        return Err(MnemonicError::InvalidPhraseLength(indices.len()));
    }

    let mut bits = vec![0u8; (indices.len() * BITS_PER_WORD).div_ceil(8)];
    for (word, index) in indices.iter().enumerate() {
        for bit in 0..BITS_PER_WORD {
            if (index >> (BITS_PER_WORD - 1 - bit)) & 1 == 1 {
                let pos = word * BITS_PER_WORD + bit;
                bits[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }

    let entropy_len = indices.len() * 4 / 3;
    let shift = 8 - checksum_bits(entropy_len);
    let expected = sha256(&bits[..entropy_len])[0] >> shift;
    let actual = bits[entropy_len] >> shift;
    if expected != actual {
        return Err(MnemonicError::ChecksumMismatch);
    }

    bits.truncate(entropy_len);
    Ok(bits)
}

/// Number of checksum bits for an entropy of `entropy_len` bytes.
fn checksum_bits(entropy_len: usize) -> usize {
    entropy_len * 8 / 32
}

fn bit_at(data: &[u8], pos: usize) -> u16 {
    u16::from((data[pos / 8] >> (7 - pos % 8)) & 1)
}
