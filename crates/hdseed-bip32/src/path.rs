//! Child indices and derivation paths.
//!
//! Paths use the conventional text form `m/44'/0'/0'/0/1`. A hardened
//! segment may be marked with `'`, `h` or `H`; output always uses `'`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::KeyError;

/// First hardened child index (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One step in a derivation path.
///
/// Holds the 32-bit wire value: indices at or above 2^31 are hardened.
/// Every `u32` is a valid child number, so the hardened flag can never
/// disagree with the value that gets derived and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// A non-hardened child.
    ///
    /// # Returns
    /// `InvalidPath` if `index >= 2^31`.
    pub fn normal(index: u32) -> Result<Self, KeyError> {
        if index >= HARDENED_OFFSET {
            return Err(KeyError::InvalidPath(format!("index {index} out of range")));
        }
        Ok(ChildNumber(index))
    }

    /// A hardened child; `index` is given without the offset.
    ///
    /// # Returns
    /// `InvalidPath` if `index >= 2^31`.
    pub fn hardened(index: u32) -> Result<Self, KeyError> {
        if index >= HARDENED_OFFSET {
            return Err(KeyError::InvalidPath(format!("index {index} out of range")));
        }
        Ok(ChildNumber(index | HARDENED_OFFSET))
    }

    /// Whether deriving this child needs the parent private key.
    pub fn is_hardened(self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }

    /// Index without the hardened offset.
    pub fn index(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    /// The 32-bit wire value, with the top bit set when hardened.
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for ChildNumber {
    fn from(raw: u32) -> Self {
        ChildNumber(raw)
    }
}

impl From<ChildNumber> for u32 {
    fn from(child: ChildNumber) -> Self {
        child.0
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

impl FromStr for ChildNumber {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        // u32::from_str would also accept a leading '+'.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyError::InvalidPath(format!("bad segment {s:?}")));
        }
        let index: u32 = digits
            .parse()
            .map_err(|_| KeyError::InvalidPath(format!("bad segment {s:?}")))?;
        if hardened {
            ChildNumber::hardened(index)
        } else {
            ChildNumber::normal(index)
        }
    }
}

/// An ordered sequence of child numbers, relative to some root key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path `m`.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// BIP-44 style account path `m/purpose'/coin_type'/account'`.
    pub fn account(purpose: u32, coin_type: u32, account: u32) -> Result<Self, KeyError> {
        Ok(DerivationPath(vec![
            ChildNumber::hardened(purpose)?,
            ChildNumber::hardened(coin_type)?,
            ChildNumber::hardened(account)?,
        ]))
    }

    /// Append `child`, returning the extended path.
    pub fn child(mut self, child: ChildNumber) -> Self {
        self.0.push(child);
        self
    }

    /// The child numbers, root first.
    pub fn children(&self) -> &[ChildNumber] {
        &self.0
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the master path `m`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the child numbers, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.0.iter()
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(children: Vec<ChildNumber>) -> Self {
        DerivationPath(children)
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<I: IntoIterator<Item = ChildNumber>>(iter: I) -> Self {
        DerivationPath(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('/');
        if segments.next() != Some("m") {
            return Err(KeyError::InvalidPath(format!("{s:?} must start with \"m\"")));
        }
        segments.map(ChildNumber::from_str).collect()
    }
}

/// Serialize as the `m/...` string.
impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(index: u32) -> ChildNumber {
        ChildNumber::hardened(index).unwrap()
    }

    fn n(index: u32) -> ChildNumber {
        ChildNumber::normal(index).unwrap()
    }

    #[test]
    fn test_child_number_wire_value() {
        assert_eq!(ChildNumber::from(0).to_u32(), 0);
        assert_eq!(ChildNumber::from(HARDENED_OFFSET), h(0));
        assert_eq!(ChildNumber::from(u32::MAX), h(0x7fff_ffff));
        assert_eq!(u32::from(h(2)), HARDENED_OFFSET + 2);
        assert!(h(1).is_hardened());
        assert_eq!(h(1).index(), 1);
        assert!(!n(1).is_hardened());
    }

    #[test]
    fn test_raw_value_decides_hardening() {
        // A raw value with the top bit set is hardened however it was built.
        let raw = ChildNumber::from(0x8000_0005);
        assert!(raw.is_hardened());
        assert_eq!(raw, h(5));
        assert_eq!(raw.index(), 5);
        assert_eq!(raw.to_string(), "5'");
        assert_eq!(raw.to_string().parse::<ChildNumber>().unwrap(), raw);

        let path: DerivationPath = vec![raw, ChildNumber::from(7)].into();
        assert_eq!(path.to_string(), "m/5'/7");
        assert_eq!(path.to_string().parse::<DerivationPath>().unwrap(), path);
    }

    #[test]
    fn test_child_number_range() {
        assert!(ChildNumber::normal(HARDENED_OFFSET - 1).is_ok());
        assert!(matches!(ChildNumber::normal(HARDENED_OFFSET), Err(KeyError::InvalidPath(_))));
        assert!(matches!(ChildNumber::hardened(HARDENED_OFFSET), Err(KeyError::InvalidPath(_))));
    }

    #[test]
    fn test_parse_path() {
        let path: DerivationPath = "m/44'/0h/0H/0/1".parse().unwrap();
        assert_eq!(
            path.children(),
            &[
                h(44),
                h(0),
                h(0),
                n(0),
                n(1),
            ]
        );
        assert_eq!(path.to_string(), "m/44'/0'/0'/0/1");
    }

    #[test]
    fn test_parse_master() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path, DerivationPath::master());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "M/0", "0/1", "m/", "m//1", "m/x", "m/1''", "m/-1", "m/+1", "m/2147483648", "m/ 1"] {
            assert!(
                matches!(bad.parse::<DerivationPath>(), Err(KeyError::InvalidPath(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_account_path() {
        let path = DerivationPath::account(44, 0, 3).unwrap();
        assert_eq!(path.to_string(), "m/44'/0'/3'");
        let extended = path.child(n(0)).child(n(7));
        assert_eq!(extended.to_string(), "m/44'/0'/3'/0/7");
        assert_eq!(extended.len(), 5);
    }

    #[test]
    fn test_serde_as_string() {
        let path: DerivationPath = "m/0'/1".parse().unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"m/0'/1\"");
        let back: DerivationPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(serde_json::from_str::<DerivationPath>("\"m/q\"").is_err());
    }
}
