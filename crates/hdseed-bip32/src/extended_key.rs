//! BIP-32 extended keys.
//!
//! An [`ExtendedKey`] is one node of the key tree: a secp256k1 key plus the
//! chain code and position metadata needed to derive its children. Keys
//! are immutable values; derivation always returns a new key.
//!
//! Serialized layout (78 bytes, then a 4-byte double-SHA-256 checksum and
//! Base58):
//!
//! ```text
//! version(4) depth(1) parent_fingerprint(4) child_number(4) chain_code(32) key(33)
//! ```

use std::fmt;
use std::str::FromStr;

use hdseed_mnemonic::Mnemonic;
use hdseed_primitives::base58;
use hdseed_primitives::ec::{PrivateKey, PublicKey};
use hdseed_primitives::hash::sha512_hmac;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::network::Network;
use crate::path::{ChildNumber, DerivationPath};
use crate::KeyError;

/// HMAC key used to derive the master key from a seed.
pub const MASTER_SEED_KEY: &[u8] = b"Bitcoin seed";

/// Length of a serialized extended key before the checksum.
pub const SERIALIZED_LEN: usize = 78;

/// Shortest accepted seed (128 bits).
pub const MIN_SEED_LEN: usize = 16;

/// Longest accepted seed (512 bits).
pub const MAX_SEED_LEN: usize = 64;

/// Key held by an extended key node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

/// A node in a BIP-32 key tree.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    network: Network,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key: KeyMaterial,
}

/// Derive the master extended private key for `seed`.
///
/// # Returns
/// `InvalidSeedLength` unless the seed is 16 to 64 bytes, or
/// `InvalidMasterKey` if the derived scalar is zero or not below the
/// curve order.
pub fn master_key_from_seed(seed: &[u8], network: Network) -> Result<ExtendedKey, KeyError> {
    if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
        return Err(KeyError::InvalidSeedLength(seed.len()));
    }
    let mut digest = sha512_hmac(MASTER_SEED_KEY, seed);
    let key = PrivateKey::from_bytes(&digest[..32]).map_err(|_| KeyError::InvalidMasterKey);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&digest[32..]);
    digest.zeroize();

    let master = ExtendedKey {
        network,
        depth: 0,
        parent_fingerprint: [0; 4],
        child_number: ChildNumber::from(0),
        chain_code,
        key: KeyMaterial::Private(key?),
    };
    debug!(
        network = %network,
        fingerprint = %hex::encode(master.fingerprint()),
        "created master key"
    );
    Ok(master)
}

impl ExtendedKey {
    /// Same as [`master_key_from_seed`].
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self, KeyError> {
        master_key_from_seed(seed, network)
    }

    /// Master key for the seed of `mnemonic`, passphrase included.
    pub fn from_mnemonic(mnemonic: &Mnemonic, network: Network) -> Result<Self, KeyError> {
        master_key_from_seed(mnemonic.to_seed().as_bytes(), network)
    }

    /// Derive the child at `child`.
    ///
    /// Hardened children hash `0x00 || private key || index`; normal children
    /// hash `compressed public key || index`. Both are keyed by this key's
    /// chain code.
    ///
    /// # Returns
    /// `HardenedDerivationRequiresPrivateKey` for a hardened child of a
    /// public key, `DepthOverflow` at depth 255, or `InvalidChildKey` when
    /// the index yields an invalid key (callers move on to the next index).
    pub fn derive_child(&self, child: impl Into<ChildNumber>) -> Result<ExtendedKey, KeyError> {
        let child = child.into();
        let index = child.to_u32();
        if child.is_hardened() && !self.is_private() {
            return Err(KeyError::HardenedDerivationRequiresPrivateKey);
        }
        let depth = self.depth.checked_add(1).ok_or(KeyError::DepthOverflow)?;
        let parent_pub = self.public_key();

        let mut data = Vec::with_capacity(37);
        match &self.key {
            KeyMaterial::Private(key) if child.is_hardened() => {
                data.push(0);
                data.extend_from_slice(&key.to_bytes());
            }
            _ => data.extend_from_slice(&parent_pub.to_compressed()),
        }
        data.extend_from_slice(&index.to_be_bytes());

        let mut digest = sha512_hmac(&self.chain_code, &data);
        data.zeroize();
        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(&digest[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);
        digest.zeroize();

        let key = match &self.key {
            KeyMaterial::Private(key) => key.tweak_add(&tweak).map(KeyMaterial::Private),
            KeyMaterial::Public(key) => key.tweak_add(&tweak).map(KeyMaterial::Public),
        };
        tweak.zeroize();
        let key = key.map_err(|_| KeyError::InvalidChildKey(index))?;

        trace!(depth, child = %child, "derived child key");
        Ok(ExtendedKey {
            network: self.network,
            depth,
            parent_fingerprint: parent_pub.fingerprint(),
            child_number: child,
            chain_code,
            key,
        })
    }

    /// Derive every segment of `path` in turn, starting from this key.
    ///
    /// # Returns
    /// `PathSegment` wrapping the first failure and its zero-based position.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey, KeyError> {
        let key = path
            .iter()
            .enumerate()
            .try_fold(self.clone(), |key, (position, child)| {
                key.derive_child(*child).map_err(|e| KeyError::PathSegment {
                    position,
                    source: Box::new(e),
                })
            })?;
        debug!(path = %path, depth = key.depth, "derived path");
        Ok(key)
    }

    /// Derive the account key `m/purpose'/coin_type'/account'`.
    ///
    /// # Returns
    /// `InvalidPath` unless this is a master private key.
    pub fn derive_account(&self, purpose: u32, coin_type: u32, account: u32) -> Result<ExtendedKey, KeyError> {
        if !self.is_master() || !self.is_private() {
            return Err(KeyError::InvalidPath(
                "account keys derive from a master private key".to_string(),
            ));
        }
        self.derive_path(&DerivationPath::account(purpose, coin_type, account)?)
    }

    /// The public-only counterpart of this key, with identical metadata.
    pub fn neuter(&self) -> ExtendedKey {
        let mut key = self.clone();
        key.key = KeyMaterial::Public(self.public_key());
        key
    }

    /// This key re-tagged for `network`.
    pub fn with_network(&self, network: Network) -> ExtendedKey {
        let mut key = self.clone();
        key.network = network;
        key
    }

    /// Network whose version bytes this key serializes with.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Number of derivation steps from the master key; 0 for the master.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// First four bytes of the parent key identifier; zero for the master.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Child number this key was derived at; 0 for the master.
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The private or public key held by this extended key.
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// The private key, if this is a private extended key.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        match &self.key {
            KeyMaterial::Private(key) => Some(key),
            KeyMaterial::Public(_) => None,
        }
    }

    /// The public key, computed from the private key when needed.
    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(key) => key.pub_key(),
            KeyMaterial::Public(key) => key.clone(),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn is_master(&self) -> bool {
        self.depth == 0
    }

    /// Hash160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key().hash160()
    }

    /// First four bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> [u8; 4] {
        self.public_key().fingerprint()
    }

    /// Encode into the 78-byte layout.
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        let version = match self.key {
            KeyMaterial::Private(_) => self.network.private_version(),
            KeyMaterial::Public(_) => self.network.public_version(),
        };
        let mut out = [0u8; SERIALIZED_LEN];
        out[0..4].copy_from_slice(&version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_number.to_u32().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        match &self.key {
            KeyMaterial::Private(key) => out[46..78].copy_from_slice(&key.to_bytes()),
            KeyMaterial::Public(key) => out[45..78].copy_from_slice(&key.to_compressed()),
        }
        out
    }

    /// Decode the 78-byte layout.
    ///
    /// # Returns
    /// `InvalidSerialization` on a wrong length, unknown version, a master
    /// key with a parent fingerprint or index, a private key field without
    /// the 0x00 prefix, or key bytes that are not a valid key.
    pub fn deserialize(data: &[u8]) -> Result<Self, KeyError> {
        if data.len() != SERIALIZED_LEN {
            return Err(invalid(format!(
                "expected {SERIALIZED_LEN} bytes, got {}",
                data.len()
            )));
        }
        let version = [data[0], data[1], data[2], data[3]];
        let (network, is_private) = Network::from_version(version)
            .ok_or_else(|| invalid(format!("unknown version {}", hex::encode(version))))?;

        let depth = data[4];
        let parent_fingerprint = [data[5], data[6], data[7], data[8]];
        let index = u32::from_be_bytes([data[9], data[10], data[11], data[12]]);
        if depth == 0 && (parent_fingerprint != [0; 4] || index != 0) {
            return Err(invalid("master key with non-zero parent fingerprint or index".to_string()));
        }
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let key_data = &data[45..78];
        let key = if is_private {
            if key_data[0] != 0x00 {
                return Err(invalid(format!("private key prefix {:#04x}", key_data[0])));
            }
            KeyMaterial::Private(
                PrivateKey::from_bytes(&key_data[1..]).map_err(|e| invalid(e.to_string()))?,
            )
        } else {
            if key_data[0] != 0x02 && key_data[0] != 0x03 {
                return Err(invalid(format!("public key prefix {:#04x}", key_data[0])));
            }
            KeyMaterial::Public(PublicKey::from_bytes(key_data).map_err(|e| invalid(e.to_string()))?)
        };

        Ok(ExtendedKey {
            network,
            depth,
            parent_fingerprint,
            child_number: ChildNumber::from(index),
            chain_code,
            key,
        })
    }

    /// Base58Check string (`xprv...`, `xpub...`, `tprv...`, `tpub...`).
    pub fn to_base58(&self) -> String {
        let mut data = self.serialize();
        let encoded = base58::check_encode(&data);
        data.zeroize();
        encoded
    }

    /// Parse a Base58Check string.
    pub fn from_base58(s: &str) -> Result<Self, KeyError> {
        let mut data = base58::check_decode(s).map_err(|e| invalid(e.to_string()))?;
        let key = ExtendedKey::deserialize(&data);
        data.zeroize();
        key
    }
}

fn invalid(reason: String) -> KeyError {
    KeyError::InvalidSerialization(reason)
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// Private key material is never printed.
impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("network", &self.network)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("fingerprint", &hex::encode(self.fingerprint()))
            .field("is_private", &self.is_private())
            .finish()
    }
}

impl FromStr for ExtendedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtendedKey::from_base58(s)
    }
}

impl Serialize for ExtendedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for ExtendedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ExtendedKey::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
