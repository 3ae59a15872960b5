//! Network selection for extended key version bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Network an extended key is encoded for.
///
/// The network only affects the 4-byte version prefix of the serialized
/// key; derivation is identical on every network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin mainnet, `xprv` / `xpub`.
    #[default]
    Main,
    /// Bitcoin testnet, `tprv` / `tpub`.
    Testnet,
}

impl Network {
    /// Every network, in the order version prefixes are matched.
    pub const ALL: [Network; 2] = [Network::Main, Network::Testnet];

    /// Version prefix of a serialized private key (`xprv` / `tprv`).
    pub fn private_version(self) -> [u8; 4] {
        match self {
            Network::Main => [0x04, 0x88, 0xad, 0xe4],
            Network::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    /// Version prefix of a serialized public key (`xpub` / `tpub`).
    pub fn public_version(self) -> [u8; 4] {
        match self {
            Network::Main => [0x04, 0x88, 0xb2, 0x1e],
            Network::Testnet => [0x04, 0x35, 0x87, 0xcf],
        }
    }

    /// Resolve a version prefix to its network and whether it marks a
    /// private key. Returns `None` for unknown prefixes.
    pub fn from_version(version: [u8; 4]) -> Option<(Network, bool)> {
        Network::ALL.into_iter().find_map(|network| {
            if version == network.private_version() {
                Some((network, true))
            } else if version == network.public_version() {
                Some((network, false))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => f.write_str("main"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}
