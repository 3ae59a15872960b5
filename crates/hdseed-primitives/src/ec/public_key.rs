//! secp256k1 public key.
//!
//! Supports SEC1 parsing, compressed serialization, Hash160 fingerprints and
//! the `P + tweak*G` point operation used for public child derivation.

use std::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::ProjectivePoint;

use crate::ec::private_key::scalar_from_tweak;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// A secp256k1 public key (a point other than the identity).
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes (compressed or uncompressed).
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or `InvalidPublicKey` if the bytes do not
    /// encode a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let inner = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::InvalidPublicKey(hex::encode(bytes)))?;
        Ok(PublicKey { inner })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Compressed public key as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the compressed public key, the key identifier.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// First four bytes of the key identifier.
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.hash160();
        [id[0], id[1], id[2], id[3]]
    }

    /// Compute `self + tweak*G` as a new public key.
    ///
    /// # Returns
    /// `InvalidTweak` if the tweak is not below the curve order, or
    /// `TweakResultInvalid` if the sum is the point at infinity.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let tweak = scalar_from_tweak(tweak)?;
        let point = self.inner.to_projective() + ProjectivePoint::GENERATOR * tweak;
        let inner = k256::PublicKey::from_affine(point.to_affine())
            .map_err(|_| PrimitivesError::TweakResultInvalid)?;
        Ok(PublicKey { inner })
    }

    pub(crate) fn from_k256(inner: k256::PublicKey) -> Self {
        PublicKey { inner }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
