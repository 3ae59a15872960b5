//! secp256k1 private key.
//!
//! Wraps a k256 `SecretKey` (a scalar in `1..n`) and adds the
//! `(scalar + tweak) mod n` operation used for child key derivation.

use std::fmt;

use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, Scalar, SecretKey};

use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key.
///
/// The scalar is guaranteed non-zero and below the curve order. Key
/// material is wiped when the value is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes encode a scalar in `1..n`, or
    /// `InvalidPrivateKey` if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let inner = SecretKey::from_slice(bytes)
            .map_err(|_| PrivateKey::out_of_range())?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_BYTES_LEN] {
        let mut out = [0u8; PRIVATE_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key (scalar multiplication by the base point).
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256(self.inner.public_key())
    }

    /// Compute `(self + tweak) mod n` as a new private key.
    ///
    /// # Arguments
    /// * `tweak` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `InvalidTweak` if the tweak is not below the curve order, or
    /// `TweakResultInvalid` if the sum is zero.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<PrivateKey, PrimitivesError> {
        let tweak = scalar_from_tweak(tweak)?;
        let sum = self.to_scalar() + tweak;
        let non_zero = Option::<NonZeroScalar>::from(NonZeroScalar::new(sum))
            .ok_or(PrimitivesError::TweakResultInvalid)?;
        Ok(PrivateKey {
            inner: SecretKey::from(non_zero),
        })
    }

    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.to_nonzero_scalar()
    }

    fn out_of_range() -> PrimitivesError {
        PrimitivesError::InvalidPrivateKey("scalar is zero or not below the curve order".to_string())
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// Interpret 32 big-endian bytes as a scalar, rejecting values `>= n`.
pub(crate) fn scalar_from_tweak(bytes: &[u8; 32]) -> Result<Scalar, PrimitivesError> {
    let repr = FieldBytes::clone_from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr)).ok_or(PrimitivesError::InvalidTweak)
}
