//! Digest type for block, payload, and Merkle tree identification.
//!
//! Provides `MerkleHash`, a 32-byte SHA-512/256 digest displayed as plain
//! lowercase hex. Every content-addressed object in the braid protocol
//! (block headers, payloads, body trees) is identified by one of these.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Size of a MerkleHash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte digest identifying a Merkle tree root, block, or payload.
///
/// Internally a plain byte array; displayed as 64 lowercase hex characters
/// in the same byte order (no reversal).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct MerkleHash([u8; HASH_SIZE]);

impl MerkleHash {
    /// Create a MerkleHash from a raw 32-byte array.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        MerkleHash(bytes)
    }

    /// Create a MerkleHash from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(MerkleHash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(MerkleHash(arr))
    }

    /// Create a MerkleHash from a 64-character hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Exactly 64 hex characters in digest byte order.
    ///
    /// # Returns
    /// `Ok(MerkleHash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_SIZE * 2 {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash hex length of {}, want {}",
                hex_str.len(),
                HASH_SIZE * 2
            )));
        }
        let decoded = hex::decode(hex_str)?;
        Self::from_bytes(&decoded)
    }

    /// Access the internal byte array as a reference.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return a copy of the internal bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Display the hash as lowercase hex in digest byte order.
impl fmt::Display for MerkleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Parse a 64-character hex string into a MerkleHash.
impl FromStr for MerkleHash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MerkleHash::from_hex(s)
    }
}

impl AsRef<[u8]> for MerkleHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for MerkleHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de> Deserialize<'de> for MerkleHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MerkleHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
