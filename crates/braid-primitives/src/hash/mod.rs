//! Hash function primitives for the braid SDK.
//!
//! The protocol uses a single digest algorithm: SHA-512 truncated to
//! 256 bits (SHA-512/256, FIPS 180-4). The truncated variant has its own
//! initialization vector, so its output is unrelated to a prefix of a
//! plain SHA-512 digest.

use sha2::{Digest, Sha512_256};

/// Compute the SHA-512/256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-512/256 digest.
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-512/256 hash of the concatenation of several inputs.
///
/// Equivalent to hashing the flattened concatenation, without building
/// the intermediate buffer.
///
/// # Arguments
/// * `parts` - Byte slices hashed in order.
///
/// # Returns
/// A 32-byte SHA-512/256 digest.
pub fn sha512_256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS 180-4 example vectors for SHA-512/256.

    #[test]
    fn test_sha512_256_empty_string() {
        let hash = sha512_256(b"");
        assert_eq!(
            hex::encode(hash),
            "c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
        );
    }

    #[test]
    fn test_sha512_256_abc() {
        let hash = sha512_256(b"abc");
        assert_eq!(
            hex::encode(hash),
            "53048e2681941ef99b2e29b76b4c7dae244fc3befe9b38f14b4362e1cb1ab3eb"
        );
    }

    #[test]
    fn test_sha512_256_two_block_message() {
        let hash = sha512_256(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn\
              hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
        );
        assert_eq!(
            hex::encode(hash),
            "3928e184fb8690f840da3988121d31be65cb9d3ef83ee6146feac861e19b563a"
        );
    }

    #[test]
    fn test_concat_matches_flat() {
        let flat = sha512_256(b"one two three");
        let parts = sha512_256_concat(&[b"one ", b"two ", b"three"]);
        assert_eq!(flat, parts);
    }
}
