//! Keccak-256 hashing.

use alloy_primitives::Keccak256;

/// Compute the Keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    alloy_primitives::keccak256(data).0
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
///
/// Equivalent to hashing the tightly packed concatenation of `parts`.
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(*part);
    }
    hasher.finalize().0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_matches_known_digest() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak_deterministic() {
        assert_eq!(keccak256(b"hello gate"), keccak256(b"hello gate"));
    }

    #[test]
    fn keccak_different_inputs() {
        assert_ne!(keccak256(b"hello"), keccak256(b"world"));
    }

    #[test]
    fn keccak_multi_equivalent() {
        let single = keccak256(b"helloworld");
        let multi = keccak256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }
}
