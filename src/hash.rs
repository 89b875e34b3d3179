//! Key hashing and shard selection
//!
//! The hash is a 32-bit polynomial accumulator (`h = h * 31 + byte`) with
//! wraparound arithmetic. It is intentionally simple: collisions are expected
//! and resolved at the chunk-scan level by comparing the full key against the
//! main data file, so the hash only needs to be cheap, deterministic, and
//! stable between the build and query phases.

/// 32-bit polynomial hash over the key bytes.
pub fn key_hash(key: &[u8]) -> u32 {
    key.iter()
        .fold(0u32, |h, &b| h.wrapping_mul(31).wrapping_add(b as u32))
}

/// Shard id owning the given hash.
pub fn shard_of(hash: u32, chunk_num: u32) -> u32 {
    hash % chunk_num
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(key_hash(b""), 0);
        assert_eq!(key_hash(b"a"), 97);
        assert_eq!(key_hash(b"abc"), 96354);
        assert_eq!(key_hash(b"xyz"), 119193);
    }

    #[test]
    fn test_deterministic() {
        let key = b"some-longer-key-with_punctuation!@#";
        assert_eq!(key_hash(key), key_hash(key));
    }

    #[test]
    fn test_wraparound_does_not_panic() {
        // long high-byte input forces u32 overflow many times over
        let key = vec![0xffu8; 4096];
        let _ = key_hash(&key);
    }

    #[test]
    fn test_shard_in_range() {
        for chunk_num in [1u32, 4, 1000] {
            for key in [&b"abc"[..], b"xyz", b"", b"missing"] {
                assert!(shard_of(key_hash(key), chunk_num) < chunk_num);
            }
        }
    }
}
