//! MD5 partitioner, the ring default.

use crate::partitioner::traits::Partitioner;

/// Folds an MD5 digest into a ring position.
///
/// The 16-byte digest is read as four little-endian `u32` words which are
/// summed into a `u64`. Positions therefore stay below `4 * 2^32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Partitioner;

impl Partitioner for Md5Partitioner {
    fn partition(&self, key: &[u8]) -> u64 {
        let digest = ::md5::compute(key);
        digest
            .0
            .chunks_exact(4)
            .map(|word| u64::from(u32::from_le_bytes([word[0], word[1], word[2], word[3]])))
            .sum()
    }

    fn name(&self) -> &'static str {
        "Md5Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_fold_known_values() {
        // d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(Md5Partitioner.partition(b""), 8_397_690_936);
        // 448455d0fe84260a2beff84a2468a2d1
        assert_eq!(Md5Partitioner.partition(b"node-a-000"), 8_440_471_697);
        assert_eq!(Md5Partitioner.partition(b"hello"), 7_596_742_114);
    }

    #[test]
    fn test_md5_fold_bounded() {
        for key in ["a", "b", "some/longer/key", "node-z-999"] {
            assert!(Md5Partitioner.partition(key.as_bytes()) < 4 * (1u64 << 32));
        }
    }
}
