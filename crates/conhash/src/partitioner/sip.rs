//! SipHash-1-3 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Keyed SipHash partitioner.
///
/// Keys are fixed at construction so positions are stable across processes
/// sharing the same keys. [`SipPartitioner::default`] uses zero keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner {
    k0: u64,
    k1: u64,
}

impl SipPartitioner {
    /// Creates a partitioner with explicit SipHash keys.
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl Partitioner for SipPartitioner {
    fn partition(&self, key: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(self.k0, self.k1);
        hasher.write(key);
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
