//! Core partitioner trait definitions.

/// A partitioner converts keys into positions on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// hashing without synchronization overhead. The ring only relies on
/// determinism (same key, same position) and on a reasonably uniform spread.
///
/// Any `Fn(&[u8]) -> u64` closure is a partitioner, which keeps test rings
/// with hand-picked positions short to write.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a ring position.
    fn partition(&self, key: &[u8]) -> u64;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str {
        "CustomPartitioner"
    }
}

impl<F> Partitioner for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync + 'static,
{
    fn partition(&self, key: &[u8]) -> u64 {
        self(key)
    }
}
