//! Node abstractions for the consistent hash ring.
//!
//! A node is the backend a key resolves to (a server, a shard, a cache). It is
//! identified by an opaque identity string and occupies `replicas` virtual
//! positions on the ring.

use std::fmt;

/// Logical node participating in the ring.
///
/// Immutable once built. The ring holds nodes as `Arc<Node>` and recognises
/// the same node again by pointer identity, so keep the `Arc` you registered
/// if you intend to remove it with [`HashRing::remove_node`](crate::HashRing::remove_node).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    ident: String,
    replicas: usize,
}

impl Node {
    /// Construct a new node.
    ///
    /// `replicas` is not validated here; the ring rejects zero on registration.
    pub fn new(ident: impl Into<String>, replicas: usize) -> Self {
        Self {
            ident: ident.into(),
            replicas,
        }
    }

    /// Identity under which the node is registered.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Number of virtual positions requested on the ring.
    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let node = Node::new("cache-01:11211", 160);
        assert_eq!(node.ident(), "cache-01:11211");
        assert_eq!(node.replicas(), 160);
    }

    #[test]
    fn test_node_display_is_identity() {
        let node = Node::new("shard-7", 3);
        assert_eq!(node.to_string(), "shard-7");
    }
}
