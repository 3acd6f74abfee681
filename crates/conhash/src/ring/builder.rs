//! Builder for populating a ring from a membership list.

use crate::error::Result;
use crate::node::Node;
use crate::partitioner::{Md5Partitioner, Partitioner, PartitionerKind};
use crate::ring::ring::HashRing;
use std::sync::Arc;

/// Replica count used for nodes added without an explicit one.
pub const DEFAULT_REPLICAS: usize = 256;

enum Pending {
    Named { ident: String, replicas: Option<usize> },
    Shared(Arc<Node>),
}

/// Builds a [`HashRing`] by replaying a membership list in order.
///
/// Nodes added by name take the builder's default replica count, resolved at
/// [`RingBuilder::build`] time, so `with_replicas` may come before or after
/// the nodes it applies to.
///
/// ```rust
/// use conhash::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_replicas(8)
///     .node("node1")
///     .node_with_replicas("node2", 16)
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.node_count(), 2);
/// assert!(ring.lookup("key").is_ok());
/// ```
pub struct RingBuilder {
    partitioner: Arc<dyn Partitioner>,
    replicas: usize,
    pending: Vec<Pending>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            partitioner: Arc::new(Md5Partitioner),
            replicas: DEFAULT_REPLICAS,
            pending: Vec::new(),
        }
    }

    pub fn with_partitioner<P: Partitioner>(mut self, partitioner: P) -> Self {
        self.partitioner = Arc::new(partitioner);
        self
    }

    pub fn with_partitioner_kind(mut self, kind: PartitionerKind) -> Self {
        self.partitioner = kind.build();
        self
    }

    /// Default replica count for nodes added by name.
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn node(mut self, ident: impl Into<String>) -> Self {
        self.pending.push(Pending::Named {
            ident: ident.into(),
            replicas: None,
        });
        self
    }

    pub fn node_with_replicas(mut self, ident: impl Into<String>, replicas: usize) -> Self {
        self.pending.push(Pending::Named {
            ident: ident.into(),
            replicas: Some(replicas),
        });
        self
    }

    /// Adds a caller-owned node; keep the `Arc` to remove it later.
    pub fn add_node(mut self, node: Arc<Node>) -> Self {
        self.pending.push(Pending::Shared(node));
        self
    }

    /// Builds the ring.
    ///
    /// # Errors
    ///
    /// The first error returned by [`HashRing::try_add_node`], typically a
    /// duplicate identity in the membership list.
    pub fn build(self) -> Result<HashRing> {
        let ring = HashRing::with_shared_partitioner(self.partitioner);
        for pending in self.pending {
            let node = match pending {
                Pending::Named { ident, replicas } => {
                    Arc::new(Node::new(ident, replicas.unwrap_or(self.replicas)))
                }
                Pending::Shared(node) => node,
            };
            ring.try_add_node(node)?;
        }
        Ok(ring)
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RingError;

    #[test]
    fn test_builder_default_replicas() {
        let ring = RingBuilder::new().node("node1").node("node2").build().unwrap();
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.get_node("node1").unwrap().replicas(), DEFAULT_REPLICAS);
        assert_eq!(ring.partitioner_name(), "Md5Partitioner");
    }

    #[test]
    fn test_builder_replicas_applied_late() {
        let ring = RingBuilder::new()
            .node("node1")
            .with_replicas(4)
            .node_with_replicas("node2", 8)
            .build()
            .unwrap();
        assert_eq!(ring.get_node("node1").unwrap().replicas(), 4);
        assert_eq!(ring.get_node("node2").unwrap().replicas(), 8);
        assert_eq!(ring.position_count(), 12);
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = RingBuilder::new().node("a").node("a").build().unwrap_err();
        assert_eq!(err, RingError::DuplicateIdentity("a".to_string()));
    }

    #[test]
    fn test_builder_shared_node_removable() {
        let node = Arc::new(Node::new("x", 4));
        let ring = RingBuilder::new()
            .with_partitioner_kind(PartitionerKind::Xxh3)
            .add_node(Arc::clone(&node))
            .build()
            .unwrap();
        assert_eq!(ring.partitioner_name(), "Xxh3Partitioner");
        assert!(ring.remove_node(&node));
        assert!(ring.is_empty());
    }
}
