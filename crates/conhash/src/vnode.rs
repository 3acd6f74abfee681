//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single position on the ring, each
//! node occupies `replicas` positions. This provides:
//!
//! 1. **Better Load Distribution**: more positions, smoother distribution of keys
//! 2. **Bounded Rebalancing**: a node joining or leaving moves about `R/T` of
//!    the keys (`R` its replicas, `T` all replicas on the ring)
//!
//! Each position is the partitioner output for a deterministic label,
//! `"{ident}-{index:03}"`. Removal recomputes the same labels, so the format
//! must never change for a ring whose membership is replayed across restarts.

use crate::node::Node;
use std::fmt;
use std::sync::Arc;

/// An occupied position on the hash ring.
#[derive(Clone, Debug)]
pub struct VirtualNode {
    /// Position on the ring.
    pub position: u64,
    /// The physical node that owns this position.
    pub node: Arc<Node>,
}

impl VirtualNode {
    /// Label hashed to place virtual position `index` of the node `ident`.
    ///
    /// ```rust
    /// use conhash::VirtualNode;
    ///
    /// assert_eq!(VirtualNode::label("node-a", 0), "node-a-000");
    /// assert_eq!(VirtualNode::label("node-a", 42), "node-a-042");
    /// ```
    #[inline]
    pub fn label(ident: &str, index: usize) -> String {
        format!("{}-{:03}", ident, index)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(position={:016x}, node={})", self.position, self.node)
    }
}
