//! Hash ring data structure.
//!
//! The canonical state is the unordered `position -> node` map. The sorted
//! position vector is derived from it and rebuilt after every membership
//! change, so lookups stay a flat binary search.

use crate::error::{Result, RingError};
use crate::node::Node;
use crate::partitioner::{Md5Partitioner, Partitioner};
use crate::vnode::VirtualNode;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Consistent hash ring mapping keys onto a mutable set of nodes.
///
/// Each node is placed at `replicas` positions on a `u64` ring. A key is owned
/// by the first position clockwise from the key's own position, wrapping to
/// the smallest position past the end.
///
/// All state sits behind a single reader/writer lock: lookups and accessors
/// share it, membership changes hold it exclusively until the sorted index
/// has been rebuilt. Share the ring between threads with `Arc<HashRing>`.
///
/// # Example
///
/// ```rust
/// use conhash::{HashRing, Node};
/// use std::sync::Arc;
///
/// let ring = HashRing::new();
/// let a = Arc::new(Node::new("cache-a", 160));
/// assert!(ring.add_node(Arc::clone(&a)));
/// assert!(!ring.add_node(Arc::new(Node::new("cache-a", 10))));
///
/// let owner = ring.lookup("user:42").unwrap();
/// assert_eq!(owner.ident(), "cache-a");
/// ```
pub struct HashRing {
    partitioner: Arc<dyn Partitioner>,
    state: RwLock<RingState>,
}

#[derive(Default)]
struct RingState {
    /// Ring position -> occupant. First writer wins.
    positions: HashMap<u64, Arc<Node>>,
    /// Identity -> registered node.
    nodes: HashMap<String, Arc<Node>>,
    /// Key set of `positions`, ascending.
    sorted: Vec<u64>,
}

impl RingState {
    fn rebuild(&mut self) {
        self.sorted = self.positions.keys().copied().collect();
        self.sorted.sort_unstable();
    }

    /// Smallest position `>= hash`, wrapping to the first one.
    fn search(&self, hash: u64) -> Option<&Arc<Node>> {
        let idx = self.sorted.partition_point(|&p| p < hash);
        let position = self.sorted.get(idx).or_else(|| self.sorted.first())?;
        self.positions.get(position)
    }
}

impl HashRing {
    /// Creates an empty ring using the default [`Md5Partitioner`].
    pub fn new() -> Self {
        Self::with_partitioner(Md5Partitioner)
    }

    /// Creates an empty ring hashing with `partitioner`.
    pub fn with_partitioner<P: Partitioner>(partitioner: P) -> Self {
        Self::with_shared_partitioner(Arc::new(partitioner))
    }

    /// Creates an empty ring from an already shared partitioner.
    pub fn with_shared_partitioner(partitioner: Arc<dyn Partitioner>) -> Self {
        Self {
            partitioner,
            state: RwLock::new(RingState::default()),
        }
    }

    /// Registers `node`, returning `false` if it was rejected.
    ///
    /// See [`HashRing::try_add_node`] for the rejection reasons.
    pub fn add_node(&self, node: Arc<Node>) -> bool {
        self.try_add_node(node).is_ok()
    }

    /// Registers `node` and places its virtual positions.
    ///
    /// Virtual position `i` is the partitioner output for
    /// [`VirtualNode::label`]`(ident, i)`. A position that is already occupied
    /// keeps its owner and is skipped for this node, so a node may end up with
    /// fewer positions than it asked for.
    ///
    /// # Errors
    ///
    /// - [`RingError::DuplicateIdentity`] if the identity is already registered
    /// - [`RingError::InvalidReplicaCount`] if the node asks for zero positions
    ///
    /// The ring is left untouched on error.
    pub fn try_add_node(&self, node: Arc<Node>) -> Result<()> {
        let mut state = self.state.write();

        if state.nodes.contains_key(node.ident()) {
            return Err(RingError::DuplicateIdentity(node.ident().to_string()));
        }
        if node.replicas() == 0 {
            return Err(RingError::InvalidReplicaCount(node.ident().to_string()));
        }

        let mut placed = 0usize;
        for index in 0..node.replicas() {
            let position = self.vnode_position(node.ident(), index);
            match state.positions.entry(position) {
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&node));
                    placed += 1;
                }
                Entry::Occupied(slot) => {
                    trace!(
                        ident = %node,
                        index,
                        position,
                        owner = %slot.get(),
                        "virtual position already occupied, skipped"
                    );
                }
            }
        }

        state.nodes.insert(node.ident().to_string(), Arc::clone(&node));
        state.rebuild();

        debug!(ident = %node, replicas = node.replicas(), placed, "added node to ring");
        Ok(())
    }

    /// Removes `node`, returning `false` if it was rejected.
    ///
    /// See [`HashRing::try_remove_node`].
    pub fn remove_node(&self, node: &Arc<Node>) -> bool {
        self.try_remove_node(node).is_ok()
    }

    /// Removes `node` and all positions it still occupies.
    ///
    /// The registered node must be the very same `Arc` that is passed in; a
    /// different instance carrying the same identity is refused.
    ///
    /// # Errors
    ///
    /// - [`RingError::UnknownIdentity`] if nothing is registered under the identity
    /// - [`RingError::IdentityMismatch`] if the identity belongs to another instance
    pub fn try_remove_node(&self, node: &Arc<Node>) -> Result<()> {
        let mut state = self.state.write();

        match state.nodes.get(node.ident()) {
            None => return Err(RingError::UnknownIdentity(node.ident().to_string())),
            Some(registered) if !Arc::ptr_eq(registered, node) => {
                return Err(RingError::IdentityMismatch(node.ident().to_string()));
            }
            Some(_) => {}
        }

        self.retract(&mut state, node.ident());
        Ok(())
    }

    /// Removes the node registered as `ident`, returning `false` if unknown.
    pub fn remove_node_by_ident(&self, ident: &str) -> bool {
        self.try_remove_node_by_ident(ident).is_ok()
    }

    /// Removes the node registered as `ident` and returns it.
    ///
    /// # Errors
    ///
    /// [`RingError::UnknownIdentity`] if nothing is registered under `ident`.
    pub fn try_remove_node_by_ident(&self, ident: &str) -> Result<Arc<Node>> {
        let mut state = self.state.write();
        self.retract(&mut state, ident)
            .ok_or_else(|| RingError::UnknownIdentity(ident.to_string()))
    }

    /// Finds the node that owns `key`.
    ///
    /// # Errors
    ///
    /// [`RingError::EmptyRing`] if no position is occupied.
    pub fn lookup(&self, key: impl AsRef<[u8]>) -> Result<Arc<Node>> {
        let hash = self.key_position(key);
        let state = self.state.read();
        state.search(hash).cloned().ok_or(RingError::EmptyRing)
    }

    /// Ring position of `key` under this ring's partitioner.
    pub fn key_position(&self, key: impl AsRef<[u8]>) -> u64 {
        self.partitioner.partition(key.as_ref())
    }

    /// True iff no position is occupied.
    pub fn is_empty(&self) -> bool {
        self.state.read().sorted.is_empty()
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Number of occupied positions.
    pub fn position_count(&self) -> usize {
        self.state.read().sorted.len()
    }

    /// True if a node is registered as `ident`.
    pub fn contains(&self, ident: &str) -> bool {
        self.state.read().nodes.contains_key(ident)
    }

    /// The node registered as `ident`.
    pub fn get_node(&self, ident: &str) -> Option<Arc<Node>> {
        self.state.read().nodes.get(ident).cloned()
    }

    /// All registered nodes, ordered by identity.
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        let mut nodes: Vec<_> = self.state.read().nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.ident().cmp(b.ident()));
        nodes
    }

    /// All occupied positions in ring order.
    pub fn vnodes(&self) -> Vec<VirtualNode> {
        let state = self.state.read();
        state
            .sorted
            .iter()
            .filter_map(|position| {
                state.positions.get(position).map(|node| VirtualNode {
                    position: *position,
                    node: Arc::clone(node),
                })
            })
            .collect()
    }

    /// Name of the partitioner in use.
    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    fn vnode_position(&self, ident: &str, index: usize) -> u64 {
        self.partitioner
            .partition(VirtualNode::label(ident, index).as_bytes())
    }

    /// Unregisters `ident` and frees the positions it still owns.
    /// Caller holds the write lock.
    fn retract(&self, state: &mut RingState, ident: &str) -> Option<Arc<Node>> {
        let node = state.nodes.remove(ident)?;

        let mut freed = 0usize;
        for index in 0..node.replicas() {
            let position = self.vnode_position(ident, index);
            let owned = state
                .positions
                .get(&position)
                .is_some_and(|owner| Arc::ptr_eq(owner, &node));
            if owned {
                state.positions.remove(&position);
                freed += 1;
            }
        }
        state.rebuild();

        debug!(ident = %node, freed, "removed node from ring");
        Some(node)
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("nodes", &state.nodes.len())
            .field("positions", &state.sorted.len())
            .finish()
    }
}
