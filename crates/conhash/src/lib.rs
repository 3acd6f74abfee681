//! Consistent hashing ring.
//!
//! This crate provides an in-memory index mapping arbitrary keys onto a
//! mutable set of named nodes:
//! - Node value type and virtual node placement
//! - Pluggable partitioners (MD5 fold by default, XXH3, SipHash)
//! - A thread-safe ring with add, remove and clockwise lookup
//! - Builder and serializable config for replaying membership
//!
//! The ring does no replication, persistence or network I/O.

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod vnode;

pub use config::{NodeSpec, RingConfig};
pub use error::{Result, RingError};
pub use node::Node;
pub use partitioner::{Partitioner, PartitionerKind};
pub use ring::{HashRing, Ring, RingBuilder, DEFAULT_REPLICAS};
pub use vnode::VirtualNode;
