//! Serializable ring membership.
//!
//! Ring state is never persisted; a host rebuilds it on startup by replaying
//! its current membership, usually loaded from a file in this shape:
//!
//! ```json
//! {
//!   "partitioner": "md5",
//!   "default_replicas": 160,
//!   "nodes": [
//!     { "ident": "cache-a:11211" },
//!     { "ident": "cache-b:11211", "replicas": 320 }
//!   ]
//! }
//! ```

use crate::error::Result;
use crate::partitioner::PartitionerKind;
use crate::ring::{HashRing, RingBuilder, DEFAULT_REPLICAS};
use serde::{Deserialize, Serialize};

/// One member of the ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub ident: String,
    /// Falls back to [`RingConfig::default_replicas`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<usize>,
}

impl NodeSpec {
    pub fn new(ident: impl Into<String>, replicas: Option<usize>) -> Self {
        Self {
            ident: ident.into(),
            replicas,
        }
    }
}

/// Partitioner choice plus membership list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    #[serde(default)]
    pub partitioner: PartitionerKind,
    #[serde(default = "default_replicas")]
    pub default_replicas: usize,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

fn default_replicas() -> usize {
    DEFAULT_REPLICAS
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            partitioner: PartitionerKind::default(),
            default_replicas: DEFAULT_REPLICAS,
            nodes: Vec::new(),
        }
    }
}

impl RingConfig {
    /// Replays the membership into a fresh ring, in list order.
    pub fn build(&self) -> Result<HashRing> {
        self.nodes
            .iter()
            .fold(
                RingBuilder::new()
                    .with_partitioner_kind(self.partitioner)
                    .with_replicas(self.default_replicas),
                |builder, spec| match spec.replicas {
                    Some(replicas) => builder.node_with_replicas(spec.ident.clone(), replicas),
                    None => builder.node(spec.ident.clone()),
                },
            )
            .build()
    }
}
