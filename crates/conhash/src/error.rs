//! Error types for the ring.

use thiserror::Error;

/// Result type alias for ring operations.
pub type Result<T> = std::result::Result<T, RingError>;

/// Errors that can occur when mutating or querying a [`HashRing`](crate::HashRing).
///
/// Every variant describes a membership mismatch or a contract violation by
/// the caller. The search itself cannot fail on a non-empty ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// A node with this identity is already registered.
    #[error("node {0:?} is already registered")]
    DuplicateIdentity(String),
    /// No node is registered under this identity.
    #[error("no node registered as {0:?}")]
    UnknownIdentity(String),
    /// The identity is registered, but to a different node instance.
    #[error("identity {0:?} belongs to a different node")]
    IdentityMismatch(String),
    /// Lookup on a ring with no occupied positions.
    #[error("ring is empty")]
    EmptyRing,
    /// A node must occupy at least one virtual position.
    #[error("node {0:?} has zero replicas")]
    InvalidReplicaCount(String),
    /// Partitioner name not recognised by configuration parsing.
    #[error("unknown partitioner {0:?}")]
    UnknownPartitioner(String),
}
