//! Consistent hash ring implementation.
//!
//! The ring manages virtual node positions and provides efficient lookup
//! operations for finding nodes responsible for keys.

pub mod builder;
pub mod ring;

pub use builder::{RingBuilder, DEFAULT_REPLICAS};
pub use ring::HashRing;

/// Alias for the main ring type (used by lib.rs).
pub type Ring = HashRing;
