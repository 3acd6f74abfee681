//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys (and virtual node labels)
//! into positions that can be placed on the hash ring.

pub mod md5;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use self::md5::Md5Partitioner;
pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;

use crate::error::RingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in partitioners, selectable by name from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionerKind {
    /// [`Md5Partitioner`]
    #[default]
    Md5,
    /// [`Xxh3Partitioner`]
    Xxh3,
    /// [`SipPartitioner`] with zero keys
    Sip,
}

impl PartitionerKind {
    /// Instantiates the partitioner.
    pub fn build(self) -> Arc<dyn Partitioner> {
        match self {
            PartitionerKind::Md5 => Arc::new(Md5Partitioner),
            PartitionerKind::Xxh3 => Arc::new(Xxh3Partitioner),
            PartitionerKind::Sip => Arc::new(SipPartitioner::default()),
        }
    }
}

impl FromStr for PartitionerKind {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(PartitionerKind::Md5),
            "xxh3" => Ok(PartitionerKind::Xxh3),
            "sip" | "siphash" => Ok(PartitionerKind::Sip),
            _ => Err(RingError::UnknownPartitioner(s.to_string())),
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartitionerKind::Md5 => "md5",
            PartitionerKind::Xxh3 => "xxh3",
            PartitionerKind::Sip => "sip",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("md5".parse::<PartitionerKind>(), Ok(PartitionerKind::Md5));
        assert_eq!("XXH3".parse::<PartitionerKind>(), Ok(PartitionerKind::Xxh3));
        assert_eq!("siphash".parse::<PartitionerKind>(), Ok(PartitionerKind::Sip));
        assert_eq!(
            "crc32".parse::<PartitionerKind>(),
            Err(RingError::UnknownPartitioner("crc32".to_string()))
        );
    }

    #[test]
    fn test_kind_builds_named_partitioner() {
        assert_eq!(PartitionerKind::Md5.build().name(), "Md5Partitioner");
        assert_eq!(PartitionerKind::Xxh3.build().name(), "Xxh3Partitioner");
        assert_eq!(PartitionerKind::Sip.build().name(), "SipPartitioner");
    }

    #[test]
    fn test_closure_partitioner() {
        let p = |key: &[u8]| key.len() as u64;
        assert_eq!(p.partition(b"abcd"), 4);
        assert_eq!(Partitioner::name(&p), "CustomPartitioner");
    }
}
