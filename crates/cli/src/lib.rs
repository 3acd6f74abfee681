//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Resolving keys to their owning node
//! - Measuring key distribution across members
//! - Measuring churn caused by a single membership change

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
