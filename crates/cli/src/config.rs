//! Command-line configuration.
//!
//! Membership comes from a JSON file (`--membership`), from repeated
//! `--node` flags, or both; flags are appended after the file's nodes.

use crate::commands::Command;
use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use conhash::{NodeSpec, PartitionerKind, RingConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "conhash", version, about = "Inspect key placement on a consistent hash ring")]
pub struct CliConfig {
    /// JSON membership file
    #[arg(short = 'f', long, global = true, value_name = "PATH")]
    pub membership: Option<PathBuf>,

    /// Ring member, repeatable
    #[arg(
        short = 'n',
        long = "node",
        global = true,
        value_name = "IDENT[=REPLICAS]",
        value_parser = parse_node_spec
    )]
    pub nodes: Vec<NodeSpec>,

    /// Hash function: md5, xxh3 or sip
    #[arg(short, long, global = true)]
    pub partitioner: Option<PartitionerKind>,

    /// Replicas for members that do not name their own
    #[arg(short, long, global = true)]
    pub replicas: Option<usize>,

    /// Log ring mutations to stderr (-vv for every skipped position)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Parses `IDENT` or `IDENT=REPLICAS`. Identities may contain `:`.
pub fn parse_node_spec(s: &str) -> Result<NodeSpec, String> {
    match s.rsplit_once('=') {
        Some((ident, replicas)) => {
            let replicas = replicas
                .parse()
                .map_err(|e| format!("invalid replica count {:?}: {}", replicas, e))?;
            if ident.is_empty() {
                return Err("empty node identity".to_string());
            }
            Ok(NodeSpec::new(ident, Some(replicas)))
        }
        None if s.is_empty() => Err("empty node identity".to_string()),
        None => Ok(NodeSpec::new(s, None)),
    }
}

impl CliConfig {
    /// Merges the membership file and flags.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.membership {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading membership file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing membership file {}", path.display()))?
            }
            None => RingConfig::default(),
        };

        if let Some(partitioner) = self.partitioner {
            config.partitioner = partitioner;
        }
        if let Some(replicas) = self.replicas {
            config.default_replicas = replicas;
        }
        config.nodes.extend(self.nodes.iter().cloned());

        if config.nodes.is_empty() {
            bail!("no ring members given; use --node or --membership");
        }
        Ok(config)
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.ring_config()?;
        let ring = config.build().context("building ring")?;
        tracing::debug!(?ring, "ring ready");

        let result = self.command.execute(&ring, config.default_replicas)?;
        println!("{}", result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_node_spec() {
        assert_eq!(parse_node_spec("a"), Ok(NodeSpec::new("a", None)));
        assert_eq!(
            parse_node_spec("10.0.0.1:11211=64"),
            Ok(NodeSpec::new("10.0.0.1:11211", Some(64)))
        );
        assert!(parse_node_spec("a=lots").is_err());
        assert!(parse_node_spec("=3").is_err());
        assert!(parse_node_spec("").is_err());
    }

    #[test]
    fn test_flags_build_config() {
        let cli = CliConfig::try_parse_from([
            "conhash", "-n", "a", "-n", "b=8", "-p", "xxh3", "-r", "4", "nodes",
        ])
        .unwrap();
        let config = cli.ring_config().unwrap();
        assert_eq!(config.partitioner, PartitionerKind::Xxh3);
        assert_eq!(config.default_replicas, 4);
        assert_eq!(
            config.nodes,
            vec![NodeSpec::new("a", None), NodeSpec::new("b", Some(8))]
        );
    }

    #[test]
    fn test_membership_file_then_flags() {
        let path = std::env::temp_dir().join(format!("conhash-cli-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "default_replicas": 12, "nodes": [{{ "ident": "from-file" }}] }}"#).unwrap();

        let cli = CliConfig::try_parse_from([
            "conhash",
            "lookup",
            "--membership",
            path.to_str().unwrap(),
            "--node",
            "from-flag",
            "k1",
        ])
        .unwrap();
        let config = cli.ring_config().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.default_replicas, 12);
        let idents: Vec<_> = config.nodes.iter().map(|n| n.ident.as_str()).collect();
        assert_eq!(idents, vec!["from-file", "from-flag"]);
    }

    #[test]
    fn test_no_members_is_error() {
        let cli = CliConfig::try_parse_from(["conhash", "nodes"]).unwrap();
        assert!(cli.ring_config().is_err());
    }

    #[test]
    fn test_unknown_partitioner_rejected_by_parser() {
        assert!(CliConfig::try_parse_from(["conhash", "-n", "a", "-p", "crc32", "nodes"]).is_err());
    }
}
