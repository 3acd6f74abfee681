//! Subcommands and their printable results.

use crate::config::parse_node_spec;
use anyhow::Context;
use clap::Subcommand;
use conhash::{HashRing, Node, NodeSpec};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve keys to the node that owns them
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Share of sampled keys owned by each node
    Distribution {
        #[arg(short, long, default_value_t = 100_000)]
        samples: usize,
    },
    /// Fraction of sampled keys that move after one membership change
    Churn {
        /// Node joining the ring
        #[arg(
            long,
            value_name = "IDENT[=REPLICAS]",
            value_parser = parse_node_spec,
            conflicts_with = "remove",
            required_unless_present = "remove"
        )]
        add: Option<NodeSpec>,
        /// Identity leaving the ring
        #[arg(long, value_name = "IDENT")]
        remove: Option<String>,
        #[arg(short, long, default_value_t = 100_000)]
        samples: usize,
    },
    /// List members and the positions they occupy
    Nodes,
}

/// Key resolved by `lookup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub key: String,
    pub position: u64,
    pub ident: String,
}

/// Member listed by `nodes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub ident: String,
    pub requested: usize,
    /// Positions actually held; lower than `requested` after collisions.
    pub placed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Lookup(Vec<Placement>),
    Distribution {
        samples: usize,
        owned: BTreeMap<String, usize>,
    },
    Churn {
        change: String,
        samples: usize,
        moved: usize,
    },
    Nodes(Vec<Membership>),
}

fn sample_key(i: usize) -> String {
    format!("key-{}", i)
}

fn owners(ring: &HashRing, samples: usize) -> anyhow::Result<Vec<Arc<Node>>> {
    (0..samples)
        .map(|i| ring.lookup(sample_key(i)).context("sampling ring"))
        .collect()
}

impl Command {
    /// Runs the command. `churn` mutates `ring`.
    pub fn execute(&self, ring: &HashRing, default_replicas: usize) -> anyhow::Result<CommandResult> {
        match self {
            Command::Lookup { keys } => {
                let placements = keys
                    .iter()
                    .map(|key| -> anyhow::Result<Placement> {
                        let node = ring
                            .lookup(key)
                            .with_context(|| format!("looking up {:?}", key))?;
                        Ok(Placement {
                            key: key.clone(),
                            position: ring.key_position(key),
                            ident: node.ident().to_string(),
                        })
                    })
                    .collect::<anyhow::Result<_>>()?;
                Ok(CommandResult::Lookup(placements))
            }
            Command::Distribution { samples } => {
                let mut owned: BTreeMap<String, usize> = ring
                    .nodes()
                    .iter()
                    .map(|n| (n.ident().to_string(), 0))
                    .collect();
                for node in owners(ring, *samples)? {
                    *owned.entry(node.ident().to_string()).or_default() += 1;
                }
                Ok(CommandResult::Distribution {
                    samples: *samples,
                    owned,
                })
            }
            Command::Churn {
                add,
                remove,
                samples,
            } => {
                let before = owners(ring, *samples)?;
                let change = match (add, remove) {
                    (Some(spec), _) => {
                        let replicas = spec.replicas.unwrap_or(default_replicas);
                        ring.try_add_node(Arc::new(Node::new(spec.ident.clone(), replicas)))
                            .with_context(|| format!("adding {}", spec.ident))?;
                        format!("add {} ({} replicas)", spec.ident, replicas)
                    }
                    (None, Some(ident)) => {
                        ring.try_remove_node_by_ident(ident)
                            .with_context(|| format!("removing {}", ident))?;
                        format!("remove {}", ident)
                    }
                    (None, None) => anyhow::bail!("churn needs --add or --remove"),
                };
                let after = owners(ring, *samples)?;
                let moved = before
                    .iter()
                    .zip(&after)
                    .filter(|(b, a)| !Arc::ptr_eq(*b, *a))
                    .count();
                Ok(CommandResult::Churn {
                    change,
                    samples: *samples,
                    moved,
                })
            }
            Command::Nodes => {
                let mut placed: BTreeMap<String, usize> = BTreeMap::new();
                for vnode in ring.vnodes() {
                    *placed.entry(vnode.node.ident().to_string()).or_default() += 1;
                }
                let members = ring
                    .nodes()
                    .iter()
                    .map(|n| Membership {
                        ident: n.ident().to_string(),
                        requested: n.replicas(),
                        placed: placed.get(n.ident()).copied().unwrap_or(0),
                    })
                    .collect();
                Ok(CommandResult::Nodes(members))
            }
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Lookup(placements) => {
                for p in placements {
                    writeln!(f, "{}\t{:016x}\t{}", p.key, p.position, p.ident)?;
                }
                Ok(())
            }
            CommandResult::Distribution { samples, owned } => {
                for (ident, count) in owned {
                    writeln!(f, "{}\t{}\t{:.2}%", ident, count, percent(*count, *samples))?;
                }
                Ok(())
            }
            CommandResult::Churn {
                change,
                samples,
                moved,
            } => writeln!(
                f,
                "{}: {} of {} keys moved ({:.2}%)",
                change,
                moved,
                samples,
                percent(*moved, *samples)
            ),
            CommandResult::Nodes(members) => {
                for m in members {
                    writeln!(f, "{}\t{}/{}", m.ident, m.placed, m.requested)?;
                }
                Ok(())
            }
        }
    }
}
