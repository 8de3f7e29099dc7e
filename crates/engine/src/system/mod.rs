//! Bidding systems: decoded rule trees and the bid trees built from them.

pub mod bid_tree;
pub mod builder;
pub mod rule_node;

pub use bid_tree::{Bid, BidId, BidTree};
pub use builder::build_system;
pub use rule_node::RuleNode;

use crate::error::ConfigError;
use std::fs;
use std::path::Path;

/// Builds a system from its YAML form.
pub fn system_from_yaml(yaml: &str) -> Result<BidTree, ConfigError> {
    let root: RuleNode = serde_yaml::from_str(yaml)?;
    Ok(build_system(&root)?)
}

/// Loads a system file; `.json` files are read as JSON, anything else as YAML.
pub fn load_system(path: &Path) -> Result<BidTree, ConfigError> {
    let content = fs::read_to_string(path)?;
    let root: RuleNode = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    let tree = build_system(&root)?;
    tracing::info!(path = %path.display(), bids = tree.len(), "loaded bidding system");
    Ok(tree)
}
