//! Test fixtures for creating sample context sources
//!
//! Builders for cluster configurations, extra values and context
//! configuration files used across unit and integration tests.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ClusterConfig;

/// Cluster with two master nodes and no discovery section.
///
/// `master-node-1` is `10.0.0.1` on the default port, `master-node-2` is
/// `10.0.0.2` on port `2182`.
pub fn two_master_cluster() -> ClusterConfig {
    ClusterConfig::new()
        .with("master-node-1", "privateipaddr", "10.0.0.1")
        .with("master-node-2", "privateipaddr", "10.0.0.2")
        .with("master-node-2", "zookeeperclientport", "2182")
}

/// Extra values map from string pairs.
pub fn extra_values(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string()))).collect()
}

/// Test fixture for context configuration files
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
    pub name: String,
}

impl ConfigFixture {
    /// Full configuration: layout, package, two masters, static discovery
    /// and a local address override (so no detection command runs).
    pub fn full(root: &Path) -> Self {
        Self {
            name: "full".to_string(),
            content: format!(
                r#"
[layout]
root = "{}"

[package]
id = "mesos--1.14.0"

[cluster.master-node-1]
privateipaddr = "10.0.0.1"
zookeeperclientport = 2181

[cluster.master-node-2]
privateipaddr = "10.0.0.2"

[cluster.discovery]
type = "static"

[extra]
privateipaddr = "10.0.0.5"
"#,
                toml_path(root)
            )
            .trim()
            .to_string(),
        }
    }

    /// Cluster configuration only, without a local address override.
    pub fn cluster_only() -> Self {
        Self {
            name: "cluster_only".to_string(),
            content: r#"
[cluster.master-node-1]
privateipaddr = "10.0.0.1"
"#
            .trim()
            .to_string(),
        }
    }

    /// Configuration with invalid TOML syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[layout
root = "/opt/dcos"
"#
            .trim()
            .to_string(),
        }
    }

    /// Writes the fixture as `<dir>/<name>.toml` and returns its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Path as a TOML basic-string body (backslashes escaped).
fn toml_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\")
}
