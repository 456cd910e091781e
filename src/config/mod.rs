//! Context configuration file.
//!
//! The CLI assembles a [`ResourceContext`] from a TOML file describing the
//! four context sources. Every table is optional; a missing table means the
//! corresponding source is absent.
//!
//! ```toml
//! [layout]
//! root = "C:/d2iq/dcos"   # ~ and environment variables are expanded
//! log = "D:/logs"         # any storage node may be relocated
//!
//! [package]
//! id = "mesos--1.14.0"
//!
//! [cluster.master-node-1]
//! privateipaddr = "10.0.0.1"
//! zookeeperclientport = 2181
//!
//! [cluster.discovery]
//! type = "static"
//!
//! [extra]
//! privateipaddr = "10.0.0.9"
//! ```
//!
//! # Location
//!
//! 1. `--config <path>` or the `PANDA_CONFIG` environment variable
//! 2. `<config_dir>/panda/context.toml`, if it exists
//!
//! Without a file the CLI starts from an empty configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{ContextError, InstallLayout, PackageId, StorageNode};
use crate::models::ClusterConfig;
use crate::templating::ResourceContext;
use crate::utils::platform::{default_config_path, resolve_path};

/// Installation layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Installation root
    pub root: String,
    /// Shared configuration directory
    pub cfg: Option<String>,
    /// Work directory
    pub work: Option<String>,
    /// Runtime data directory
    pub run: Option<String>,
    /// Log directory
    pub log: Option<String>,
    /// Temporary directory
    pub tmp: Option<String>,
    /// Executables directory
    pub bin: Option<String>,
    /// Shared libraries directory
    pub lib: Option<String>,
    /// Package repository directory
    pub pkgrepo: Option<String>,
}

impl LayoutConfig {
    /// Builds the layout, expanding `~` and environment variables.
    pub fn to_layout(&self) -> Result<InstallLayout> {
        let mut layout = InstallLayout::new(resolve_path(&self.root)?);

        let relocated = [
            (StorageNode::Cfg, &self.cfg),
            (StorageNode::Work, &self.work),
            (StorageNode::Run, &self.run),
            (StorageNode::Log, &self.log),
            (StorageNode::Tmp, &self.tmp),
            (StorageNode::Bin, &self.bin),
            (StorageNode::Lib, &self.lib),
            (StorageNode::PkgRepo, &self.pkgrepo),
        ];
        for (node, path) in relocated {
            if let Some(path) = path {
                layout = layout.with_node(node, resolve_path(path)?);
            }
        }

        Ok(layout)
    }
}

/// Package settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Canonical package id
    pub id: PackageId,
}

/// Parsed context configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Installation layout
    pub layout: Option<LayoutConfig>,
    /// Package identity
    pub package: Option<PackageConfig>,
    /// Cluster configuration sections
    pub cluster: Option<ClusterConfig>,
    /// Extra values
    pub extra: Option<Map<String, Value>>,
}

impl ContextConfig {
    /// Path of the configuration file to use, if any.
    ///
    /// An explicit path is always returned (and must exist when loaded);
    /// the default location only when the file exists.
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(|| default_config_path().filter(|p| p.exists()))
    }

    /// Loads the located configuration, or an empty one if there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No context configuration file found, starting empty");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Read failures keep their I/O error; syntax and schema problems are
    /// reported as [`ContextError::ConfigError`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context configuration from {}", path.display()))?;

        let config = toml::from_str(&content).map_err(|e| ContextError::ConfigError {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        debug!("Loaded context configuration from {}", path.display());
        Ok(config)
    }

    /// Builds a resource context from the configured sources.
    pub fn into_context(self) -> Result<ResourceContext> {
        let mut ctx = ResourceContext::new();

        if let Some(layout) = &self.layout {
            ctx = ctx.with_layout(layout.to_layout()?);
        }
        if let Some(cluster) = self.cluster {
            ctx = ctx.with_cluster_conf(cluster);
        }
        if let Some(package) = self.package {
            ctx = ctx.with_package(package.id);
        }
        if let Some(extra) = self.extra {
            ctx = ctx.with_extra_values(extra);
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PathLayout;
    use crate::test_utils::ConfigFixture;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_fixture() {
        let temp = TempDir::new().unwrap();
        let path = ConfigFixture::full(Path::new("/opt/dcos")).write_to(temp.path()).unwrap();

        let config = ContextConfig::load_from(&path).unwrap();
        assert_eq!(config.layout.as_ref().unwrap().root, "/opt/dcos");
        assert_eq!(config.package.as_ref().unwrap().id.to_string(), "mesos--1.14.0");

        let cluster = config.cluster.as_ref().unwrap();
        assert_eq!(cluster.sections().collect::<Vec<_>>(), vec![
            "master-node-1",
            "master-node-2",
            "discovery"
        ]);
        assert_eq!(cluster.get("master-node-1", "zookeeperclientport"), Some("2181"));
        assert_eq!(config.extra.as_ref().unwrap()["privateipaddr"], "10.0.0.5");
    }

    #[test]
    fn test_full_fixture_into_context() {
        let temp = TempDir::new().unwrap();
        let path = ConfigFixture::full(Path::new("/opt/dcos")).write_to(temp.path()).unwrap();

        let ctx = ContextConfig::load_from(&path).unwrap().into_context().unwrap();
        let items = ctx.get_items(false).unwrap();

        assert_eq!(items["master_location"], "10.0.0.1:2181");
        assert_eq!(items["local_priv_ipaddr"], "10.0.0.5");
        assert!(items.contains_key("pkg_inst_dpath"));
    }

    #[test]
    fn test_invalid_syntax_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = ConfigFixture::invalid_syntax().write_to(temp.path()).unwrap();

        let err = ContextConfig::load_from(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ContextError>(), Some(ContextError::ConfigError { .. })));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("context.toml");
        fs::write(&path, "[layuot]\nroot = \"/opt\"\n").unwrap();

        assert!(ContextConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_invalid_package_id_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("context.toml");
        fs::write(&path, "[package]\nid = \"mesos\"\n").unwrap();

        let err = ContextConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid context configuration"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        assert!(ContextConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_layout_relocation() {
        let layout = LayoutConfig {
            root: "/opt/dcos".to_string(),
            log: Some("/var/log/dcos".to_string()),
            ..LayoutConfig::default()
        }
        .to_layout()
        .unwrap();

        assert_eq!(layout.log(), Path::new("/var/log/dcos"));
        assert_eq!(layout.cfg(), Path::new("/opt/dcos/conf"));
    }

    #[test]
    fn test_empty_config_builds_empty_context() {
        let ctx = ContextConfig::default().into_context().unwrap();
        assert!(ctx.get_items(false).unwrap().is_empty());
        assert!(ctx.extra_values().is_none());
    }
}
