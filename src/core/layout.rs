//! Installation storage layout
//!
//! A Panda installation keeps everything under a single root directory split
//! into well-known storage nodes (configuration, work, runtime data, logs,
//! and so on). The context engine only needs to *read* those locations, so it
//! depends on the [`PathLayout`] trait; [`InstallLayout`] is the concrete
//! layout derived from an installation root.
//!
//! # Examples
//!
//! ```rust
//! use panda_ctx::core::{InstallLayout, PathLayout, StorageNode};
//! use std::path::Path;
//!
//! let layout = InstallLayout::new("/opt/dcos").with_node(StorageNode::Log, "/var/log/dcos");
//! assert_eq!(layout.cfg(), Path::new("/opt/dcos/conf"));
//! assert_eq!(layout.log(), Path::new("/var/log/dcos"));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Named storage nodes of an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageNode {
    /// Installation root
    Root,
    /// Shared configuration
    Cfg,
    /// Work data
    Work,
    /// Runtime data
    Run,
    /// Logs
    Log,
    /// Temporary files
    Tmp,
    /// Executables
    Bin,
    /// Shared libraries
    Lib,
    /// Package repository
    PkgRepo,
}

impl StorageNode {
    /// Every node, in the order used for serialization.
    pub const ALL: [StorageNode; 9] = [
        StorageNode::Root,
        StorageNode::Cfg,
        StorageNode::Work,
        StorageNode::Run,
        StorageNode::Log,
        StorageNode::Tmp,
        StorageNode::Bin,
        StorageNode::Lib,
        StorageNode::PkgRepo,
    ];

    /// Directory of this node relative to the installation root.
    #[must_use]
    pub fn default_directory(&self) -> &'static str {
        match self {
            StorageNode::Root => "",
            StorageNode::Cfg => "conf",
            StorageNode::Work => "work",
            StorageNode::Run => "run",
            StorageNode::Log => "var/log",
            StorageNode::Tmp => "tmp",
            StorageNode::Bin => "bin",
            StorageNode::Lib => "lib",
            StorageNode::PkgRepo => "packages",
        }
    }
}

impl std::fmt::Display for StorageNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageNode::Root => write!(f, "root"),
            StorageNode::Cfg => write!(f, "cfg"),
            StorageNode::Work => write!(f, "work"),
            StorageNode::Run => write!(f, "run"),
            StorageNode::Log => write!(f, "log"),
            StorageNode::Tmp => write!(f, "tmp"),
            StorageNode::Bin => write!(f, "bin"),
            StorageNode::Lib => write!(f, "lib"),
            StorageNode::PkgRepo => write!(f, "pkgrepo"),
        }
    }
}

/// Read access to the directories of an installation.
///
/// Implementors only provide [`PathLayout::node`]; the named accessors and
/// [`PathLayout::nodes`] are derived from it.
pub trait PathLayout {
    /// Path of the given storage node.
    fn node(&self, node: StorageNode) -> &Path;

    /// Installation root directory.
    fn root(&self) -> &Path {
        self.node(StorageNode::Root)
    }

    /// Shared configuration directory.
    fn cfg(&self) -> &Path {
        self.node(StorageNode::Cfg)
    }

    /// Work directory.
    fn work(&self) -> &Path {
        self.node(StorageNode::Work)
    }

    /// Runtime data directory.
    fn run(&self) -> &Path {
        self.node(StorageNode::Run)
    }

    /// Log directory.
    fn log(&self) -> &Path {
        self.node(StorageNode::Log)
    }

    /// Temporary directory.
    fn tmp(&self) -> &Path {
        self.node(StorageNode::Tmp)
    }

    /// Executables directory.
    fn bin(&self) -> &Path {
        self.node(StorageNode::Bin)
    }

    /// Shared libraries directory.
    fn lib(&self) -> &Path {
        self.node(StorageNode::Lib)
    }

    /// Package repository directory.
    fn pkgrepo(&self) -> &Path {
        self.node(StorageNode::PkgRepo)
    }

    /// All nodes with their paths, in [`StorageNode::ALL`] order.
    fn nodes(&self) -> Vec<(StorageNode, &Path)> {
        StorageNode::ALL.iter().map(|node| (*node, self.node(*node))).collect()
    }
}

/// Installation layout rooted at a single directory.
///
/// Each node defaults to `root/<default_directory>` and can be relocated
/// individually with [`InstallLayout::with_node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    paths: [PathBuf; 9],
}

impl InstallLayout {
    /// Creates the default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let paths = StorageNode::ALL.map(|node| match node {
            StorageNode::Root => root.clone(),
            other => root.join(other.default_directory()),
        });

        Self {
            paths,
        }
    }

    /// Relocates a single storage node.
    ///
    /// Relocating [`StorageNode::Root`] does not move the other nodes.
    #[must_use]
    pub fn with_node(mut self, node: StorageNode, path: impl Into<PathBuf>) -> Self {
        self.paths[Self::index(node)] = path.into();
        self
    }

    fn index(node: StorageNode) -> usize {
        StorageNode::ALL.iter().position(|n| *n == node).unwrap_or_default()
    }
}

impl PathLayout for InstallLayout {
    fn node(&self, node: StorageNode) -> &Path {
        &self.paths[Self::index(node)]
    }
}
