//! Cluster-wide setup parameters
//!
//! The cluster configuration is a two-level structure: named sections, each
//! a flat map of option names to string values. Section order is preserved
//! exactly as supplied, because the master location derived from it lists
//! master nodes in that order.
//!
//! ```toml
//! [master-node-1]
//! privateipaddr = "10.0.0.1"
//! zookeeperclientport = 2181
//!
//! [discovery]
//! type = "static"
//! ```
//!
//! Non-string scalars (such as the port above) are kept in their textual
//! form.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_PRIV_IPADDR, DISCOVERY_SECTION, DISCOVERY_TYPE_KEY, MASTER_NODE_SECTION_PREFIX,
    PRIV_IPADDR_KEY, ZK_CLIENTPORT_DFT, ZK_CLIENTPORT_KEY,
};
use crate::utils::value_to_string;

/// Options of a single configuration section.
pub type Section = IndexMap<String, String>;

/// Ordered cluster configuration: section name → option → value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClusterConfig {
    sections: IndexMap<String, Section>,
}

/// Connection parameters of one master node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterNode {
    /// Private IP address of the node
    pub priv_ipaddr: String,
    /// ZooKeeper client port of the node
    pub zk_client_port: String,
}

impl MasterNode {
    /// `address:port` form used in master locations.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.priv_ipaddr, self.zk_client_port)
    }
}

impl Default for MasterNode {
    fn default() -> Self {
        Self {
            priv_ipaddr: DEFAULT_PRIV_IPADDR.to_string(),
            zk_client_port: ZK_CLIENTPORT_DFT.to_string(),
        }
    }
}

impl ClusterConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `option` in `section`, creating the section if needed.
    ///
    /// New sections are appended after the existing ones.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections.entry(section.into()).or_default().insert(option.into(), value.into());
    }

    /// Builder form of [`ClusterConfig::insert`].
    #[must_use]
    pub fn with(
        mut self,
        section: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(section, option, value);
        self
    }

    /// Section names in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Looks up an option value.
    ///
    /// Option names are matched case-insensitively, as in INI files; an
    /// exact match wins over a case-folded one.
    #[must_use]
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        let options = self.sections.get(section)?;
        options
            .get(option)
            .or_else(|| {
                options.iter().find(|(k, _)| k.eq_ignore_ascii_case(option)).map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Master nodes from every `master-node*` section, in section order.
    ///
    /// Missing options fall back to `127.0.0.1` and the default ZooKeeper
    /// client port.
    #[must_use]
    pub fn master_nodes(&self) -> Vec<MasterNode> {
        self.sections()
            .filter(|name| name.starts_with(MASTER_NODE_SECTION_PREFIX))
            .map(|name| MasterNode {
                priv_ipaddr: self
                    .get(name, PRIV_IPADDR_KEY)
                    .unwrap_or(DEFAULT_PRIV_IPADDR)
                    .to_string(),
                zk_client_port: self
                    .get(name, ZK_CLIENTPORT_KEY)
                    .unwrap_or(ZK_CLIENTPORT_DFT)
                    .to_string(),
            })
            .collect()
    }

    /// Value of `discovery.type`, matched exactly.
    #[must_use]
    pub fn discovery_type(&self) -> Option<&str> {
        self.sections.get(DISCOVERY_SECTION)?.get(DISCOVERY_TYPE_KEY).map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for ClusterConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: IndexMap<String, IndexMap<String, serde_json::Value>> =
            IndexMap::deserialize(deserializer)?;

        let sections = raw
            .into_iter()
            .map(|(name, options)| {
                let options =
                    options.into_iter().map(|(k, v)| (k, value_to_string(&v))).collect();
                (name, options)
            })
            .collect();

        Ok(Self {
            sections,
        })
    }
}
