//! Resource rendering context building.
//!
//! A [`ResourceContext`] owns the four optional sources of context data and
//! flattens them into a single [`ContextItems`] map on every
//! [`ResourceContext::get_items`] call. Sources are consulted in a fixed
//! order and later sources overwrite earlier keys:
//!
//! 1. installation storage layout (`dcos_*_dpath`)
//! 2. cluster configuration (`master_location`, `master_priv_ipaddr`,
//!    `local_priv_ipaddr`, `zk_client_port`)
//! 3. package directories (`pkg_*_dpath`, needs layout *and* package id)
//! 4. extra values, verbatim keys, so operators can shadow anything above
//!
//! A missing source contributes nothing. The merged map is never cached, so
//! [`ResourceContext::update`] takes effect on the next retrieval.
//!
//! # Examples
//!
//! ```rust
//! use panda_ctx::core::{InstallLayout, PackageId};
//! use panda_ctx::models::ClusterConfig;
//! use panda_ctx::templating::ResourceContext;
//! use serde_json::{Map, json};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut extra = Map::new();
//! extra.insert("privateipaddr".into(), json!("10.0.0.5"));
//!
//! let ctx = ResourceContext::new()
//!     .with_layout(InstallLayout::new("/opt/dcos"))
//!     .with_cluster_conf(ClusterConfig::new().with("master-node-1", "privateipaddr", "10.0.0.1"))
//!     .with_package("mesos--1.14.0".parse::<PackageId>()?)
//!     .with_extra_values(extra);
//!
//! let items = ctx.get_items(false)?;
//! assert_eq!(items["master_location"], "10.0.0.1:2181");
//! assert_eq!(items["local_priv_ipaddr"], "10.0.0.5");
//! assert_eq!(items["pkg_log_dpath"], "/opt/dcos/var/log/mesos");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use super::address::{CommandRunner, LocalAddress, SystemCommandRunner};
use super::escape::{Escaper, escaper_for};
use crate::constants::{DISCOVERY_TYPE_STATIC, item};
use crate::core::{ContextError, PackageIdentity, PathLayout};
use crate::models::{ClusterConfig, MasterNode};
use crate::utils::{detect_ip_command, value_to_string};

/// Flat resource rendering context: item name → string value.
///
/// Keys keep the order in which they were first produced.
pub type ContextItems = IndexMap<String, String>;

type Retriever = fn(&ResourceContext, &dyn Escaper) -> Result<ContextItems, ContextError>;

/// Resource rendering context manager.
///
/// Meant for a single owner: the memoized local address uses a
/// [`std::cell::OnceCell`], so the type is not `Sync`.
pub struct ResourceContext {
    istor_nodes: Option<Box<dyn PathLayout>>,
    cluster_conf: Option<ClusterConfig>,
    pkg_id: Option<Box<dyn PackageIdentity>>,
    extra_values: Option<Map<String, Value>>,
    local_priv_ipaddr: LocalAddress,
    runner: Box<dyn CommandRunner>,
    detect_ip_command: Vec<String>,
}

impl Default for ResourceContext {
    fn default() -> Self {
        Self {
            istor_nodes: None,
            cluster_conf: None,
            pkg_id: None,
            extra_values: None,
            local_priv_ipaddr: LocalAddress::new(),
            runner: Box::new(SystemCommandRunner),
            detect_ip_command: detect_ip_command().iter().map(ToString::to_string).collect(),
        }
    }
}

impl std::fmt::Debug for ResourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceContext")
            .field("istor_nodes", &self.istor_nodes.as_ref().map(|n| n.root().to_path_buf()))
            .field("cluster_conf", &self.cluster_conf)
            .field("pkg_id", &self.pkg_id.as_ref().map(|p| p.pkg_id().to_string()))
            .field("extra_values", &self.extra_values)
            .field("local_priv_ipaddr", &self.local_priv_ipaddr.get())
            .field("detect_ip_command", &self.detect_ip_command)
            .finish()
    }
}

impl ResourceContext {
    /// Creates a context with no sources, detecting the local address with
    /// the platform command when it is first needed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the installation storage layout.
    #[must_use]
    pub fn with_layout(mut self, layout: impl PathLayout + 'static) -> Self {
        self.istor_nodes = Some(Box::new(layout));
        self
    }

    /// Sets the cluster configuration.
    #[must_use]
    pub fn with_cluster_conf(mut self, cluster_conf: ClusterConfig) -> Self {
        self.cluster_conf = Some(cluster_conf);
        self
    }

    /// Sets the package identity.
    #[must_use]
    pub fn with_package(mut self, pkg_id: impl PackageIdentity + 'static) -> Self {
        self.pkg_id = Some(Box::new(pkg_id));
        self
    }

    /// Sets the extra values; this also enables [`ResourceContext::update`].
    #[must_use]
    pub fn with_extra_values(mut self, extra_values: Map<String, Value>) -> Self {
        self.extra_values = Some(extra_values);
        self
    }

    /// Replaces the runner used for local address detection.
    #[must_use]
    pub fn with_command_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Replaces the local address detection command line.
    #[must_use]
    pub fn with_detect_ip_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.detect_ip_command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Current extra values, if initialized.
    #[must_use]
    pub fn extra_values(&self) -> Option<&Map<String, Value>> {
        self.extra_values.as_ref()
    }

    /// The local private IP address, resolved on first call.
    ///
    /// See [`crate::templating::address`] for the resolution rules. Once
    /// resolved, the value never changes, even if the extra values do.
    pub fn local_priv_ipaddr(&self) -> Result<&str, ContextError> {
        let command: Vec<&str> = self.detect_ip_command.iter().map(String::as_str).collect();
        self.local_priv_ipaddr.get_or_resolve(
            self.extra_values.as_ref(),
            self.runner.as_ref(),
            &command,
        )
    }

    /// Computes the resource rendering context items.
    ///
    /// With `json_ready` every value is escaped as the interior of a JSON
    /// string literal; otherwise values are returned as is. Keys are never
    /// escaped.
    ///
    /// # Errors
    ///
    /// Fails only when cluster configuration is present and the local
    /// address cannot be resolved. No partial result is returned.
    pub fn get_items(&self, json_ready: bool) -> Result<ContextItems, ContextError> {
        let retrievers: [Retriever; 4] = [
            Self::istor_items,
            Self::cluster_conf_items,
            Self::pkg_items,
            Self::extra_items,
        ];
        let escape = escaper_for(json_ready);
        let mut items = ContextItems::new();

        for retriever in retrievers {
            items.extend(retriever(self, escape)?);
        }

        debug!("Computed {} resource rendering context items (json_ready={})", items.len(), json_ready);
        Ok(items)
    }

    /// Merges `values` into the extra values, later values winning.
    ///
    /// # Errors
    ///
    /// [`ContextError::ExtraValuesUninitialized`] if the context was built
    /// without extra values; they are never created implicitly.
    pub fn update<I>(&mut self, values: I) -> Result<(), ContextError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let extra_values =
            self.extra_values.as_mut().ok_or(ContextError::ExtraValuesUninitialized)?;
        extra_values.extend(values);
        Ok(())
    }

    /// Raw, unmerged view of the context sources for logging.
    ///
    /// Layout nodes are rendered as a `name → path` map and the package as
    /// its canonical id; absent sources are `null`.
    #[must_use]
    pub fn as_dict(&self) -> Value {
        let istor_nodes = self.istor_nodes.as_ref().map(|layout| {
            layout
                .nodes()
                .into_iter()
                .map(|(node, path)| (node.to_string(), Value::String(path_string(path))))
                .collect::<Map<String, Value>>()
        });

        json!({
            "istor_nodes": istor_nodes,
            "cluster_conf": self.cluster_conf,
            "pkg_id": self.pkg_id.as_ref().map(|p| p.pkg_id()),
            "extra_values": self.extra_values,
        })
    }

    fn istor_items(&self, escape: &dyn Escaper) -> Result<ContextItems, ContextError> {
        let Some(layout) = self.istor_nodes.as_deref() else {
            return Ok(ContextItems::new());
        };

        let items = [
            (item::DCOS_INST_DPATH, layout.root()),
            (item::DCOS_CFG_DPATH, layout.cfg()),
            (item::DCOS_WORK_DPATH, layout.work()),
            (item::DCOS_RUN_DPATH, layout.run()),
            (item::DCOS_LOG_DPATH, layout.log()),
            (item::DCOS_TMP_DPATH, layout.tmp()),
            (item::DCOS_BIN_DPATH, layout.bin()),
            (item::DCOS_LIB_DPATH, layout.lib()),
        ];

        Ok(items
            .into_iter()
            .map(|(key, path)| (key.to_string(), escape.escape(&path_string(path))))
            .collect())
    }

    fn cluster_conf_items(&self, escape: &dyn Escaper) -> Result<ContextItems, ContextError> {
        let Some(cluster_conf) = self.cluster_conf.as_ref() else {
            return Ok(ContextItems::new());
        };

        let master_nodes = cluster_conf.master_nodes();
        let (master, master_location) = match master_nodes.first() {
            None => {
                warn!("No master node sections in cluster configuration, using defaults");
                let master = MasterNode::default();
                let location = master.location();
                (master, location)
            }
            Some(first) if cluster_conf.discovery_type() == Some(DISCOVERY_TYPE_STATIC) => {
                (first.clone(), first.location())
            }
            Some(first) => {
                let location = master_nodes
                    .iter()
                    .map(|node| escape.escape(&node.location()))
                    .collect::<Vec<_>>()
                    .join(",");
                (first.clone(), location)
            }
        };
        debug!(
            "Master location '{}' derived from {} master node section(s)",
            master_location,
            master_nodes.len()
        );

        let local_priv_ipaddr = self.local_priv_ipaddr()?;

        Ok(ContextItems::from([
            (item::MASTER_LOCATION.to_string(), escape.escape(&master_location)),
            (item::MASTER_PRIV_IPADDR.to_string(), escape.escape(&master.priv_ipaddr)),
            (item::LOCAL_PRIV_IPADDR.to_string(), escape.escape(local_priv_ipaddr)),
            (item::ZK_CLIENT_PORT.to_string(), escape.escape(&master.zk_client_port)),
        ]))
    }

    fn pkg_items(&self, escape: &dyn Escaper) -> Result<ContextItems, ContextError> {
        let (Some(layout), Some(pkg)) = (self.istor_nodes.as_deref(), self.pkg_id.as_deref())
        else {
            return Ok(ContextItems::new());
        };

        let items = [
            (item::PKG_INST_DPATH, layout.pkgrepo().join(pkg.pkg_id())),
            (item::PKG_LOG_DPATH, layout.log().join(pkg.pkg_name())),
            (item::PKG_RTD_DPATH, layout.run().join(pkg.pkg_name())),
            (item::PKG_WORK_DPATH, layout.work().join(pkg.pkg_name())),
            (item::PKG_SHRCFG_DPATH, layout.cfg().join(pkg.pkg_name())),
        ];

        Ok(items
            .into_iter()
            .map(|(key, path)| (key.to_string(), escape.escape(&path_string(&path))))
            .collect())
    }

    fn extra_items(&self, escape: &dyn Escaper) -> Result<ContextItems, ContextError> {
        let Some(extra_values) = self.extra_values.as_ref() else {
            return Ok(ContextItems::new());
        };

        Ok(extra_values
            .iter()
            .map(|(key, value)| (key.clone(), escape.escape(&value_to_string(value))))
            .collect())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Stable digest of a set of context items, independent of key order.
///
/// Returned as `sha256:<hex>`; useful to tell whether re-rendering a
/// package's configuration would change anything.
pub fn context_checksum(items: &ContextItems) -> Result<String> {
    use sha2::{Digest, Sha256};

    let sorted: BTreeMap<&str, &str> =
        items.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let json_str =
        serde_json::to_string(&sorted).context("Failed to serialize context items for digest")?;

    let mut hasher = Sha256::new();
    hasher.update(json_str.as_bytes());
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}
