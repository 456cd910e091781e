//! Global constants used throughout the panda-ctx codebase.
//!
//! This module collects the well-known context item names, cluster
//! configuration keys and fallback values shared by the retrievers, so the
//! literal strings live in exactly one place.

/// Fallback private IP address for master nodes lacking `privateipaddr`.
pub const DEFAULT_PRIV_IPADDR: &str = "127.0.0.1";

/// Default ZooKeeper client port used when a master node omits
/// `zookeeperclientport`.
pub const ZK_CLIENTPORT_DFT: &str = "2181";

/// Name prefix of cluster configuration sections describing master nodes.
pub const MASTER_NODE_SECTION_PREFIX: &str = "master-node";

/// Cluster configuration section holding discovery settings.
pub const DISCOVERY_SECTION: &str = "discovery";

/// Key inside [`DISCOVERY_SECTION`] selecting the discovery mode.
pub const DISCOVERY_TYPE_KEY: &str = "type";

/// Discovery mode value meaning "use a fixed master address".
pub const DISCOVERY_TYPE_STATIC: &str = "static";

/// Master node option carrying the node's private IP address.
pub const PRIV_IPADDR_KEY: &str = "privateipaddr";

/// Master node option carrying the ZooKeeper client port.
pub const ZK_CLIENTPORT_KEY: &str = "zookeeperclientport";

/// Extra-values key that short-circuits local address detection.
///
/// Shares its name with the master node option on purpose: operators pass
/// the same `privateipaddr` setting they would write into a node section.
pub const LOCAL_PRIV_IPADDR_OVERRIDE_KEY: &str = "privateipaddr";

/// Environment variable naming the context configuration file.
pub const CONFIG_PATH_ENV: &str = "PANDA_CONFIG";

/// Names of the resource rendering context items produced by the retrievers.
pub mod item {
    /// Master node location string consumed by dependent services.
    pub const MASTER_LOCATION: &str = "master_location";
    /// Private IP address of the first master node.
    pub const MASTER_PRIV_IPADDR: &str = "master_priv_ipaddr";
    /// Private IP address of the local host.
    pub const LOCAL_PRIV_IPADDR: &str = "local_priv_ipaddr";
    /// ZooKeeper client port of the first master node.
    pub const ZK_CLIENT_PORT: &str = "zk_client_port";

    /// Installation root directory.
    pub const DCOS_INST_DPATH: &str = "dcos_inst_dpath";
    /// Shared configuration directory.
    pub const DCOS_CFG_DPATH: &str = "dcos_cfg_dpath";
    /// Work directory.
    pub const DCOS_WORK_DPATH: &str = "dcos_work_dpath";
    /// Runtime data directory.
    pub const DCOS_RUN_DPATH: &str = "dcos_run_dpath";
    /// Log directory.
    pub const DCOS_LOG_DPATH: &str = "dcos_log_dpath";
    /// Temporary directory.
    pub const DCOS_TMP_DPATH: &str = "dcos_tmp_dpath";
    /// Binaries directory.
    pub const DCOS_BIN_DPATH: &str = "dcos_bin_dpath";
    /// Libraries directory.
    pub const DCOS_LIB_DPATH: &str = "dcos_lib_dpath";

    /// Package installation directory inside the package repository.
    pub const PKG_INST_DPATH: &str = "pkg_inst_dpath";
    /// Package log directory.
    pub const PKG_LOG_DPATH: &str = "pkg_log_dpath";
    /// Package runtime data directory.
    pub const PKG_RTD_DPATH: &str = "pkg_rtd_dpath";
    /// Package work directory.
    pub const PKG_WORK_DPATH: &str = "pkg_work_dpath";
    /// Package shared configuration directory.
    pub const PKG_SHRCFG_DPATH: &str = "pkg_shrcfg_dpath";
}
