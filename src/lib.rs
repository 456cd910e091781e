//! panda-ctx - resource rendering contexts for Panda package installations
//!
//! While installing a package on a cluster host, Panda renders the package's
//! configuration resources from templates. This crate computes the flat set
//! of variables those templates see, merging four independent sources:
//!
//! - the installation storage layout ([`core::PathLayout`])
//! - the cluster-wide configuration ([`models::ClusterConfig`])
//! - the package identity ([`core::PackageIdentity`])
//! - operator-supplied extra values
//!
//! The host's private IP address is resolved lazily, at most once per
//! context, either from the extra values or by running a detection script.
//!
//! # Modules
//!
//! - [`templating`] - the context engine, escaping, address resolution and rendering
//! - [`core`] - errors, installation layout and package identity
//! - [`models`] - cluster configuration
//! - [`config`] - the TOML context configuration file
//! - [`cli`] - the `panda-ctx` command-line interface
//! - [`utils`] - platform helpers
//! - [`constants`] - item names, configuration keys and defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use panda_ctx::core::{InstallLayout, PackageId};
//! use panda_ctx::models::ClusterConfig;
//! use panda_ctx::templating::ResourceContext;
//!
//! # fn example() -> anyhow::Result<()> {
//! let ctx = ResourceContext::new()
//!     .with_layout(InstallLayout::new(r"C:\d2iq\dcos"))
//!     .with_cluster_conf(
//!         ClusterConfig::new()
//!             .with("master-node-1", "privateipaddr", "10.0.0.1")
//!             .with("master-node-2", "privateipaddr", "10.0.0.2"),
//!     )
//!     .with_package("mesos--1.14.0".parse::<PackageId>()?);
//!
//! for (name, value) in ctx.get_items(false)? {
//!     println!("{name} = {value}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
