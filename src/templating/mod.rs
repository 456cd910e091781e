//! Resource rendering context for package templates.
//!
//! When a package is installed, its configuration resources are rendered
//! from templates. This module computes the variables those templates see.
//!
//! - [`context`] - [`ResourceContext`], merging layout, cluster
//!   configuration, package identity and extra values into [`ContextItems`]
//! - [`address`] - lazy, memoized detection of the local private address
//! - [`escape`] - identity and JSON-string escaping of item values
//! - [`renderer`] - rendering a Tera template with a set of items
//!
//! # Example
//!
//! ```rust,no_run
//! use panda_ctx::core::InstallLayout;
//! use panda_ctx::models::ClusterConfig;
//! use panda_ctx::templating::{ResourceContext, render_template};
//!
//! # fn example() -> anyhow::Result<()> {
//! let ctx = ResourceContext::new()
//!     .with_layout(InstallLayout::new(r"C:\d2iq\dcos"))
//!     .with_cluster_conf(ClusterConfig::new());
//!
//! // Runs the detection script once to fill `local_priv_ipaddr`.
//! let items = ctx.get_items(true)?;
//! let rendered = render_template(r#"{"zk": "{{ master_location }}"}"#, &items)?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod context;
pub mod escape;
pub mod renderer;

pub use address::{CommandOutput, CommandRunner, LocalAddress, SystemCommandRunner};
pub use context::{ContextItems, ResourceContext, context_checksum};
pub use escape::{Escaper, Identity, JsonString, escaper_for};
pub use renderer::{render_template, to_tera_context};
