//! Command-line interface for panda-ctx.
//!
//! The CLI builds a resource rendering context from a configuration file
//! plus command-line overrides and either prints it or renders a template
//! with it.
//!
//! # Commands
//!
//! - [`items`] - print the merged context items (optionally JSON-escaped)
//! - [`dump`] - print the raw, unmerged context sources
//! - [`render`] - render a template file with the context items
//!
//! # Source precedence
//!
//! The configuration file is loaded first (see [`crate::config`]); then
//! `--root` replaces the layout root, `--pkg-id` the package, and every
//! `--set key=value` is merged into the extra values, which can shadow any
//! computed item.
//!
//! ```bash
//! panda-ctx --root C:/d2iq/dcos --pkg-id mesos--1.14.0 --set privateipaddr=10.0.0.5 items
//! panda-ctx --config cluster.toml render mesos.json.tmpl --json-ready -o mesos.json
//! ```

pub mod dump;
pub mod items;
pub mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{ContextConfig, LayoutConfig, PackageConfig};
use crate::constants::CONFIG_PATH_ENV;
use crate::core::PackageId;
use crate::templating::ResourceContext;

/// Runtime settings derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter; `None` disables logging.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Creates a configuration with logging disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Does nothing
    /// when logging is disabled or a subscriber is already installed.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resource rendering context tool for Panda package installations.
#[derive(Parser)]
#[command(
    name = "panda-ctx",
    about = "Compute resource rendering contexts for Panda package installations",
    version,
    long_about = "panda-ctx merges the installation layout, cluster configuration, package identity \
                  and operator overrides into the flat set of variables used to render package \
                  configuration templates."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the context configuration file.
    ///
    /// Defaults to `<config_dir>/panda/context.toml` when that file exists.
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Installation root; replaces `layout.root` from the configuration.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<String>,

    /// Package id (`<name>--<version>`); replaces `package.id`.
    #[arg(long, global = true, value_name = "PKG_ID")]
    pkg_id: Option<PackageId>,

    /// Extra context value, repeatable; shadows computed items.
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_key_val)]
    set: Vec<(String, String)>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the merged resource rendering context items
    Items(items::ItemsCommand),
    /// Print the raw context sources
    Dump(dump::DumpCommand),
    /// Render a template file with the context items
    Render(render::RenderCommand),
}

impl Cli {
    /// Runs the parsed command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translates global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Runs the parsed command with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let ctx = self.build_context()?;
        match self.command {
            Commands::Items(cmd) => cmd.execute(&ctx),
            Commands::Dump(cmd) => cmd.execute(&ctx),
            Commands::Render(cmd) => cmd.execute(&ctx),
        }
    }

    /// Builds the resource context from the configuration file and flags.
    fn build_context(&self) -> Result<ResourceContext> {
        let mut config = ContextConfig::load(self.config.as_deref())?;

        if let Some(root) = &self.root {
            config.layout.get_or_insert_with(LayoutConfig::default).root.clone_from(root);
        }
        if let Some(pkg_id) = &self.pkg_id {
            config.package = Some(PackageConfig {
                id: pkg_id.clone(),
            });
        }
        if !self.set.is_empty() && config.extra.is_none() {
            config.extra = Some(Map::new());
        }

        let mut ctx = config.into_context()?;
        if !self.set.is_empty() {
            ctx.update(self.set.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))))?;
        }

        debug!("Resource context sources: {}", ctx.as_dict());
        Ok(ctx)
    }
}

/// Parses a `KEY=VALUE` pair; the value may itself contain `=`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no '=' or empty key in '{s}'")),
    }
}
