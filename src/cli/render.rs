//! Render a template file with the resource rendering context.
//!
//! The rendered result goes to stdout, or to `--output` (parent
//! directories are created).
//!
//! ```bash
//! panda-ctx render mesos.conf.tmpl
//! panda-ctx render mesos.json.tmpl --json-ready -o conf/mesos.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::templating::{ResourceContext, render_template};

/// Arguments of the `render` command.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file to render
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Escape values for templates that are JSON documents
    #[arg(long)]
    json_ready: bool,
}

impl RenderCommand {
    /// Renders the template with the context items.
    pub fn execute(self, ctx: &ResourceContext) -> Result<()> {
        let template = fs::read_to_string(&self.template)
            .with_context(|| format!("Failed to read template {}", self.template.display()))?;

        let items = ctx.get_items(self.json_ready)?;
        let rendered = render_template(&template, &items)
            .with_context(|| format!("Failed to render {}", self.template.display()))?;

        match &self.output {
            Some(output) => {
                if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }
                fs::write(output, rendered)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                info!("Rendered {} to {}", self.template.display(), output.display());
            }
            None => {
                std::io::stdout()
                    .write_all(rendered.as_bytes())
                    .context("Failed to write rendered template to stdout")?;
            }
        }

        Ok(())
    }
}
