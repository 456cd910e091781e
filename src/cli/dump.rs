//! Print the raw context sources, before merging.

use anyhow::{Context, Result};
use clap::Args;

use crate::templating::ResourceContext;

/// Arguments of the `dump` command.
#[derive(Args, Debug)]
pub struct DumpCommand {}

impl DumpCommand {
    /// Prints [`ResourceContext::as_dict`] as pretty JSON.
    pub fn execute(self, ctx: &ResourceContext) -> Result<()> {
        let json = serde_json::to_string_pretty(&ctx.as_dict())
            .context("Failed to serialize context sources")?;
        println!("{json}");
        Ok(())
    }
}
