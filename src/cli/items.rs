//! Print the merged resource rendering context.
//!
//! ```bash
//! panda-ctx items                # values as is
//! panda-ctx items --json-ready   # values escaped for embedding in JSON strings
//! panda-ctx items --checksum     # only the sha256 digest of the items
//! ```

use anyhow::{Context, Result};
use clap::Args;

use crate::templating::{ResourceContext, context_checksum};

/// Arguments of the `items` command.
#[derive(Args, Debug)]
pub struct ItemsCommand {
    /// Escape values for embedding inside JSON string literals
    #[arg(long)]
    json_ready: bool,

    /// Print only a `sha256:` digest of the items
    #[arg(long)]
    checksum: bool,
}

impl ItemsCommand {
    /// Prints the items as pretty JSON, or their checksum.
    pub fn execute(self, ctx: &ResourceContext) -> Result<()> {
        let items = ctx.get_items(self.json_ready)?;

        if self.checksum {
            println!("{}", context_checksum(&items)?);
        } else {
            let json = serde_json::to_string_pretty(&items)
                .context("Failed to serialize context items")?;
            println!("{json}");
        }

        Ok(())
    }
}
