//! panda-ctx CLI entry point
//!
//! Parses arguments, runs the command and turns failures into a colored
//! message with suggestions and exit code 1.

use anyhow::Result;
use clap::Parser;
use panda_ctx::cli;
use panda_ctx::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
