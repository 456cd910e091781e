//! Local private address resolution.
//!
//! The host's private IP address is needed by most package templates but is
//! expensive to obtain: it comes from a platform detection script. It is
//! therefore resolved lazily, on first use, and memoized for the lifetime of
//! the owning context:
//!
//! 1. if extra values are set and non-empty, they must carry `privateipaddr`,
//!    which is used as is; its absence is [`ContextError::MissingOverride`];
//! 2. otherwise (no extra values, or an empty map) the detection command runs
//!    once and its trimmed ASCII stdout becomes the address.
//!
//! Command execution goes through the [`CommandRunner`] trait so callers
//! (and tests) can substitute the process invocation.

use serde_json::{Map, Value};
use std::cell::OnceCell;
use std::io;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::constants::LOCAL_PRIV_IPADDR_OVERRIDE_KEY;
use crate::core::ContextError;
use crate::utils::{command_exists, value_to_string};

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status zero
    pub success: bool,
    /// Human readable exit status
    pub status: String,
    /// Raw standard output
    pub stdout: Vec<u8>,
    /// Raw standard error
    pub stderr: Vec<u8>,
}

/// Runs an external command to completion.
pub trait CommandRunner {
    /// Runs `argv[0]` with the remaining arguments and waits for it to exit.
    ///
    /// An `Err` means the command could not be started at all; a command
    /// that ran and failed is reported through [`CommandOutput::success`].
    fn run(&self, argv: &[&str]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] spawning real processes, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, argv: &[&str]) -> io::Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

        if !command_exists(program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{program}' is not installed or not found in PATH"),
            ));
        }

        debug!("Running command: {}", argv.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Memoized local private IP address.
///
/// Starts unresolved and transitions to resolved at most once; there is no
/// way to invalidate a resolved address.
#[derive(Debug, Default)]
pub struct LocalAddress {
    cell: OnceCell<String>,
}

impl LocalAddress {
    /// Creates an unresolved address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The address, if it has been resolved already.
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.cell.get().map(String::as_str)
    }

    /// Returns the address, resolving it on first call.
    ///
    /// Later calls return the cached value without looking at
    /// `extra_values` or running anything. A failed resolution leaves the
    /// address unresolved and is not retried internally.
    pub fn get_or_resolve(
        &self,
        extra_values: Option<&Map<String, Value>>,
        runner: &dyn CommandRunner,
        command: &[&str],
    ) -> Result<&str, ContextError> {
        if let Some(addr) = self.cell.get() {
            return Ok(addr);
        }

        let addr = resolve(extra_values, runner, command)?;
        Ok(self.cell.get_or_init(|| addr))
    }
}

fn resolve(
    extra_values: Option<&Map<String, Value>>,
    runner: &dyn CommandRunner,
    command: &[&str],
) -> Result<String, ContextError> {
    if let Some(extra) = extra_values.filter(|extra| !extra.is_empty()) {
        let value = extra.get(LOCAL_PRIV_IPADDR_OVERRIDE_KEY).ok_or_else(|| {
            ContextError::MissingOverride {
                key: LOCAL_PRIV_IPADDR_OVERRIDE_KEY.to_string(),
            }
        })?;
        let addr = value_to_string(value);
        debug!("Using local private IP address from extra values: {}", addr);
        return Ok(addr);
    }

    let command_line = command.join(" ");
    let output = runner.run(command).map_err(|e| ContextError::AddressCommandSpawn {
        command: command_line.clone(),
        reason: e.to_string(),
    })?;

    if !output.success {
        return Err(ContextError::AddressCommandFailed {
            command: command_line,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or_else(|| ContextError::AddressNotAscii {
            command: command_line.clone(),
        })?;

    let addr = stdout.trim().to_string();
    info!("Detected local private IP address: {}", addr);
    Ok(addr)
}
