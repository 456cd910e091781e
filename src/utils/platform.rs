//! Platform-specific helpers
//!
//! Panda installs on Windows hosts, but the context engine is exercised on
//! every platform (tests, tooling). Everything that differs per platform
//! lives here: the local address detection command, configuration
//! locations, and path expansion.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Address detection command on Windows hosts.
pub const WINDOWS_DETECT_IP_COMMAND: [&str; 5] =
    ["powershell", "-executionpolicy", "Bypass", "-File", r"C:\d2iq\dcos\bin\detect_ip.ps1"];

/// Address detection command on Unix-like hosts.
pub const UNIX_DETECT_IP_COMMAND: [&str; 1] = ["/opt/mesosphere/bin/detect_ip"];

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Argument vector of the command printing this host's private IP address.
///
/// The first element is the program; the command prints the address on
/// stdout and exits with status zero on success.
#[must_use]
pub fn detect_ip_command() -> &'static [&'static str] {
    if is_windows() {
        &WINDOWS_DETECT_IP_COMMAND
    } else {
        &UNIX_DETECT_IP_COMMAND
    }
}

/// Checks whether a program can be found on `PATH` (or exists, if given as a path).
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expands `~` and environment variables in a path string.
///
/// # Examples
///
/// ```rust,no_run
/// use panda_ctx::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let root = resolve_path("~/dcos")?;
/// let cfg = resolve_path("$DCOS_ROOT/conf")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand path '{path}'"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Default location of the context configuration file, `<config_dir>/panda/context.toml`.
///
/// Returns `None` when the platform has no configuration directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("panda").join("context.toml"))
}
