//! Shared helpers for panda-ctx integration tests.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use panda_ctx::test_utils::ConfigFixture;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated working area for running the `panda-ctx` binary.
///
/// `HOME` and `XDG_CONFIG_HOME` point inside the temporary directory and
/// `PANDA_CONFIG` is cleared, so a configuration file on the host running
/// the tests is never picked up.
pub struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        panda_ctx::test_utils::init_test_logging(None);
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Installation root used by [`TestEnv::write_full_config`].
    pub fn install_root(&self) -> PathBuf {
        self.temp.path().join("dcos")
    }

    /// Writes the full fixture and returns its path.
    pub fn write_full_config(&self) -> Result<PathBuf> {
        self.write_config(&ConfigFixture::full(&self.install_root()))
    }

    pub fn write_config(&self, fixture: &ConfigFixture) -> Result<PathBuf> {
        fixture.write_to(self.temp.path())
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// `panda-ctx` command running inside the isolated environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("panda-ctx").unwrap();
        cmd.current_dir(self.temp.path())
            .env_remove("PANDA_CONFIG")
            .env_remove("RUST_LOG")
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Parses the stdout of a successful command as JSON.
pub fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Platform rendering of `root` joined with `parts`.
pub fn path_str(root: &Path, parts: &[&str]) -> String {
    parts.iter().fold(root.to_path_buf(), |p, part| p.join(part)).to_string_lossy().into_owned()
}
