//! Package identity
//!
//! Packages are identified by a canonical id of the form `<name>--<version>`
//! (for example `mesos--1.14.0`). The context engine needs both the full id,
//! which names the package's directory inside the package repository, and
//! the short name, which names its per-package log/run/work/config
//! directories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::ContextError;

/// Separator between package name and version in a package id.
pub const PKG_ID_SEPARATOR: &str = "--";

/// Identity of a single package.
pub trait PackageIdentity {
    /// Canonical package id, e.g. `mesos--1.14.0`.
    fn pkg_id(&self) -> &str;

    /// Short package name, e.g. `mesos`.
    fn pkg_name(&self) -> &str;
}

/// Parsed `<name>--<version>` package id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId {
    id: String,
    name_len: usize,
}

impl PackageIdentity for PackageId {
    fn pkg_id(&self) -> &str {
        &self.id
    }

    fn pkg_name(&self) -> &str {
        &self.id[..self.name_len]
    }
}

impl FromStr for PackageId {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ContextError::InvalidPackageId {
            id: s.to_string(),
            reason: reason.to_string(),
        };

        // Names may contain single dashes; the version starts after the first "--".
        let (name, version) =
            s.split_once(PKG_ID_SEPARATOR).ok_or_else(|| invalid("missing '--' separator"))?;

        if name.is_empty() {
            return Err(invalid("empty package name"));
        }
        if version.is_empty() {
            return Err(invalid("empty package version"));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(invalid("contains whitespace or path separators"));
        }

        Ok(Self {
            id: s.to_string(),
            name_len: name.len(),
        })
    }
}

impl TryFrom<String> for PackageId {
    type Error = ContextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageId> for String {
    fn from(value: PackageId) -> Self {
        value.id
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
