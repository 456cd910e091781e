//! Core types for panda-ctx
//!
//! This module holds the building blocks the context engine is assembled
//! from:
//!
//! - [`error`] - [`ContextError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`layout`] - the [`PathLayout`] trait and the concrete [`InstallLayout`]
//! - [`package`] - the [`PackageIdentity`] trait and the parsed [`PackageId`]
//!
//! The engine itself (in [`crate::templating`]) depends only on the traits,
//! so callers may plug in their own layout or package representations.

pub mod error;
pub mod layout;
pub mod package;

pub use error::{ContextError, ErrorContext, user_friendly_error};
pub use layout::{InstallLayout, PathLayout, StorageNode};
pub use package::{PackageId, PackageIdentity};
