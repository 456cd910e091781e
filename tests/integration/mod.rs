//! Integration test suite for panda-ctx
//!
//! End-to-end tests driving the `panda-ctx` binary against configuration
//! files written to a temporary directory.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **items**: merged context items, JSON escaping and checksums
//! - **dump**: raw source view
//! - **render**: template rendering to stdout and files
//! - **error_scenarios**: configuration, argument and detection failures

#[path = "../common/mod.rs"]
mod common;

mod dump;
mod error_scenarios;
mod items;
mod render;
