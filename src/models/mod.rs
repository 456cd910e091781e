//! Shared data models
//!
//! Plain data structures consumed by the context engine and the CLI.

pub mod cluster;

pub use cluster::{ClusterConfig, MasterNode, Section};
