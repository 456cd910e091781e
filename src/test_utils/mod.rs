//! Test utilities for panda-ctx
//!
//! Helpers shared by unit tests and (through the `test-utils` feature)
//! integration tests:
//! - [`FakeCommandRunner`] - scripted stand-in for the address detection command
//! - [`fixtures`] - sample cluster configurations, extra values and config files
//! - [`init_test_logging`] - one-time tracing setup for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use panda_ctx::models::ClusterConfig;
//! use panda_ctx::templating::ResourceContext;
//! use panda_ctx::test_utils::FakeCommandRunner;
//!
//! let runner = FakeCommandRunner::success("10.0.0.7\n");
//! let probe = runner.clone();
//! let ctx = ResourceContext::new()
//!     .with_cluster_conf(ClusterConfig::new())
//!     .with_command_runner(runner);
//!
//! assert_eq!(ctx.get_items(false).unwrap()["local_priv_ipaddr"], "10.0.0.7");
//! assert_eq!(probe.calls(), 1);
//! ```

pub mod fixtures;

pub use fixtures::ConfigFixture;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::templating::{CommandOutput, CommandRunner};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays
/// off. Safe to call from every test.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

#[derive(Debug)]
enum Outcome {
    Output(CommandOutput),
    SpawnError(String),
}

#[derive(Debug)]
struct FakeState {
    outcome: Outcome,
    calls: usize,
    last_command: Option<Vec<String>>,
}

/// Scripted [`CommandRunner`] that records its invocations.
///
/// Clones share state, so a clone kept by the test can observe calls made
/// through the one moved into a context.
#[derive(Debug, Clone)]
pub struct FakeCommandRunner {
    state: Rc<RefCell<FakeState>>,
}

impl FakeCommandRunner {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                outcome,
                calls: 0,
                last_command: None,
            })),
        }
    }

    /// Exits successfully printing `stdout`.
    pub fn success(stdout: &str) -> Self {
        Self::with_outcome(Outcome::Output(CommandOutput {
            success: true,
            status: "exit status: 0".to_string(),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }))
    }

    /// Exits unsuccessfully with the given status text and stderr.
    pub fn failure(status: &str, stderr: &str) -> Self {
        Self::with_outcome(Outcome::Output(CommandOutput {
            success: false,
            status: status.to_string(),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }))
    }

    /// Fails to start at all.
    pub fn spawn_error(reason: &str) -> Self {
        Self::with_outcome(Outcome::SpawnError(reason.to_string()))
    }

    /// Number of times the command was run.
    pub fn calls(&self) -> usize {
        self.state.borrow().calls
    }

    /// Argument vector of the most recent run.
    pub fn last_command(&self) -> Option<Vec<String>> {
        self.state.borrow().last_command.clone()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, argv: &[&str]) -> io::Result<CommandOutput> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;
        state.last_command = Some(argv.iter().map(ToString::to_string).collect());

        match &state.outcome {
            Outcome::Output(output) => Ok(output.clone()),
            Outcome::SpawnError(reason) => Err(io::Error::other(reason.clone())),
        }
    }
}
