//! Error handling for panda-ctx
//!
//! Two layers, mirroring how the context engine is consumed:
//! - [`ContextError`] - typed failures raised while building a resource
//!   rendering context (address detection, overrides, package ids, config)
//! - [`ErrorContext`] - a wrapper adding user-facing details and suggestions,
//!   used by the CLI to print failures
//!
//! Library code returns [`ContextError`] (or `anyhow::Result` where it adds
//! file context); [`user_friendly_error`] turns any `anyhow::Error` into an
//! [`ErrorContext`] for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use panda_ctx::core::{ContextError, ErrorContext};
//!
//! let ctx = ErrorContext::new(ContextError::ExtraValuesUninitialized)
//!     .with_suggestion("Pass an (empty) extra values map when creating the context");
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failures raised while computing a resource rendering context.
///
/// A missing context source is never an error: retrievers simply contribute
/// nothing. Everything listed here aborts the whole context build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The local address detection command could not be started.
    #[error("Failed to run address detection command '{command}': {reason}")]
    AddressCommandSpawn {
        /// Rendered command line
        command: String,
        /// Underlying OS error
        reason: String,
    },

    /// The local address detection command exited unsuccessfully.
    #[error("Address detection command '{command}' failed with {status}")]
    AddressCommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The detection command printed something that is not ASCII text.
    #[error("Address detection command '{command}' produced non-ASCII output")]
    AddressNotAscii {
        /// Rendered command line
        command: String,
    },

    /// Extra values were given but lack a key that must then be present.
    #[error("Extra values are set but do not contain '{key}'")]
    MissingOverride {
        /// The absent key
        key: String,
    },

    /// `update` was called on a context created without extra values.
    #[error("Extra values are not initialized for this resource context")]
    ExtraValuesUninitialized,

    /// A package id string does not follow `<name>--<version>`.
    #[error("Invalid package id '{id}': {reason}")]
    InvalidPackageId {
        /// The offending id
        id: String,
        /// Why it was rejected
        reason: String,
    },

    /// The context configuration file could not be parsed.
    #[error("Invalid context configuration in {file}: {reason}")]
    ConfigError {
        /// Configuration file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// A template could not be rendered with the computed context.
    #[error("Template rendering failed: {reason}")]
    RenderError {
        /// Tera error chain, flattened
        reason: String,
    },

    /// Catch-all for errors that have no dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// An error decorated with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ContextError,
    /// Actionable hint shown after the error
    pub suggestion: Option<String>,
    /// Additional explanation
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wraps an error without any decoration.
    #[must_use]
    pub const fn new(error: ContextError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attaches a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attaches details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

fn create_error_context(error: ContextError) -> ErrorContext {
    match &error {
        ContextError::AddressCommandSpawn {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Set 'privateipaddr' in the extra values (e.g. --set privateipaddr=10.0.0.5) \
                 to skip address detection",
            )
            .with_details("The detection script must be installed and executable on this host"),
        ContextError::AddressCommandFailed {
            stderr,
            ..
        } => {
            let details = if stderr.is_empty() {
                "The detection script exited without printing an error".to_string()
            } else {
                stderr.clone()
            };
            ErrorContext::new(error)
                .with_suggestion("Check the host network configuration or provide 'privateipaddr' explicitly")
                .with_details(details)
        }
        ContextError::AddressNotAscii {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure the detection script prints a single IP address"),
        ContextError::MissingOverride {
            key,
        } => {
            let suggestion = format!("Add '{key}' to the extra values (e.g. --set {key}=10.0.0.5)");
            ErrorContext::new(error).with_suggestion(suggestion).with_details(
                "When extra values are given they must carry the local private address; \
                 detection only runs without extra values",
            )
        }
        ContextError::ExtraValuesUninitialized => ErrorContext::new(error)
            .with_suggestion("Create the context with an extra values map before updating it"),
        ContextError::InvalidPackageId {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Package ids look like '<name>--<version>', e.g. 'mesos--1.14.0'"),
        ContextError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax of the context configuration file")
            .with_details(
                "Expected tables: [layout], [package], [cluster.<section>] and [extra]",
            ),
        ContextError::RenderError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Variables use {{ var }}; run 'panda-ctx items' to list the available context items",
            ),
        ContextError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

/// Converts any error into an [`ErrorContext`] with a helpful suggestion.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx_error) = error.downcast_ref::<ContextError>() {
        return create_error_context(ctx_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ContextError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership or run with elevated permissions");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ContextError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return create_error_context(ContextError::ConfigError {
            file: "context configuration".to_string(),
            reason: toml_error.to_string(),
        });
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ContextError::Other {
        message,
    })
}
