//! Unified error types for the teardown workspace.
//!
//! None of these ever abort a teardown run. The sequencer turns every
//! step error into a recorded outcome; only configuration loading and
//! the CLI surface errors to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum TeardownError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path (or program) where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
        /// Trimmed standard error of the command.
        stderr: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TeardownError>;
