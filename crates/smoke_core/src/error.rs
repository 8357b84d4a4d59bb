//! Error types for smoke_core operations.

use crate::assertions::AssertionFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for harness operations.
#[derive(Error, Debug)]
pub enum SmokeError {
    /// The environment builder program is not on PATH.
    #[error("environment builder not found: {0}")]
    BuilderNotFound(String),

    /// The interpreter the environment should target is not on PATH.
    #[error("interpreter not available: {0}")]
    InterpreterUnavailable(String),

    /// The environment builder ran but exited unsuccessfully.
    #[error("failed to provision environment at {}: {reason}", dest.display())]
    ProvisionFailed {
        /// Destination the builder was pointed at
        dest: PathBuf,
        /// Exit status and captured stderr
        reason: String,
    },

    /// The command interpreter could not be started.
    #[error("failed to spawn shell '{shell}': {source}")]
    ShellSpawnFailed {
        /// Shell program that was attempted
        shell: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The client application could not be staged.
    #[error("client staging failed: {0}")]
    StagingFailed(String),

    /// A source file declared by the tool config was not staged.
    #[error("declared source '{name}' is missing from {}", dir.display())]
    MissingSource {
        /// Source file name from the descriptor
        name: String,
        /// Working directory that was checked
        dir: PathBuf,
    },

    /// A fixture name escapes the working directory or is otherwise unusable.
    #[error("invalid fixture name: {0}")]
    InvalidFixture(String),

    /// A pattern expectation could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Serialization of a fixture or report failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Output did not meet the scenario's expectations.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SmokeError {
    /// Whether this error invalidates the whole suite rather than one scenario.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::BuilderNotFound(_)
                | Self::InterpreterUnavailable(_)
                | Self::ProvisionFailed { .. }
                | Self::ShellSpawnFailed { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::BuilderNotFound(_) => {
                Some("Install virtualenv (e.g. 'pip install virtualenv') or set [environment].builder.")
            }
            Self::InterpreterUnavailable(_) => {
                Some("Put the interpreter on PATH or set [environment].interpreter.")
            }
            Self::ShellSpawnFailed { .. } => {
                Some("Check the SHELL override, or pass --shell with a POSIX shell.")
            }
            Self::MissingSource { .. } => {
                Some("Add the source file to the scenario with `with_file` before running it.")
            }
            Self::Config(_) => Some("Run 'smoke init-config' to write a valid default config."),
            _ => None,
        }
    }
}

/// Convenience Result type for smoke_core operations.
pub type Result<T> = std::result::Result<T, SmokeError>;
