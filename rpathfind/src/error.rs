//! Error types for configuration lookups.

use std::process::ExitStatus;

/// Alias for `Result<T, rpathfind::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while resolving a runtime's base directory.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration facility has no (or an empty) value for the variable.
    #[error("configuration variable not found: {name}")]
    NotFound {
        /// Name of the queried variable.
        name: String,
    },

    /// No Python interpreter on `PATH` could be run.
    #[error("no runnable python3 or python in PATH")]
    NoInterpreter,

    /// The interpreter could not be started.
    #[error("failed to run {program}")]
    Spawn {
        /// Interpreter that was invoked.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The interpreter ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    QueryFailed {
        /// Interpreter that was invoked.
        program: String,
        /// Exit status of the child.
        status: ExitStatus,
        /// Trimmed standard error of the child.
        stderr: String,
    },

    /// The interpreter answered with a value that is not a path.
    #[error("unexpected configuration value: {0}")]
    InvalidOutput(String),

    /// The interpreter's answer was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_owned(),
        }
    }
}
