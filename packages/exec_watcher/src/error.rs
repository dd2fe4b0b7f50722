use std::env::VarError;

use thiserror::Error;

/// Errors that can occur when configuring watch report logging.
///
/// Watching itself never fails; these only arise from configuration input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The named environment variable is not set or does not contain valid unicode.
    #[error("environment variable '{name}' is not set or is not valid unicode")]
    MissingVariable {
        /// Name of the environment variable that was read.
        name: String,

        /// Why the variable could not be read.
        #[source]
        source: VarError,
    },

    /// The caller provided a supposed threshold but it was not a whole number of milliseconds.
    #[error("invalid watch threshold: '{invalid_value}' is invalid: {problem}")]
    InvalidThreshold {
        /// The value that was rejected.
        invalid_value: String,

        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for `exec_watcher` configuration, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
