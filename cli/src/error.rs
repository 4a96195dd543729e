//! Error types for the catalint CLI.
//!
//! Every variant is fatal: the run stops and the process exits with status 2.
//! Package rule failures are not errors here; they are collected in the
//! [`Report`](crate::catalog::Report).

use camino::Utf8PathBuf;
use catalint::{ConfigError, ValidateError};
use catalint_common::PackageDirError;
use thiserror::Error;

/// Errors that abort a catalog run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog root does not exist or is not a directory.
    #[error("catalog root {path} is not a directory; pass --root <DIR>")]
    RootNotFound {
        /// Path given as the catalog root.
        path: Utf8PathBuf,
    },

    /// The catalog root could not be listed.
    #[error(transparent)]
    Listing(#[from] PackageDirError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A package could not be validated.
    #[error(transparent)]
    Validate(#[from] ValidateError),

    /// The current directory could not be used to find configuration.
    #[error("cannot resolve the current directory: {reason}")]
    CurrentDir {
        /// Description of the failure.
        reason: String,
    },

    /// Writing the report to stdout failed.
    #[error("failed to write report: {source}")]
    WriteFailed {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the JSON Lines output failed.
    #[error("failed to write {path}: {source}")]
    JsonlFailed {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteFailed { source }
    }
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
