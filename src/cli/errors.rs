//! Errors raised while discovering and rewriting test files

use std::path::PathBuf;

use thiserror::Error;

use super::CliError;

/// Errors that occur while processing test files
#[derive(Debug, Error)]
pub enum StepError {
    /// The test directory exists but cannot be listed.
    #[error("failed to list {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single file could not be read or written.
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StepError {
    /// Path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            StepError::Discovery { path, .. } | StepError::Io { path, .. } => path,
        }
    }
}

impl From<StepError> for CliError {
    fn from(err: StepError) -> Self {
        CliError::failure(format!("Error: {err}"))
    }
}
