//! Core error types for syncscope

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of an external collaborator call (journal or service manager).
///
/// Surfaced to callers as a server error; there is no partial data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Output of '{program}' exceeded {limit} bytes")]
    OutputTooLarge { program: String, limit: usize },

    #[error("'{program}' did not complete within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Timeout { .. })
    }
}

/// The repository list could not be read.
///
/// Kept distinct from an empty list so callers can tell "nothing configured"
/// apart from "configuration unreadable".
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Repository list {path} is unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single journal line that could not be turned into an activity event.
///
/// Always recovered locally by dropping the line.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Record is not a JSON object")]
    NotAnObject,

    #[error("Record has no usable timestamp")]
    MissingTimestamp,
}
