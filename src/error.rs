use std::path::PathBuf;

use thiserror::Error;

use crate::types::Capability;

#[derive(Debug, Error)]
pub enum SqliteConnError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("path to '{target}': '{}' does not exist", .missing.display())]
    MissingDirectory { target: String, missing: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    StateError(String),

    #[error("Unsupported: {0}")]
    Unsupported(Capability),

    #[error("Resource error: {0}")]
    ResourceError(String),
}

/// Coarse classification of [`SqliteConnError`].
///
/// Configuration errors come out of `open`, state errors mean the caller used
/// the connection wrongly, unsupported errors mean the engine cannot do what
/// was asked, and resource errors carry whatever the engine reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    State,
    Unsupported,
    Resource,
}

impl SqliteConnError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqliteConnError::MissingDirectory { .. } | SqliteConnError::ConfigError(_) => {
                ErrorKind::Configuration
            }
            SqliteConnError::StateError(_) => ErrorKind::State,
            SqliteConnError::Unsupported(_) => ErrorKind::Unsupported,
            SqliteConnError::SqliteError(_) | SqliteConnError::ResourceError(_) => {
                ErrorKind::Resource
            }
        }
    }

    pub(crate) fn closed() -> Self {
        SqliteConnError::StateError("database connection closed".into())
    }
}
