//! Error types for season and episode renaming.

use std::path::PathBuf;

/// Result type used by the renaming library.
pub type Result<T> = std::result::Result<T, RenameError>;

/// Fatal conditions that stop a renaming run.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    /// The root directory is missing or cannot be used.
    #[error("Invalid root directory '{}': {message}", path.display())]
    Configuration { path: PathBuf, message: String },

    /// An explicit episode number is lower than the running episode count.
    #[error(
        "{} has a lesser episode number ({number}) than the current count ({count})",
        path.display()
    )]
    OrderingViolation { path: PathBuf, number: u32, count: u32 },

    /// The target name already exists and is not the file being renamed.
    #[error("File already exists: {}", path.display())]
    DestinationCollision { path: PathBuf },

    /// A filesystem operation failed.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenameError {
    /// Create a new Configuration error.
    pub fn configuration<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new Io error.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Configuration { path, .. }
            | Self::OrderingViolation { path, .. }
            | Self::DestinationCollision { path }
            | Self::Io { path, .. } => path,
        }
    }
}
