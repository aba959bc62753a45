//! Errors raised while building the question tree

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a catalog
#[derive(Debug, Error)]
pub enum Error {
    /// A question file has no `# F` block
    #[error("Malformed question file {}: missing `# F` block", .path.display())]
    MissingQuestion { path: PathBuf },

    /// A question file name does not carry a numeric prefix
    #[error("Not a numbered question file: {}", .path.display())]
    InvalidName { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;
