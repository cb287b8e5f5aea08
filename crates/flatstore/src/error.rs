use std::{fs, io, path::PathBuf, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for flatstore operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] io::Error),

    // Open errors
    #[error("Couldn't open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("{} is locked by another handle", .path.display())]
    Locked { path: PathBuf },

    // Read errors
    #[error("Truncated data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Stored length {stored} doesn't match destination size {capacity}")]
    LengthMismatch { stored: u64, capacity: usize },

    #[error("Unexpected bytes after the first {expected}")]
    TrailingBytes { expected: usize },

    // Delete errors
    #[error("Couldn't delete {}: {source}", .path.display())]
    Delete { path: PathBuf, source: io::Error },
}

impl Error {
    /// Returns the underlying OS error kind, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::IO(e) | Self::Open { source: e, .. } | Self::Delete { source: e, .. } => {
                Some(e.kind())
            }
            _ => None,
        }
    }

    pub(crate) fn from_try_lock(path: PathBuf, error: fs::TryLockError) -> Self {
        match error {
            fs::TryLockError::WouldBlock => Self::Locked { path },
            fs::TryLockError::Error(e) => Self::IO(e),
        }
    }
}
