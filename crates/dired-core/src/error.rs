//! Error types for `dired-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist (or vanished since it was listed).
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A rename or create target already exists.
    #[error("already exists: {0}")]
    NameCollision(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A view message could not be decoded into a [`crate::Command`].
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::AlreadyExists => Self::NameCollision(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Returns `true` for errors that mean "the entry is not there".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Convenience alias used throughout `dired-core`.
pub type CoreResult<T> = Result<T, CoreError>;
