//! Typed error definitions for hoist.
//! Configuration errors are fatal; everything else is scoped to one
//! directory or one file and only ever reported.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoistError {
    #[error("--include and --exclude cannot be used together")]
    ConflictingFilters,

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("destination exists but is not a directory: {0}")]
    DestinationNotDir(PathBuf),

    #[error("{0}: folder does not exist")]
    PathNotFound(PathBuf),

    #[error("{0}: not a directory")]
    NotADirectory(PathBuf),

    #[error("{0}: permission to read denied")]
    PermissionDenied(PathBuf),

    #[error("{path}: symbolic link loop back to {ancestor}")]
    SymlinkLoop { path: PathBuf, ancestor: PathBuf },

    #[error("{path}: {reason}")]
    Walk { path: PathBuf, reason: String },

    #[error("could not move {src} -> {dest}: {reason}")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },
}

impl HoistError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            HoistError::ConflictingFilters => 10,
            HoistError::InvalidPattern { .. } => 11,
            HoistError::DestinationNotDir(_) => 12,
            HoistError::PathNotFound(_) => 20,
            HoistError::NotADirectory(_) => 21,
            HoistError::PermissionDenied(_) => 22,
            HoistError::SymlinkLoop { .. } => 23,
            HoistError::Walk { .. } => 24,
            HoistError::MoveFailed { .. } => 30,
        }
    }

    /// Short machine-friendly name, logged next to `code`.
    pub fn kind(&self) -> &'static str {
        match self {
            HoistError::ConflictingFilters => "conflicting_filters",
            HoistError::InvalidPattern { .. } => "invalid_pattern",
            HoistError::DestinationNotDir(_) => "destination_not_dir",
            HoistError::PathNotFound(_) => "path_not_found",
            HoistError::NotADirectory(_) => "not_a_directory",
            HoistError::PermissionDenied(_) => "permission_denied",
            HoistError::SymlinkLoop { .. } => "symlink_loop",
            HoistError::Walk { .. } => "walk_error",
            HoistError::MoveFailed { .. } => "move_failed",
        }
    }

    /// True for errors that must stop the run before traversal starts.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HoistError::ConflictingFilters
                | HoistError::InvalidPattern { .. }
                | HoistError::DestinationNotDir(_)
        )
    }
}
