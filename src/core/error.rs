//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`StatusBarError`] which covers every failure the status bar
//! can run into. It uses `thiserror` for ergonomic error definitions and provides
//! small constructors for the variants that carry context.
//!
//! # Public API
//! - [`StatusBarError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, StatusBarError>`
//!
//! # Error Categories
//! - **Repository**: Unresolvable or unusable target path
//! - **Git queries**: Spawn failures, non-zero exits, unusable status or git-dir output
//! - **Cache store**: SQLite and snapshot (de)serialization errors
//! - **Configuration**: Unreadable or malformed settings file

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-status-bar
#[derive(Error, Debug)]
pub enum StatusBarError {
    // Repository errors
    #[error("Could not resolve absolute path for '{path}': {source}")]
    PathResolution {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    // Git command errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    GitCommandFailed { args: String, stderr: String },

    #[error("Could not read git status: {reason}")]
    StatusQuery { reason: String },

    #[error("Could not resolve git directory: {reason}")]
    GitDir { reason: String },

    #[error("Background query '{task}' panicked")]
    WorkerPanicked { task: &'static str },

    // Cache store errors
    #[error("Cache store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("Could not find {kind} directory")]
    DirectoryNotFound { kind: &'static str },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using StatusBarError
pub type Result<T> = std::result::Result<T, StatusBarError>;

impl StatusBarError {
    /// Create a path resolution error
    pub fn path_resolution(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathResolution {
            path: path.into(),
            source,
        }
    }

    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a failed git command error from its arguments and stderr output
    pub fn git_command_failed(args: &[&str], stderr: impl AsRef<str>) -> Self {
        Self::GitCommandFailed {
            args: args.join(" "),
            stderr: stderr.as_ref().trim().to_string(),
        }
    }

    /// Create a status query error
    pub fn status_query(reason: impl std::fmt::Display) -> Self {
        Self::StatusQuery {
            reason: reason.to_string(),
        }
    }

    /// Create a git dir resolution error
    pub fn git_dir(reason: impl std::fmt::Display) -> Self {
        Self::GitDir {
            reason: reason.to_string(),
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
