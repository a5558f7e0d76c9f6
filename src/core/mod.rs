//! Core functionality for the git-status-bar tool.
//!
//! This module provides the building blocks of a status refresh: git queries and
//! parsing, the persistent caches, and rendering.

pub mod change;
pub mod config;
pub mod diagnostics;
pub mod dirs;
pub mod error;
pub mod git;
pub mod icons;
pub mod output;
pub mod porcelain;
pub mod prober;
pub mod remote;
pub mod render;
pub mod snapshot;
pub mod store;

// === Error handling ===
pub use error::{Result, StatusBarError};
pub use diagnostics::{Degraded, Diagnostic, DiagnosticKind};

// === Configuration ===
pub use config::Settings;

// === Git operations ===
// Repository discovery plus the runner the prober and remote sync go through
pub use git::{GitRepo, GitRunner, SystemGit};
pub use porcelain::parse_porcelain_v2;
pub use prober::Prober;

// === Snapshot model ===
pub use change::ChangeKind;
pub use snapshot::{ChangeTally, RepoId, RepositorySnapshot};

// === Caches ===
pub use remote::RemoteFreshness;
pub use store::{CacheStore, CachedRepository, RemoteFreshnessRecord, SnapshotCacheEntry};

// === Rendering ===
pub use render::{render, render_loading, shorten_branch, RenderMode};

// === Output formatting ===
// Colored messages for the cache maintenance commands
pub use output::{print_error, print_info, print_section_header, print_success};
