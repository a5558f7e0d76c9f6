//! Git Status Bar - a compact, cached git status line for tmux and terminals.
//!
//! This library probes a repository with a handful of concurrent git queries, caches
//! the resulting snapshot and the outcome of periodic remote syncs in SQLite, and
//! renders the snapshot as a single powerline-style line.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Status parsing and repository probing
//! - Snapshot and remote freshness caching
//! - Status line rendering for tmux and ANSI terminals
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Error handling
    Degraded,
    Diagnostic,
    DiagnosticKind,
    Result,
    StatusBarError,

    // Configuration
    Settings,

    // Git operations
    GitRepo,
    GitRunner,
    Prober,
    SystemGit,
    parse_porcelain_v2,

    // Snapshot model
    ChangeKind,
    ChangeTally,
    RepoId,
    RepositorySnapshot,

    // Caches
    CacheStore,
    RemoteFreshness,
    RemoteFreshnessRecord,
    SnapshotCacheEntry,

    // Rendering
    render,
    render_loading,
    shorten_branch,
    RenderMode,
};
