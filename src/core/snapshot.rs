//! Repository snapshot data structures.
//!
//! A [`RepositorySnapshot`] is the unit that gets probed, cached and rendered: one
//! fully-resolved description of a repository at a point in time. It is built fresh on
//! every probe and never mutated once handed to the renderer.
//!
//! # Public API
//! - [`RepoId`]: Stable identity of a repository, derived from its absolute path
//! - [`ChangeTally`]: Per-kind change counters for one area (staged or unstaged)
//! - [`RepositorySnapshot`]: Branch, tracking and change state of a repository

use crate::core::change::ChangeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Stable identity of a repository: hex MD5 digest of its absolute path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId(String);

impl RepoId {
    pub fn from_path(path: &Path) -> Self {
        Self(format!(
            "{:x}",
            md5::compute(path.to_string_lossy().as_bytes())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RepoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTally {
    pub added: u32,
    pub deleted: u32,
    pub modified: u32,
    pub renamed: u32,
    pub copied: u32,
}

impl ChangeTally {
    pub fn record(&mut self, kind: ChangeKind) {
        let counter = match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Deleted => &mut self.deleted,
            ChangeKind::Modified => &mut self.modified,
            ChangeKind::Renamed => &mut self.renamed,
            ChangeKind::Copied => &mut self.copied,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn count(&self) -> u32 {
        self.added
            .saturating_add(self.deleted)
            .saturating_add(self.modified)
            .saturating_add(self.renamed)
            .saturating_add(self.copied)
    }

    pub fn has_changed(&self) -> bool {
        self.count() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Empty for repositories where no branch could be determined
    pub branch: String,
    pub commit: String,
    /// Empty when the branch tracks nothing
    pub upstream: String,
    pub ahead: u32,
    pub behind: u32,
    pub unmerged: u32,
    pub untracked: u32,
    pub stashed: u32,
    pub staged: ChangeTally,
    pub unstaged: ChangeTally,
    /// Branch has no upstream configured
    pub is_new: bool,
    /// Upstream is configured but no longer exists on the remote
    pub is_gone: bool,
    pub remote_success: bool,
    /// Remote sync in flight; never persisted
    #[serde(skip)]
    pub loading: bool,
}

impl RepositorySnapshot {
    /// Sum of every counter shown on the status line
    pub fn count(&self) -> u32 {
        self.ahead
            .saturating_add(self.behind)
            .saturating_add(self.unmerged)
            .saturating_add(self.untracked)
            .saturating_add(self.stashed)
            .saturating_add(self.staged.count())
            .saturating_add(self.unstaged.count())
    }

    pub fn is_clean(&self) -> bool {
        !self.is_new && !self.is_gone && self.count() == 0
    }

    pub fn is_dirty(&self) -> bool {
        !self.is_new && !self.is_gone && self.count() > 0
    }

    pub fn has_branch(&self) -> bool {
        !self.branch.is_empty()
    }

    /// Copy of this snapshot flagged as waiting on a remote sync
    pub fn as_loading(&self) -> Self {
        Self {
            loading: true,
            ..self.clone()
        }
    }
}
