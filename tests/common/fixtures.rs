//! Repository scenarios involving a remote
//!
//! The "remote" is a bare repository in its own temporary directory, so remote syncs
//! succeed without network access.

#![allow(dead_code)]

use super::repository::*;
use git_status_bar::core::error::Result;
use tempfile::TempDir;

pub struct TrackingRepo {
    pub remote: TestRepo,
    pub clone: TestRepo,
}

/// A clone whose `main` tracks `origin/main` and is in sync with it
pub fn create_tracking_repo() -> Result<TrackingRepo> {
    let source = setup_test_repo_with_initial_commit()?;

    let temp_dir = TempDir::new()?;
    git(temp_dir.path(), &["init", "--bare", "remote.git"])?;
    let remote = TestRepo {
        path: temp_dir.path().join("remote.git"),
        temp_dir,
    };

    git(&source.path, &["remote", "add", "origin", &remote.path.to_string_lossy()])?;
    git(&source.path, &["push", "-u", "origin", "main"])?;

    Ok(TrackingRepo {
        remote,
        clone: source,
    })
}

/// A tracking repository on `branch` whose upstream was deleted on the remote
pub fn create_gone_upstream_repo(branch: &str) -> Result<TrackingRepo> {
    let repo = create_tracking_repo()?;
    git(&repo.clone.path, &["checkout", "-b", branch])?;
    git(&repo.clone.path, &["push", "-u", "origin", branch])?;

    git(&repo.remote.path, &["branch", "-D", branch])?;
    Ok(repo)
}
