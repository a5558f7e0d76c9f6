//! Remote sync with time-windowed backoff.
//!
//! A sync runs `git remote update --prune` and is only attempted when the last attempt
//! for the repository is older than the configured interval, or when forced. The
//! outcome is recorded whether it succeeded or not, so an offline machine backs off
//! instead of fetching on every status refresh.

use crate::core::{
    error::Result,
    git::{GitRepo, GitRunner, REMOTE_UPDATE_ARGS},
    snapshot::RepoId,
    store::{CacheStore, RemoteFreshnessRecord},
};
use chrono::{DateTime, TimeDelta, Utc};
use std::path::Path;

pub struct RemoteFreshness<'a, R: GitRunner> {
    runner: &'a R,
    store: &'a CacheStore,
    max_age: TimeDelta,
}

impl<'a, R: GitRunner> RemoteFreshness<'a, R> {
    pub fn new(runner: &'a R, store: &'a CacheStore, max_age: TimeDelta) -> Self {
        Self {
            runner,
            store,
            max_age,
        }
    }

    /// Sync when due (or forced) and return whether the latest known sync succeeded
    pub fn refresh(&self, id: &RepoId, path: &Path, force: bool, now: DateTime<Utc>) -> Result<bool> {
        let previous = self.store.remote_record(id)?;
        let due = force
            || previous
                .as_ref()
                .map_or(true, |record| record.is_due(now, self.max_age));

        if let (false, Some(record)) = (due, &previous) {
            log::debug!(
                "Remote sync not due for {} (last at {}, success: {})",
                path.display(),
                record.synced_at,
                record.success
            );
            return Ok(record.success);
        }

        let record = RemoteFreshnessRecord {
            id: id.clone(),
            path: path.to_path_buf(),
            remote_url: self.remote_url(path, previous.as_ref()),
            success: self.sync(path),
            synced_at: now,
        };
        self.store.record_sync(&record)?;
        Ok(record.success)
    }

    fn sync(&self, path: &Path) -> bool {
        log::debug!("Updating remotes of {}", path.display());
        match self.runner.run(path, REMOTE_UPDATE_ARGS) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Remote sync failed for {}: {e}", path.display());
                false
            }
        }
    }

    // Falls back to the last recorded URL when the repository cannot be opened
    fn remote_url(&self, path: &Path, previous: Option<&RemoteFreshnessRecord>) -> String {
        match GitRepo::open(path) {
            Ok(repo) => repo.remote_url(),
            Err(e) => {
                log::debug!("Could not read remote URL: {e}");
                previous
                    .map(|record| record.remote_url.clone())
                    .unwrap_or_default()
            }
        }
    }
}
