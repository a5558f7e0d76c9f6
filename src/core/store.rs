//! Persistent cache of snapshots and remote sync results.
//!
//! Both caches live in one SQLite file shared by every invocation of the binary. Each
//! invocation is a short-lived process, so the file is opened in shared-cache mode with
//! a short busy timeout, and every write is an `INSERT OR REPLACE` keyed by
//! [`RepoId`]: invocations for different repositories never touch the same row, and two
//! invocations for the same repository race with last-writer-wins.
//!
//! # Public API
//! - [`CacheStore`]: Connection handle with schema setup, reads, upserts and teardown
//! - [`SnapshotCacheEntry`]: Most recent snapshot of one repository, with its freshness rule
//! - [`RemoteFreshnessRecord`]: Last remote sync of one repository, with its due rule
//! - [`CachedRepository`]: Per-repository summary for the `cache show` listing

use crate::core::{
    error::{Result, StatusBarError},
    snapshot::{RepoId, RepositorySnapshot},
};
use chrono::{DateTime, TimeDelta, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA_VERSION: i32 = 1;
const BUSY_TIMEOUT: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotCacheEntry {
    pub id: RepoId,
    pub path: PathBuf,
    pub snapshot: RepositorySnapshot,
    pub written_at: DateTime<Utc>,
}

impl SnapshotCacheEntry {
    /// A hit requires the same repository and an age below `window`
    pub fn is_fresh(&self, id: &RepoId, now: DateTime<Utc>, window: TimeDelta) -> bool {
        let age = now - self.written_at;
        self.id == *id && age >= TimeDelta::zero() && age < window
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFreshnessRecord {
    pub id: RepoId,
    pub path: PathBuf,
    pub remote_url: String,
    pub success: bool,
    pub synced_at: DateTime<Utc>,
}

impl RemoteFreshnessRecord {
    /// Due once `max_age` has elapsed since the last attempt, successful or not
    pub fn is_due(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        let age = now - self.synced_at;
        age < TimeDelta::zero() || age >= max_age
    }
}

/// Everything the cache knows about one repository
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRepository {
    pub id: RepoId,
    pub path: PathBuf,
    pub snapshot_written_at: Option<DateTime<Utc>>,
    pub remote: Option<(bool, DateTime<Utc>)>,
}

pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Open or create the cache file, creating its parent directory when missing
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StatusBarError::cache_directory_creation_failed(parent, e))?;
        }
        log::debug!("Opening cache store {}", path.display());

        let flags = OpenFlags::default() | OpenFlags::SQLITE_OPEN_SHARED_CACHE;
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open a private in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let current: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;
        if current >= SCHEMA_VERSION {
            return Ok(());
        }

        log::debug!("Migrating cache schema from version {current}");
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshot_cache (
                id TEXT PRIMARY KEY,
                path TEXT NOT NULL,
                snapshot TEXT NOT NULL,
                written_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS remote_freshness (
                id TEXT PRIMARY KEY,
                path TEXT NOT NULL,
                remote_url TEXT NOT NULL DEFAULT '',
                success INTEGER NOT NULL,
                synced_at TEXT NOT NULL
            );
            ",
        )?;
        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    // === Snapshot cache ===

    pub fn snapshot(&self, id: &RepoId) -> Result<Option<SnapshotCacheEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT path, snapshot, written_at FROM snapshot_cache WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, DateTime<Utc>>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((path, json, written_at)) = row else {
            return Ok(None);
        };
        Ok(Some(SnapshotCacheEntry {
            id: id.clone(),
            path: PathBuf::from(path),
            snapshot: serde_json::from_str(&json)?,
            written_at,
        }))
    }

    pub fn put_snapshot(
        &self,
        id: &RepoId,
        path: &Path,
        snapshot: &RepositorySnapshot,
        written_at: DateTime<Utc>,
    ) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshot_cache (id, path, snapshot, written_at) VALUES (?1, ?2, ?3, ?4)",
            params![id.as_str(), path.to_string_lossy(), json, written_at],
        )?;
        Ok(())
    }

    // === Remote freshness ===

    pub fn remote_record(&self, id: &RepoId) -> Result<Option<RemoteFreshnessRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT path, remote_url, success, synced_at FROM remote_freshness WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok(RemoteFreshnessRecord {
                        id: id.clone(),
                        path: PathBuf::from(row.get::<_, String>(0)?),
                        remote_url: row.get(1)?,
                        success: row.get(2)?,
                        synced_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Due when no attempt was ever recorded or the last one is `max_age` old
    pub fn is_sync_due(&self, id: &RepoId, max_age: TimeDelta, now: DateTime<Utc>) -> Result<bool> {
        Ok(self
            .remote_record(id)?
            .map_or(true, |record| record.is_due(now, max_age)))
    }

    pub fn record_sync(&self, record: &RemoteFreshnessRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO remote_freshness (id, path, remote_url, success, synced_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id.as_str(),
                record.path.to_string_lossy(),
                record.remote_url,
                record.success,
                record.synced_at
            ],
        )?;
        Ok(())
    }

    pub fn last_remote_url(&self, id: &RepoId) -> Result<String> {
        Ok(self
            .remote_record(id)?
            .map(|record| record.remote_url)
            .unwrap_or_default())
    }

    // === Maintenance ===

    /// Every repository present in either table, ordered by path
    pub fn entries(&self) -> Result<Vec<CachedRepository>> {
        let mut repositories: BTreeMap<String, CachedRepository> = BTreeMap::new();

        let mut stmt = self
            .conn
            .prepare("SELECT id, path, written_at FROM snapshot_cache")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, DateTime<Utc>>(2)?,
            ))
        })?;
        for row in rows {
            let (id, path, written_at) = row?;
            repositories
                .entry(id.clone())
                .or_insert_with(|| CachedRepository::empty(id, path))
                .snapshot_written_at = Some(written_at);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, path, success, synced_at FROM remote_freshness")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, DateTime<Utc>>(3)?,
            ))
        })?;
        for row in rows {
            let (id, path, success, synced_at) = row?;
            repositories
                .entry(id.clone())
                .or_insert_with(|| CachedRepository::empty(id, path))
                .remote = Some((success, synced_at));
        }

        let mut entries: Vec<_> = repositories.into_values().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Remove every row; returns how many were removed
    pub fn clear(&self) -> Result<usize> {
        let snapshots = self.conn.execute("DELETE FROM snapshot_cache", [])?;
        let remotes = self.conn.execute("DELETE FROM remote_freshness", [])?;
        Ok(snapshots + remotes)
    }

    /// Close the connection, surfacing any error SQLite reports on teardown
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StatusBarError::Store(e))
    }
}

impl CachedRepository {
    fn empty(id: String, path: String) -> Self {
        Self {
            id: RepoId::from(id),
            path: PathBuf::from(path),
            snapshot_written_at: None,
            remote: None,
        }
    }
}
