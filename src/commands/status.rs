use crate::core::{
    config::Settings,
    error::{Result, StatusBarError},
    git::{GitRepo, GitRunner, SystemGit},
    prober::Prober,
    remote::RemoteFreshness,
    render::{render, render_loading, RenderMode},
    snapshot::RepoId,
    store::{CacheStore, SnapshotCacheEntry},
};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct StatusRequest {
    pub path: PathBuf,
    pub mode: RenderMode,
    /// Sync the remote and re-probe even when both caches are fresh
    pub force_remote: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Target is outside any work tree; nothing is printed
    NotARepository,
    Rendered { line: String, cached: bool },
}

/// Everything one invocation needs, built at start and closed at the end
pub struct StatusContext<R: GitRunner = SystemGit> {
    settings: Settings,
    store: CacheStore,
    runner: R,
}

impl StatusContext<SystemGit> {
    pub fn open(settings: Settings) -> Result<Self> {
        let store = CacheStore::open(&settings.cache_file()?)?;
        Ok(Self::with_runner(settings, store, SystemGit))
    }
}

impl<R: GitRunner> StatusContext<R> {
    pub fn with_runner(settings: Settings, store: CacheStore, runner: R) -> Self {
        Self {
            settings,
            store,
            runner,
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Render the status line of the work tree at `path`, reusing a fresh cached snapshot
    pub fn run(
        &self,
        path: &Path,
        request: &StatusRequest,
        now: DateTime<Utc>,
        out: &mut impl Write,
    ) -> Result<StatusOutcome> {
        let id = RepoId::from_path(path);
        let cached = self.cached_snapshot(&id);

        if let Some(entry) = &cached {
            if request.force_remote {
                log::debug!("Forced refresh, bypassing cached snapshot");
            } else if entry.is_fresh(&id, now, self.settings.snapshot_ttl()) {
                let line = render(&entry.snapshot, request.mode);
                writeln!(out, "{line}")?;
                return Ok(StatusOutcome::Rendered { line, cached: true });
            } else {
                log::debug!("Cached snapshot from {} is stale", entry.written_at);
            }
        }

        if self.settings.print_loading && request.mode == RenderMode::Tmux {
            // The previous snapshot stays visible behind the loading marker
            let loading = match &cached {
                Some(entry) => render(&entry.snapshot.as_loading(), request.mode),
                None => render_loading(request.mode),
            };
            writeln!(out, "{loading}")?;
            out.flush()?;
        }

        let remote_success = RemoteFreshness::new(
            &self.runner,
            &self.store,
            self.settings.remote_update_interval(),
        )
        .refresh(&id, path, request.force_remote, now)?;

        let (snapshot, diagnostics) = Prober::new(&self.runner)
            .probe(path, remote_success)?
            .into_parts();
        if !diagnostics.is_empty() {
            log::debug!(
                "Rendering {} with {} degraded field(s)",
                path.display(),
                diagnostics.len()
            );
        }

        self.store.put_snapshot(&id, path, &snapshot, now)?;

        let line = render(&snapshot, request.mode);
        writeln!(out, "{line}")?;
        Ok(StatusOutcome::Rendered {
            line,
            cached: false,
        })
    }

    // Unreadable entries count as a miss
    fn cached_snapshot(&self, id: &RepoId) -> Option<SnapshotCacheEntry> {
        match self.store.snapshot(id) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Ignoring unreadable cached snapshot: {e}");
                None
            }
        }
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

/// Absolute, lexically cleaned form of `path`, which must be an existing directory
pub fn resolve_target(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map(|absolute| clean(&absolute))
        .map_err(|e| StatusBarError::path_resolution(path, e))?;
    let metadata =
        std::fs::metadata(&absolute).map_err(|e| StatusBarError::path_resolution(&absolute, e))?;
    if !metadata.is_dir() {
        return Err(StatusBarError::not_a_directory(absolute));
    }
    Ok(absolute)
}

// Drops `.` and trailing separators and folds `..`, so every spelling of a
// directory yields the same repository id
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

pub fn execute_status(
    settings: Settings,
    request: &StatusRequest,
    out: &mut impl Write,
) -> Result<StatusOutcome> {
    let started = Instant::now();
    let path = resolve_target(&request.path)?;
    if !GitRepo::is_inside_work_tree(&path) {
        log::debug!("{} is not inside a work tree", path.display());
        return Ok(StatusOutcome::NotARepository);
    }

    let context = StatusContext::open(settings)?;
    let outcome = context.run(&path, request, Utc::now(), out);
    let closed = context.close();
    let outcome = outcome?;
    closed?;

    if let StatusOutcome::Rendered { cached, .. } = &outcome {
        log::info!(
            "Completed {} (cached: {cached}, took {:?})",
            path.display(),
            started.elapsed()
        );
    }
    Ok(outcome)
}
