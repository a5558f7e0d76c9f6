//! Gathers a [`RepositorySnapshot`] from several independent git queries.
//!
//! The queries run in two fixed phases, each a fan-out of two scoped threads that
//! write into their own result slot and are joined before the slots are merged:
//!
//! 1. structured status and the absolute git directory,
//! 2. the known remote branches (needs the upstream name from phase 1) and the stash
//!    count (needs the git directory from phase 1).
//!
//! Phase 1 failures are fatal because no status line can be drawn without them.
//! Phase 2 failures degrade to defaults and leave a [`Diagnostic`] behind.
//!
//! [`Diagnostic`]: crate::core::diagnostics::Diagnostic

use crate::core::{
    diagnostics::{Degraded, DiagnosticKind},
    error::{Result, StatusBarError},
    git::{GitRunner, GIT_DIR_ARGS, REMOTE_BRANCHES_ARGS, STATUS_ARGS},
    porcelain::parse_porcelain_v2,
    snapshot::RepositorySnapshot,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::thread;

/// Stash reflog, relative to the git directory
const STASH_LOG: &str = "logs/refs/stash";

pub struct Prober<'r, R: GitRunner> {
    runner: &'r R,
}

impl<'r, R: GitRunner> Prober<'r, R> {
    pub fn new(runner: &'r R) -> Self {
        Self { runner }
    }

    /// Probe the repository at `path`; `remote_success` is carried into the snapshot
    pub fn probe(&self, path: &Path, remote_success: bool) -> Result<Degraded<RepositorySnapshot>> {
        let (status, git_dir) = thread::scope(|scope| {
            let status = scope.spawn(|| self.query_status(path));
            let git_dir = scope.spawn(|| self.query_git_dir(path));
            (
                join(status, "status"),
                join(git_dir, "git dir"),
            )
        });
        let mut probed = status??;
        let git_dir = git_dir??;
        log::debug!("Resolved git dir {}", git_dir.display());

        let upstream = probed.value.upstream.clone();
        let (gone, stashed) = thread::scope(|scope| {
            let gone = scope.spawn(|| self.upstream_gone(path, &upstream));
            let stashed = scope.spawn(|| count_stashes(&git_dir));
            (join(gone, "remote branches"), join(stashed, "stash"))
        });
        let gone = gone?;
        let stashed = stashed?;

        let snapshot = &mut probed.value;
        snapshot.is_new = upstream.is_empty();
        snapshot.is_gone = gone.value;
        snapshot.stashed = stashed.value;
        snapshot.remote_success = remote_success;
        probed.absorb(gone.diagnostics);
        probed.absorb(stashed.diagnostics);

        Ok(probed)
    }

    fn query_status(&self, path: &Path) -> Result<Degraded<RepositorySnapshot>> {
        let output = self
            .runner
            .run(path, STATUS_ARGS)
            .map_err(StatusBarError::status_query)?;
        Ok(parse_porcelain_v2(&output))
    }

    fn query_git_dir(&self, path: &Path) -> Result<PathBuf> {
        let output = self
            .runner
            .run(path, GIT_DIR_ARGS)
            .map_err(StatusBarError::git_dir)?;
        let git_dir = output.trim_end_matches(['\r', '\n']);
        if git_dir.is_empty() {
            return Err(StatusBarError::git_dir("git returned an empty path"));
        }
        Ok(PathBuf::from(git_dir))
    }

    /// Whether a configured upstream has disappeared from the known remote branches
    fn upstream_gone(&self, path: &Path, upstream: &str) -> Degraded<bool> {
        let mut gone = Degraded::new(false);
        if upstream.is_empty() {
            return gone;
        }
        match self.runner.run(path, REMOTE_BRANCHES_ARGS) {
            Ok(output) => {
                gone.value = !output.lines().any(|branch| branch.trim() == upstream);
                if gone.value {
                    log::debug!("Upstream {upstream} no longer exists");
                }
            }
            Err(e) => gone.warn(
                DiagnosticKind::RemoteBranches,
                format!("could not list remote branches: {e}"),
            ),
        }
        gone
    }
}

/// Number of entries in the stash reflog; a missing log means no stashes
pub fn count_stashes(git_dir: &Path) -> Degraded<u32> {
    let mut stashed = Degraded::new(0);
    let file = match File::open(git_dir.join(STASH_LOG)) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return stashed,
        Err(e) => {
            stashed.warn(DiagnosticKind::Stash, format!("could not open stash log: {e}"));
            return stashed;
        }
    };

    let (count, result) = count_lines(BufReader::new(file));
    stashed.value = count;
    if let Err(e) = result {
        stashed.warn(DiagnosticKind::Stash, format!("error while reading stash log: {e}"));
    }
    stashed
}

/// Count newline bytes, returning what was counted before any read error
fn count_lines<T: Read>(mut reader: T) -> (u32, io::Result<()>) {
    let mut buf = [0u8; 32 * 1024];
    let mut count = 0u32;
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return (count, Ok(())),
            Ok(n) => {
                let lines = buf[..n].iter().filter(|&&b| b == b'\n').count();
                count = count.saturating_add(u32::try_from(lines).unwrap_or(u32::MAX));
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return (count, Err(e)),
        }
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>, task: &'static str) -> Result<T> {
    handle
        .join()
        .map_err(|_| StatusBarError::WorkerPanicked { task })
}
