//! Git repository discovery and command execution.
//!
//! Two ways of talking to git live here:
//! - [`GitRepo`] wraps `git2` for in-process lookups that need no parsing: whether a
//!   path is inside a work tree, and which URL the repository fetches from.
//! - [`GitRunner`] runs the `git` executable for the read-only queries the prober
//!   issues and for the remote sync. [`SystemGit`] is the real implementation; tests
//!   swap in a scripted runner.

use crate::core::error::{Result, StatusBarError};
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Arguments for the structured status query
pub const STATUS_ARGS: &[&str] = &[
    "status",
    "--untracked-files=all",
    "--branch",
    "--porcelain=v2",
];
/// Arguments resolving the absolute metadata directory
pub const GIT_DIR_ARGS: &[&str] = &["rev-parse", "--path-format=absolute", "--git-dir"];
/// Arguments listing every remote-tracking branch, one short name per line
pub const REMOTE_BRANCHES_ARGS: &[&str] = &[
    "for-each-ref",
    "--format=%(refname:short)",
    "refs/remotes",
];
/// Arguments fetching every remote and pruning stale remote-tracking branches
pub const REMOTE_UPDATE_ARGS: &[&str] = &["remote", "update", "--prune"];

/// Runs git with the given arguments in `dir` and returns its standard output
pub trait GitRunner: Sync {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;
}

/// Runs the `git` executable found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        log::trace!("git {} (in {})", args.join(" "), dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(StatusBarError::Io)?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(StatusBarError::git_command_failed(args, error_msg));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Whether `path` lies inside a non-bare work tree
    pub fn is_inside_work_tree<P: AsRef<Path>>(path: P) -> bool {
        match Self::open(path.as_ref()) {
            Ok(git_repo) => git_repo.workdir().is_some(),
            Err(e) => {
                log::debug!("{} is not a git work tree: {e}", path.as_ref().display());
                false
            }
        }
    }

    pub fn workdir(&self) -> Option<PathBuf> {
        if self.repo.is_bare() {
            return None;
        }
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// URL of `origin`, else of the first configured remote, else empty
    pub fn remote_url(&self) -> String {
        let names = match self.repo.remotes() {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Could not list remotes: {e}");
                return String::new();
            }
        };

        let preferred = names
            .iter()
            .flatten()
            .find(|name| *name == "origin")
            .or_else(|| names.iter().flatten().next());

        preferred
            .and_then(|name| self.repo.find_remote(name).ok())
            .and_then(|remote| remote.url().map(str::to_string))
            .unwrap_or_default()
    }
}
