//! Git repository management and setup utilities
//!
//! Provides functions for creating throw-away repositories in various states and for
//! running the binary against them with an isolated cache and config directory.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use git_status_bar::core::error::{Result, StatusBarError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Private XDG cache and config directories so tests never share a cache file
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        Ok(Self {
            home: TempDir::new()?,
        })
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.home.path().join("cache")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home.path().join("config")
    }

    /// Write `config.json` for the binary under test
    pub fn write_config(&self, json: &str) -> Result<()> {
        let dir = self.config_dir().join("git-status-bar");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.json"), json)?;
        Ok(())
    }

    /// The binary with isolated directories and no tmux in the environment
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("git-status-bar")?;
        cmd.env("XDG_CACHE_HOME", self.cache_dir())
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env_remove("TMUX")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}

/// Run git in `dir`, failing on a non-zero exit
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        return Err(StatusBarError::git_command_failed(
            args,
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Sets up a fresh git repository on branch `main` with a local identity
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit of "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Modify a committed file and stash the change
pub fn git_stash(repo_path: &Path, filename: &str) -> Result<()> {
    create_file(repo_path, filename, "stashed change\n")?;
    git(repo_path, &["stash", "push", "-m", "wip"])?;
    Ok(())
}
