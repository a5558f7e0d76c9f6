use assert_cmd::prelude::*;
use git_status_bar::core::icons;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod status_command_tests {
    use super::*;

    #[test]
    fn test_clean_tracking_branch() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux"])
            .arg(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::single_line())
            .stdout(assertions::is_ansi())
            .stdout(assertions::has_git_icon())
            .stdout(predicate::str::contains("main"))
            .stdout(assertions::has_icon(icons::CLEAN))
            .stdout(assertions::lacks_icon(icons::DIRTY))
            .stdout(assertions::lacks_icon(icons::FAILED))
            .stdout(assertions::lacks_icon(icons::SEPARATOR));

        Ok(())
    }

    #[test]
    fn test_branch_without_upstream_is_new() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "untracked.txt", "new")?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux"])
            .arg(&repo.path)
            .assert()
            .success()
            .stdout(assertions::has_icon(icons::NEW))
            .stdout(assertions::lacks_icon(icons::DIRTY))
            .stdout(assertions::has_counter(1, icons::ADDED));

        Ok(())
    }

    #[test]
    fn test_dirty_tracking_branch_counters() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let path = &repo.clone.path;
        create_file(path, "initial.txt", "changed\n")?;
        create_file(path, "a.txt", "a")?;
        create_file(path, "b.txt", "b")?;
        create_file(path, "staged.txt", "s")?;
        git_add(path, "staged.txt")?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux"])
            .arg(path)
            .assert()
            .success()
            .stdout(assertions::has_icon(icons::DIRTY))
            .stdout(assertions::has_counter(2, icons::ADDED))
            .stdout(assertions::has_counter(1, icons::MODIFIED))
            .stdout(assertions::has_counter(1, icons::STAGED))
            .stdout(assertions::lacks_icon(icons::AHEAD))
            .stdout(assertions::lacks_icon(icons::STASHED));

        Ok(())
    }

    #[test]
    fn test_ahead_and_stashed() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let path = &repo.clone.path;
        create_file(path, "next.txt", "next")?;
        git_add(path, "next.txt")?;
        git_commit(path, "Next")?;
        git_stash(path, "initial.txt")?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux"])
            .arg(path)
            .assert()
            .success()
            .stdout(assertions::has_counter(1, icons::AHEAD))
            .stdout(assertions::has_counter(1, icons::STASHED))
            .stdout(predicate::str::contains(icons::DIVIDER));

        Ok(())
    }

    #[test]
    fn test_deleted_upstream_is_gone_after_forced_sync() -> anyhow::Result<()> {
        let repo = create_gone_upstream_repo("feature/login")?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux", "--remote-update"])
            .arg(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::has_icon(icons::GONE))
            .stdout(assertions::has_icon(icons::FEATURE))
            .stdout(predicate::str::contains("feature/").not())
            .stdout(assertions::lacks_icon(icons::FAILED));

        Ok(())
    }

    #[test]
    fn test_unreachable_remote_renders_failure_marker() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let missing = TempDir::new()?;
        git(
            &repo.path,
            &["remote", "add", "origin", &missing.path().join("gone.git").to_string_lossy()],
        )?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux"])
            .arg(&repo.path)
            .assert()
            .success()
            .stdout(assertions::single_line())
            .stdout(assertions::has_icon(icons::FAILED));

        Ok(())
    }

    #[test]
    fn test_tmux_markup() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["status", "--no-tmux=false"])
            .arg(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::is_tmux_markup())
            .stdout(predicate::str::contains("#[fg=colour120,bg=colour235]"));

        Ok(())
    }

    #[test]
    fn test_ansi_is_default_outside_tmux() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        env.command()?
            .arg("status")
            .arg(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::is_ansi());

        Ok(())
    }

    #[test]
    fn test_gst_alias_and_default_path() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["gst", "-t"])
            .current_dir(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::has_git_icon());

        Ok(())
    }

    #[test]
    fn test_repeated_refresh_is_stable() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        let first = env
            .command()?
            .args(["status", "-t"])
            .arg(&repo.clone.path)
            .output()?;
        let second = env
            .command()?
            .args(["status", "-t"])
            .arg(&repo.clone.path)
            .output()?;

        assert!(first.status.success());
        assert_eq!(first.stdout, second.stdout);
        assert!(env.cache_dir().join("git-status-bar").join("cache.db").exists());
        Ok(())
    }

    #[test]
    fn test_not_in_git_repo_is_silent() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let non_repo_path = temp_dir.path().join("not-a-repo");
        std::fs::create_dir(&non_repo_path)?;
        let env = TestEnv::new()?;

        env.command()?
            .arg("status")
            .arg(&non_repo_path)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_path_fails_without_output() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let env = TestEnv::new()?;

        env.command()?
            .arg("status")
            .arg(temp_dir.path().join("missing"))
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());

        Ok(())
    }

    #[test]
    fn test_malformed_config_fails() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;
        env.write_config("{ not json")?;

        env.command()?
            .arg("status")
            .arg(&repo.clone.path)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());

        Ok(())
    }

    #[test]
    fn test_debug_logs_go_to_log_file() -> anyhow::Result<()> {
        let repo = create_tracking_repo()?;
        let env = TestEnv::new()?;

        env.command()?
            .args(["--debug", "status", "-t"])
            .arg(&repo.clone.path)
            .assert()
            .success()
            .stdout(assertions::single_line())
            .stderr(predicate::str::is_empty());

        let log = std::fs::read_to_string(
            env.cache_dir()
                .join("git-status-bar")
                .join("git-status-bar.log"),
        )?;
        assert!(log.contains("Completed"));
        Ok(())
    }
}
