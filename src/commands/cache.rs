use crate::core::{
    config::Settings,
    error::Result,
    output::{format_age, print_info, print_section_header, print_success, sync_marker},
    store::{CacheStore, CachedRepository},
};
use chrono::{DateTime, Utc};
use colored::*;

pub fn execute_cache_show(settings: &Settings) -> Result<()> {
    let store = CacheStore::open(&settings.cache_file()?)?;
    let entries = store.entries()?;
    store.close()?;

    if entries.is_empty() {
        print_info("Cache is empty");
        return Ok(());
    }

    print_section_header("Cached repositories");
    let now = Utc::now();
    for entry in &entries {
        println!("{}", format_entry(entry, now));
    }
    println!();
    Ok(())
}

pub fn execute_cache_clear(settings: &Settings) -> Result<()> {
    let cache_file = settings.cache_file()?;
    let store = CacheStore::open(&cache_file)?;
    let removed = store.clear()?;
    store.close()?;

    log::debug!("Cleared {removed} row(s) from {}", cache_file.display());
    print_success(&format!("Removed {removed} cached entries"));
    Ok(())
}

fn format_entry(entry: &CachedRepository, now: DateTime<Utc>) -> String {
    let snapshot = match entry.snapshot_written_at {
        Some(written_at) => format!("snapshot {} ago", format_age(now - written_at)),
        None => "no snapshot".to_string(),
    };
    let remote = match entry.remote {
        Some((success, synced_at)) => format!(
            "remote {} {} ago",
            sync_marker(success),
            format_age(now - synced_at)
        ),
        None => "remote never synced".to_string(),
    };

    format!(
        "  {}  {}  {}",
        entry.path.display().to_string().white(),
        snapshot.bright_black(),
        remote.bright_black()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::RepoId;
    use chrono::TimeDelta;
    use std::path::PathBuf;

    #[test]
    fn test_format_entry() {
        let now = Utc::now();
        let path = PathBuf::from("/work/project");
        let entry = CachedRepository {
            id: RepoId::from_path(&path),
            path,
            snapshot_written_at: Some(now - TimeDelta::seconds(3)),
            remote: Some((false, now - TimeDelta::minutes(12))),
        };

        let line = format_entry(&entry, now);
        assert!(line.contains("/work/project"));
        assert!(line.contains("snapshot 3s ago"));
        assert!(line.contains("12m ago"));
        assert!(line.contains('✕'));
    }

    #[test]
    fn test_format_entry_without_records() {
        let path = PathBuf::from("/work/project");
        let entry = CachedRepository {
            id: RepoId::from_path(&path),
            path,
            snapshot_written_at: None,
            remote: None,
        };

        let line = format_entry(&entry, Utc::now());
        assert!(line.contains("no snapshot"));
        assert!(line.contains("remote never synced"));
    }
}
