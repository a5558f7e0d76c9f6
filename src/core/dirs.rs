use crate::core::error::{Result, StatusBarError};
use std::path::PathBuf;

const APP_DIR: &str = "git-status-bar";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => xdg_or_home("XDG_CONFIG_HOME", ".config"),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join(APP_DIR))
        .ok_or(StatusBarError::DirectoryNotFound { kind: "config" })
}

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => xdg_or_home("XDG_CACHE_HOME", ".cache"),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|base| base.join(APP_DIR))
        .ok_or(StatusBarError::DirectoryNotFound { kind: "cache" })
}

// An empty XDG variable counts as unset
fn xdg_or_home(var: &str, fallback: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(fallback)))
}
