use std::env;
use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Environment variable overriding the log file location.
pub const LOG_PATH_ENV: &str = "TIERNAV_LOG_PATH";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Reads a path from `var`, ignoring unset or blank values.
pub fn env_path(var: &str) -> Option<PathBuf> {
    let value = env::var(var).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| expand_tilde(trimmed))
}

/// Log file path: `TIERNAV_LOG_PATH`, else `<data dir>/tiernav/tiernav.log`.
pub fn default_log_path() -> PathBuf {
    env_path(LOG_PATH_ENV).unwrap_or_else(|| {
        data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tiernav")
            .join("tiernav.log")
    })
}
