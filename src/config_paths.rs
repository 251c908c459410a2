//! Where dockyard keeps its files
//!
//! Everything lives in one per-user directory (`$XDG_CONFIG_HOME/dockyard`,
//! `~/.config/dockyard` or `%APPDATA%\dockyard`):
//! - `config.yaml` holds [`DockConfig`](crate::config::DockConfig)
//! - `layout.json` is the layout used when no file is named
//! - `logs/` receives the daily log files

use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "dockyard";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "dockyard.log";

/// Per-user dockyard directory, if the platform has a config location
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }

    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir().map(|home| home.join(".config"));
    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();

    base.map(|dir| dir.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Layout loaded and saved when the user names no file
pub fn default_layout_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("layout.json"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
