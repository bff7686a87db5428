use std::path::{Path, PathBuf};

use crate::constants::APP_DIR_NAME;

fn config_base_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

fn data_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    config_base_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    config_base_dir()
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Default root of the local key/value store, e.g.
/// `~/.local/share/lineup_builder/storage` on Linux.
pub fn get_default_storage_dir() -> PathBuf {
    data_base_dir().join("storage")
}

/// Default directory for exported pitch captures.
pub fn get_default_export_dir() -> PathBuf {
    data_base_dir().join("exports")
}
