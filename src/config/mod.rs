use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_SHARE_BASE_URL};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_export_dir, get_default_storage_dir, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the player API, without a trailing `/players`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Page that share links point at. The `lineup` query parameter is
    /// appended to it.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Root of the local key/value store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<String>,
    /// Where exported pitch captures are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            share_base_url: default_share_base_url(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
            storage_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file yields the defaults; nothing is written.
    /// Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `LINEUP_API_BASE_URL` - Override API base URL
    /// - `LINEUP_SHARE_BASE_URL` - Override share link base URL
    /// - `LINEUP_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `LINEUP_LOG_FILE` - Override log file path
    /// - `LINEUP_STORAGE_DIR` - Override local store directory
    /// - `LINEUP_EXPORT_DIR` - Override export directory
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - The file could not be read, parsed or validated
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            debug!("No config file at {config_path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `LINEUP_*` environment variables on top of the current values.
    /// Unparseable timeouts are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_base_url) = std::env::var("LINEUP_API_BASE_URL") {
            self.api_base_url = api_base_url;
        }

        if let Ok(share_base_url) = std::env::var("LINEUP_SHARE_BASE_URL") {
            self.share_base_url = share_base_url;
        }

        if let Some(timeout) = std::env::var("LINEUP_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(log_file_path) = std::env::var("LINEUP_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }

        if let Ok(storage_dir) = std::env::var("LINEUP_STORAGE_DIR") {
            self.storage_dir = Some(storage_dir);
        }

        if let Ok(export_dir) = std::env::var("LINEUP_EXPORT_DIR") {
            self.export_dir = Some(export_dir);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Directory of the local key/value store, configured or default.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_default_storage_dir)
    }

    /// Directory exports are written to, configured or default.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_default_export_dir)
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and the effective settings
    /// - Without a config file the defaults (plus environment overrides) are shown
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let file_exists = Path::new(&config_path).exists();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !file_exists {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", config.api_base_url);
        println!("────────────────────────────────────");
        println!("Share Base URL:");
        println!("{}", config.share_base_url);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Storage Directory:");
        println!("{}", config.storage_dir().display());
        println!("────────────────────────────────────");
        println!("Export Directory:");
        println!("{}", config.export_dir().display());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", crate::constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path. Environment overrides
    /// are not applied.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
