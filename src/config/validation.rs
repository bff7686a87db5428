use crate::error::AppError;
use reqwest::Url;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL must be an absolute http(s) URL
/// - Share base URL must be an absolute URL
/// - HTTP timeout must be at least one second
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
/// - Storage and export directories, when set, cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_api_base_url(&config.api_base_url)?;

    Url::parse(&config.share_base_url).map_err(|e| {
        AppError::config_error(format!(
            "Share base URL '{}' is not a valid URL: {e}",
            config.share_base_url
        ))
    })?;

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    for (name, dir) in [
        ("Storage directory", &config.storage_dir),
        ("Export directory", &config.export_dir),
    ] {
        if dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
            return Err(AppError::config_error(format!("{name} cannot be empty")));
        }
    }

    Ok(())
}

fn validate_api_base_url(api_base_url: &str) -> Result<(), AppError> {
    if api_base_url.is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }

    let url = Url::parse(api_base_url).map_err(|e| {
        AppError::config_error(format!("API base URL '{api_base_url}' is not a valid URL: {e}"))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::config_error(
            "API base URL must start with http:// or https://",
        ));
    }
    Ok(())
}
