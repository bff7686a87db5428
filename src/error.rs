use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    /// The API answered 200 but listed errors in its payload.
    #[error("API reported an error: {message}")]
    ApiReported { message: String },

    #[error(
        "API key not configured. Set API_FOOTBALL_KEY or run with --set-api-key <KEY>"
    )]
    MissingApiKey,

    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Invalid share link: {0}")]
    ShareLink(String),

    #[error("Invalid share token encoding: {0}")]
    ShareEncoding(#[from] base64::DecodeError),

    #[error("Stored value for '{key}' is corrupt: {message}")]
    StorageCorrupt { key: String, message: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an error for a payload-embedded API error list
    pub fn api_reported(message: impl Into<String>) -> Self {
        Self::ApiReported {
            message: message.into(),
        }
    }

    pub fn share_link(msg: impl Into<String>) -> Self {
        Self::ShareLink(msg.into())
    }

    pub fn storage_corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageCorrupt {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn export_error(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Check if the error came from talking to the player API, as opposed to
    /// local configuration or storage problems.
    pub fn is_retrieval_error(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::ApiNotFound { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiRateLimit { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiMalformedJson { .. }
                | AppError::ApiUnexpectedStructure { .. }
                | AppError::ApiNoData { .. }
                | AppError::ApiReported { .. }
                | AppError::MissingApiKey
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::ApiNotFound { .. } => Some(404),
            AppError::ApiRateLimit { .. } => Some(429),
            AppError::ApiServerError { status, .. }
            | AppError::ApiClientError { status, .. }
            | AppError::ApiServiceUnavailable { status, .. } => Some(*status),
            AppError::ApiFetch(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/players");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/players"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal Server Error", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal Server Error (URL: https://api.example.com)"
        );
        assert_eq!(error.status_code(), Some(500));
    }

    #[test]
    fn test_api_client_error_helper() {
        let error = AppError::api_client_error(403, "Forbidden", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API client error (403): Forbidden (URL: https://api.example.com)"
        );
        assert_eq!(error.status_code(), Some(403));
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too Many Requests", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too Many Requests (URL: https://api.example.com)"
        );
        assert_eq!(error.status_code(), Some(429));
    }

    #[test]
    fn test_api_reported_helper() {
        let error = AppError::api_reported("Your subscription does not allow this season");
        assert_eq!(
            error.to_string(),
            "API reported an error: Your subscription does not allow this season"
        );
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_missing_api_key_message_mentions_env_var() {
        let message = AppError::MissingApiKey.to_string();
        assert!(message.contains("API_FOOTBALL_KEY"));
    }

    #[test]
    fn test_storage_corrupt_helper() {
        let error = AppError::storage_corrupt("savedLineups", "expected value at line 1");
        assert_eq!(
            error.to_string(),
            "Stored value for 'savedLineups' is corrupt: expected value at line 1"
        );
    }

    #[test]
    fn test_is_retrieval_error() {
        assert!(AppError::MissingApiKey.is_retrieval_error());
        assert!(AppError::network_timeout("url").is_retrieval_error());
        assert!(AppError::network_connection("url", "refused").is_retrieval_error());
        assert!(AppError::api_service_unavailable(503, "down", "url").is_retrieval_error());
        assert!(AppError::api_reported("bad token").is_retrieval_error());
        assert!(AppError::api_no_data("empty", "url").is_retrieval_error());

        assert!(!AppError::config_error("message").is_retrieval_error());
        assert!(!AppError::share_link("bad").is_retrieval_error());
        assert!(!AppError::export_error("failed").is_retrieval_error());
        assert!(!AppError::UnknownFormation("9-9-9".to_string()).is_retrieval_error());
    }

    #[test]
    fn test_error_from_reqwest() {
        let client = reqwest::Client::new();
        let request_result = client.get("not a valid url").build();

        match request_result {
            Err(reqwest_error) => {
                let app_error: AppError = reqwest_error.into();
                assert!(matches!(app_error, AppError::ApiFetch(_)));
            }
            Ok(_) => panic!("Expected an error from invalid URL"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::ApiParse(_)));
    }

    #[test]
    fn test_error_from_base64() {
        use base64::Engine;
        let decode_error = base64::engine::general_purpose::STANDARD
            .decode("@@not base64@@")
            .unwrap_err();
        let app_error: AppError = decode_error.into();
        assert!(matches!(app_error, AppError::ShareEncoding(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let invalid_toml = "invalid = [toml";
        let toml_error = toml::from_str::<serde_json::Value>(invalid_toml).unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_error_display_formats() {
        let errors = vec![
            AppError::config_error("test config error"),
            AppError::log_setup_error("test log error"),
            AppError::api_not_found("https://example.com"),
            AppError::api_server_error(500, "server error", "https://example.com"),
            AppError::api_client_error(400, "client error", "https://example.com"),
            AppError::api_rate_limit("rate limit", "https://example.com"),
            AppError::api_service_unavailable(503, "unavailable", "https://example.com"),
            AppError::network_timeout("https://example.com"),
            AppError::network_connection("https://example.com", "connection failed"),
            AppError::api_malformed_json("bad json", "https://example.com"),
            AppError::api_unexpected_structure("bad structure", "https://example.com"),
            AppError::api_no_data("no data", "https://example.com"),
            AppError::api_reported("token invalid"),
            AppError::MissingApiKey,
            AppError::UnknownFormation("5-5-0".to_string()),
            AppError::share_link("missing lineup parameter"),
            AppError::storage_corrupt("savedLineups", "eof"),
            AppError::export_error("disk full"),
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(
                display_string.len() > 5,
                "Error display should be descriptive: {error:?}"
            );
        }
    }
}
