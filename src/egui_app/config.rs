use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::path::PathBuf;

/// Default backend URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4000";

/// Environment variable overriding the backend URL
const SERVER_URL_ENV: &str = "PROJECTHUB_API_URL";

/// Application configuration wrapper.
///
/// Resolution order for the backend URL: environment variable, then the
/// per-user config file, then the compiled-in default.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: resolve_app_config(),
        }
    }
}

impl Config {
    /// Create a new configuration with default resolution
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Location of the optional per-user config file
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("projecthub").join("config.toml"))
    }
}

fn resolve_app_config() -> AppConfig {
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        match AppConfig::builder().server_url(url).build() {
            Ok(app) => return app,
            Err(e) => tracing::warn!("ignoring {}: {}", SERVER_URL_ENV, e),
        }
    }

    if let Some(path) = Config::config_file_path() {
        if path.exists() {
            match AppConfig::load_from_file(&path) {
                Ok(app) => return app,
                Err(e) => tracing::warn!("ignoring config file {}: {}", path.display(), e),
            }
        }
    }

    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_api_url() {
        let config = Config::with_builder(
            AppConfig::builder().server_url("http://127.0.0.1:4000".to_string()),
        )
        .unwrap();
        let url = config.api_url("/auth/login");
        assert_eq!(url, "http://127.0.0.1:4000/auth/login");
    }

    #[test]
    fn test_with_builder_rejects_invalid_url() {
        let result = Config::with_builder(AppConfig::builder().server_url("nope".to_string()));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var(SERVER_URL_ENV, "http://backend.test:9000");
        let config = Config::new();
        assert_eq!(config.server_url(), "http://backend.test:9000");
        std::env::remove_var(SERVER_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_invalid_env_falls_back() {
        std::env::set_var(SERVER_URL_ENV, "not-a-url");
        let config = Config::new();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        std::env::remove_var(SERVER_URL_ENV);
    }
}
