//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use reqwest::Url;
use tracing::Level;

/// Where the service is reached when `API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Scheme, host and port of the service, without a trailing slash.
    pub base_url: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url)
            .map_err(|reason| ConfigError::InvalidValue("API_BASE_URL".to_string(), reason))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            base_url,
            log_level,
        })
    }

    /// Returns a copy pointing at a different service host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)
            .map_err(|reason| ConfigError::InvalidValue("--base-url".to_string(), reason))?;
        Ok(self)
    }
}

/// Checks that the value is an absolute http(s) URL and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| format!("'{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            Config::from_lookup(lookup_from(&[("API_BASE_URL", "https://its.example.edu/")]))
                .unwrap();
        assert_eq!(config.base_url, "https://its.example.edu");
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("API_BASE_URL", "ftp://files.example")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "API_BASE_URL"));
    }

    #[test]
    fn unparsable_log_level_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn base_url_override_is_validated() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.clone().with_base_url("not a url").is_err());
        assert_eq!(
            config.with_base_url("http://127.0.0.1:9000/").unwrap().base_url,
            "http://127.0.0.1:9000"
        );
    }
}
