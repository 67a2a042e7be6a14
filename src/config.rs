//! Configuration management for the library console

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// API key sent as both `apikey` and bearer token
    pub key: String,
    pub schema: String,
    /// Per-request timeout in seconds, 0 disables it
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Write logs to this file instead of stderr
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables (with prefix LIBRARY_, nested keys split on __)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("store.url", env::var("SUPABASE_URL").ok())?
            .set_override_option("store.key", env::var("SUPABASE_KEY").ok())?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.store.validate()?;
        Ok(config)
    }
}

impl StoreConfig {
    /// Both the address and the credential are required to reach the store
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "SUPABASE_URL is not set (store.url)".to_string(),
            ));
        }
        if self.key.trim().is_empty() {
            return Err(ConfigError::Message(
                "SUPABASE_KEY is not set (store.key)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            schema: "public".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.schema, "public");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut store = StoreConfig::default();
        let err = store.validate().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));

        store.url = "https://example.supabase.co".to_string();
        let err = store.validate().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));

        store.key = "anon-key".to_string();
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_source() {
        let config = Config::builder()
            .set_override("store.url", "https://example.supabase.co")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap();

        let config: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(config.store.url, "https://example.supabase.co");
        assert_eq!(config.store.schema, "public");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}
