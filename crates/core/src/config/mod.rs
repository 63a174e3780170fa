//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (VOCABFILL_*)
//! 2. TOML config file (if VOCABFILL_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (VOCABFILL_*)
/// 2. TOML config file (if VOCABFILL_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scheme and host of the vocabulary site.
    ///
    /// Set via VOCABFILL_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via VOCABFILL_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via VOCABFILL_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to read from a vocabulary page.
    ///
    /// Set via VOCABFILL_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Prefix put in front of the JLPT code when tagging notes.
    ///
    /// Set via VOCABFILL_TAG_PREFIX environment variable.
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Number of lookups a batch fill runs at once.
    ///
    /// Set via VOCABFILL_BATCH_CONCURRENCY environment variable.
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

fn default_base_url() -> String {
    "https://bunpro.jp".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; vocabfill/0.1; Bunpro vocab fetch)".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_tag_prefix() -> String {
    "JLPT_".into()
}

fn default_batch_concurrency() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            tag_prefix: default_tag_prefix(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `VOCABFILL_`
    /// 2. TOML file from `VOCABFILL_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack `load` extracts from.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("VOCABFILL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("VOCABFILL_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://bunpro.jp");
        assert!(config.user_agent.contains("vocabfill"));
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.tag_prefix, "JLPT_");
        assert_eq!(config.batch_concurrency, 4);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VOCABFILL_TIMEOUT_MS", "2500");
            jail.set_env("VOCABFILL_TAG_PREFIX", "jlpt::");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.timeout_ms, 2500);
            assert_eq!(config.tag_prefix, "jlpt::");
            assert_eq!(config.base_url, "https://bunpro.jp");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("vocabfill.toml", "base_url = \"http://localhost:8080\"\nbatch_concurrency = 2\n")?;
            jail.set_env("VOCABFILL_CONFIG_FILE", "vocabfill.toml");
            jail.set_env("VOCABFILL_BATCH_CONCURRENCY", "8");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.base_url, "http://localhost:8080");
            assert_eq!(config.batch_concurrency, 8);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VOCABFILL_TIMEOUT_MS", "10");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unparseable_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VOCABFILL_TIMEOUT_MS", "soon");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
            Ok(())
        });
    }
}
