//! Application configuration with layered loading.
//!
//! Configuration is assembled with figment from multiple sources:
//!
//! 1. Environment variables (FRONTPAGES_*)
//! 2. TOML config file (if FRONTPAGES_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
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
/// 1. Environment variables (FRONTPAGES_*)
/// 2. TOML config file (if FRONTPAGES_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the upstream aggregator site.
    ///
    /// Set via FRONTPAGES_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path to the JSON URL store.
    ///
    /// Set via FRONTPAGES_STORE_PATH environment variable.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Path to the legacy list-of-paths companion file.
    ///
    /// Set via FRONTPAGES_LEGACY_STORE_PATH environment variable.
    #[serde(default = "default_legacy_store_path")]
    pub legacy_store_path: PathBuf,

    /// User-Agent string for direct HTTP requests.
    ///
    /// Set via FRONTPAGES_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Direct HTTP request timeout in milliseconds (CLI path).
    ///
    /// Set via FRONTPAGES_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Browser navigation timeout for single image fetches, in milliseconds.
    ///
    /// Set via FRONTPAGES_BROWSER_TIMEOUT_MS environment variable.
    #[serde(default = "default_browser_timeout_ms")]
    pub browser_timeout_ms: u64,

    /// Browser navigation timeout during listing scrapes, in milliseconds.
    ///
    /// Set via FRONTPAGES_SCRAPE_TIMEOUT_MS environment variable.
    #[serde(default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,

    /// How long to let page scripts settle before scanning images, in
    /// milliseconds.
    ///
    /// Set via FRONTPAGES_SETTLE_MS environment variable.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Local hour (0-23) of the daily scheduled re-scrape.
    ///
    /// Set via FRONTPAGES_SCRAPE_HOUR environment variable.
    #[serde(default = "default_scrape_hour")]
    pub scrape_hour: u32,

    /// Local minute (0-59) of the daily scheduled re-scrape.
    ///
    /// Set via FRONTPAGES_SCRAPE_MINUTE environment variable.
    #[serde(default)]
    pub scrape_minute: u32,

    /// Bind address for the HTTP server.
    ///
    /// Set via FRONTPAGES_HTTP_ADDR environment variable.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
}

fn default_base_url() -> String {
    "https://www.frontpages.com".into()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./frontpageurls.json")
}

fn default_legacy_store_path() -> PathBuf {
    PathBuf::from("./frontpageurls.py")
}

fn default_user_agent() -> String {
    "frontpages/0.1".into()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_browser_timeout_ms() -> u64 {
    30_000
}

fn default_scrape_timeout_ms() -> u64 {
    45_000
}

fn default_settle_ms() -> u64 {
    2_000
}

fn default_scrape_hour() -> u32 {
    10
}

fn default_http_addr() -> String {
    "0.0.0.0:5000".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            store_path: default_store_path(),
            legacy_store_path: default_legacy_store_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            browser_timeout_ms: default_browser_timeout_ms(),
            scrape_timeout_ms: default_scrape_timeout_ms(),
            settle_ms: default_settle_ms(),
            scrape_hour: default_scrape_hour(),
            scrape_minute: 0,
            http_addr: default_http_addr(),
        }
    }
}

impl AppConfig {
    /// Direct HTTP timeout as a Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or parsed, or if
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FRONTPAGES_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("FRONTPAGES_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

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
        assert_eq!(config.base_url, "https://www.frontpages.com");
        assert_eq!(config.store_path, PathBuf::from("./frontpageurls.json"));
        assert_eq!(config.legacy_store_path, PathBuf::from("./frontpageurls.py"));
        assert_eq!(config.timeout_ms, 5_000);
        assert_eq!(config.browser_timeout_ms, 30_000);
        assert_eq!(config.scrape_timeout_ms, 45_000);
        assert_eq!(config.settle_ms, 2_000);
        assert_eq!(config.scrape_hour, 10);
        assert_eq!(config.scrape_minute, 0);
        assert_eq!(config.http_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(5_000));
    }
}
