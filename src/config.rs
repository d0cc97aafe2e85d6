use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub geolocation: GeolocationSettings,
    #[serde(default)]
    pub filtering: FilteringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Upstream volunteer REST API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 { 60 }
fn default_cache_max_entries() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationSettings {
    #[serde(default = "default_geolocation_timeout_ms")]
    pub timeout_ms: u64,
}

impl GeolocationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_geolocation_timeout_ms(),
        }
    }
}

fn default_geolocation_timeout_ms() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct FilteringSettings {
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl Default for FilteringSettings {
    fn default() -> Self {
        Self {
            max_radius_km: default_max_radius_km(),
        }
    }
}

fn default_max_radius_km() -> f64 { 500.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VOLUNTEER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VOLUNTEER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VOLUNTEER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VOLUNTEER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Shorthand overrides used by deployments
///
/// `VOLUNTEER_API_URL` replaces `api.base_url`.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = std::env::var("VOLUNTEER_API_URL") {
        builder = builder.set_override("api.base_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CacheSettings::default().ttl_secs, 60);
        assert_eq!(GeolocationSettings::default().timeout(), Duration::from_secs(10));
        assert_eq!(FilteringSettings::default().max_radius_km, 500.0);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_load_shipped_config() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.api.base_url.is_empty());
        assert_eq!(settings.api.timeout(), Duration::from_secs(30));
    }
}
