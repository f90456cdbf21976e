//! # Configuration
//!
//! Application configuration loaded through the `config` crate.
//!
//! Sources are layered in order:
//! 1. Built-in defaults (every section is optional)
//! 2. An optional TOML file
//! 3. Environment variables prefixed with `GETPRODUCT`, nested with `__`
//!    (e.g. `GETPRODUCT__SERVER__PORT=9000`)
//!
//! # Examples
//!
//! ```
//! use getproduct::config::{AppConfig, CacheBackend};
//!
//! let config = AppConfig::from_toml(r#"
//!     [server]
//!     port = 9000
//!
//!     [cache]
//!     backend = "memory"
//! "#).unwrap();
//!
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.cache.backend, CacheBackend::Memory);
//! assert!(config.providers.mock);
//! ```

use crate::application::services::DEFAULT_CEILING_MS;
use crate::domain::entities::Product;
use crate::infrastructure::cache::redis_cache::DEFAULT_KEY_PREFIX;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Prefix of environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "GETPRODUCT";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "GETPRODUCT_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum AppConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration was read but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfigError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type for configuration loading.
pub type AppConfigResult<T> = Result<T, AppConfigError>;

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Enables verbose diagnostics.
    pub debug: bool,
    /// Version reported in the `Server` header and health endpoint.
    pub version: String,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Aggregation limits.
    pub lookup: LookupConfig,
    /// Tracing output.
    pub log: LogConfig,
    /// Local product cache.
    pub cache: CacheConfig,
    /// Product providers to register at startup.
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            server: ServerConfig::default(),
            lookup: LookupConfig::default(),
            log: LogConfig::default(),
            cache: CacheConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub address: String,
    /// Bind port.
    pub port: u16,
    /// Per-request lookup deadline in milliseconds. Unset means only the
    /// lookup ceiling applies.
    pub request_timeout_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_ms: None,
        }
    }
}

impl ServerConfig {
    /// Returns `address:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Returns the per-request deadline, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Aggregation limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Upper bound on every lookup in milliseconds.
    pub ceiling_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            ceiling_ms: DEFAULT_CEILING_MS,
        }
    }
}

/// Tracing output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Which cache backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// No cache; `get_best` always queries providers.
    #[default]
    None,
    /// Process-local map.
    Memory,
    /// Shared Redis instance.
    Redis,
}

/// Local product cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend selection.
    pub backend: CacheBackend,
    /// Redis connection URL, required for the Redis backend.
    pub redis_url: Option<String>,
    /// Prefix of Redis keys.
    pub key_prefix: String,
    /// Expiry of cached entries in seconds. Unset means entries never expire.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::None,
            redis_url: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl_secs: None,
        }
    }
}

impl CacheConfig {
    /// Returns the entry expiry, if configured.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

/// Providers registered at startup, in this order: mock, catalogs, HTTP.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Register the built-in mock provider.
    pub mock: bool,
    /// Fixed in-memory catalogs.
    pub catalog: Vec<CatalogProviderConfig>,
    /// Remote JSON catalogs.
    pub http: Vec<HttpProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            mock: true,
            catalog: Vec::new(),
            http: Vec::new(),
        }
    }
}

/// A fixed product list served by a static catalog provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProviderConfig {
    /// Provider name used in logs.
    pub name: String,
    /// Products keyed by their barcode.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A remote catalog queried over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpProviderConfig {
    /// Provider name used in logs.
    pub name: String,
    /// Base URL; the barcode is appended as the last path segment.
    pub base_url: String,
    /// Client timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_http_timeout_ms() -> u64 {
    5_000
}

impl AppConfig {
    /// Loads configuration from the optional file at `path` and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `AppConfigError::Load` if a source cannot be read or parsed,
    /// and `AppConfigError::Invalid` if [`validate`](Self::validate) fails.
    pub fn load(path: Option<&Path>) -> AppConfigResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        Self::finish(builder.add_source(environment()))
    }

    /// Loads configuration from a TOML document only.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn from_toml(toml: &str) -> AppConfigResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> AppConfigResult<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `AppConfigError::Invalid` describing the first violation.
    pub fn validate(&self) -> AppConfigResult<()> {
        if self.server.port == 0 {
            return Err(AppConfigError::invalid("server.port must be non-zero"));
        }
        if self.server.request_timeout_ms == Some(0) {
            return Err(AppConfigError::invalid(
                "server.request_timeout_ms must be non-zero when set",
            ));
        }
        if self.lookup.ceiling_ms == 0 {
            return Err(AppConfigError::invalid("lookup.ceiling_ms must be non-zero"));
        }
        if self.cache.backend == CacheBackend::Redis
            && self.cache.redis_url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            return Err(AppConfigError::invalid(
                "cache.redis_url is required for the redis backend",
            ));
        }
        for catalog in &self.providers.catalog {
            if catalog.name.trim().is_empty() {
                return Err(AppConfigError::invalid("providers.catalog.name must not be empty"));
            }
        }
        for http in &self.providers.http {
            if http.name.trim().is_empty() {
                return Err(AppConfigError::invalid("providers.http.name must not be empty"));
            }
            if http.timeout_ms == 0 {
                return Err(AppConfigError::invalid(format!(
                    "providers.http.timeout_ms of {} must be non-zero",
                    http.name
                )));
            }
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert!(!config.debug);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout(), None);
        assert_eq!(config.lookup.ceiling_ms, 10_000);
        assert_eq!(config.cache.backend, CacheBackend::None);
        assert_eq!(config.cache.key_prefix, DEFAULT_KEY_PREFIX);
        assert!(config.providers.mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn full_document() {
        let config = AppConfig::from_toml(
            r#"
            debug = true
            version = "2.0.0"

            [server]
            address = "127.0.0.1"
            port = 9000
            request_timeout_ms = 3000

            [lookup]
            ceiling_ms = 2500

            [log]
            filter = "getproduct=debug"
            json = true

            [cache]
            backend = "redis"
            redis_url = "redis://localhost:6379"
            ttl_secs = 600

            [providers]
            mock = false

            [[providers.catalog]]
            name = "shelf"
            products = [
                { barcode = "4601234567890", name = "Milk", unit = "l" },
            ]

            [[providers.http]]
            name = "remote"
            base_url = "http://catalog.local/products"
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.version, "2.0.0");
        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.lookup.ceiling_ms, 2500);
        assert!(config.log.json);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.ttl(), Some(Duration::from_secs(600)));
        assert!(!config.providers.mock);

        let shelf = &config.providers.catalog[0];
        assert_eq!(shelf.name, "shelf");
        assert_eq!(shelf.products[0].name(), "Milk");
        assert_eq!(shelf.products[0].description(), "");

        let remote = &config.providers.http[0];
        assert_eq!(remote.base_url, "http://catalog.local/products");
        assert_eq!(remote.timeout_ms, 5_000);
    }

    #[test]
    fn environment_overrides_file() {
        let env: config::Map<String, String> = [
            ("GETPRODUCT__SERVER__PORT", "9100"),
            ("GETPRODUCT__CACHE__BACKEND", "memory"),
            ("GETPRODUCT__LOOKUP__CEILING_MS", "1500"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let builder = Config::builder()
            .add_source(File::from_str("[server]\nport = 9000\n", FileFormat::Toml))
            .add_source(environment().source(Some(env)));
        let config = AppConfig::finish(builder).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.lookup.ceiling_ms, 1500);
    }

    #[test]
    fn rejects_zero_port() {
        let result = AppConfig::from_toml("[server]\nport = 0\n");
        assert!(matches!(result, Err(AppConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_ceiling() {
        let result = AppConfig::from_toml("[lookup]\nceiling_ms = 0\n");
        assert!(matches!(result, Err(AppConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_redis_without_url() {
        let result = AppConfig::from_toml("[cache]\nbackend = \"redis\"\n");
        assert!(matches!(result, Err(AppConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = AppConfig::from_toml("[cache]\nbackend = \"disk\"\n");
        assert!(matches!(result, Err(AppConfigError::Load(_))));
    }

    #[test]
    fn rejects_blank_catalog_barcode() {
        let result = AppConfig::from_toml(
            "[[providers.catalog]]\nname = \"shelf\"\nproducts = [{ barcode = \" \" }]\n",
        );
        assert!(matches!(result, Err(AppConfigError::Load(_))));
    }
}
