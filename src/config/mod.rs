//! Configuration management for the gateway
//!
//! All configuration comes from the environment (a `.env` file is honored in
//! development); it is read once at startup and does not change within a
//! process lifetime.

pub mod models;

pub use models::*;

use crate::core::providers::hetrix::HetrixConfig;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream HetrixTools client configuration
    pub hetrix: HetrixConfig,
    /// Cache window configuration
    pub cache: CacheConfig,
    /// Resource stats display flags
    pub stats: StatsDisplayConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: std::env::var("STATUSGATE_HOST").unwrap_or(server_defaults.host),
            port: env_parse("STATUSGATE_PORT", server_defaults.port),
        };

        let hetrix = HetrixConfig::from_env();

        let cache_defaults = CacheConfig::default();
        let cache = CacheConfig {
            fresh_secs: env_parse("CACHE_FRESH_SECS", cache_defaults.fresh_secs),
            stale_secs: env_parse("CACHE_STALE_SECS", cache_defaults.stale_secs),
            cooldown_secs: env_parse("RATE_LIMIT_COOLDOWN_SECS", cache_defaults.cooldown_secs),
        };

        let stats = StatsDisplayConfig {
            system: env_bool("SHOW_SYSTEM_STATS", true),
            cpu: env_bool("SHOW_CPU_STATS", true),
            ram: env_bool("SHOW_RAM_STATS", true),
            disk: env_bool("SHOW_DISK_STATS", true),
            network: env_bool("SHOW_NETWORK_STATS", true),
        };

        let config = Self {
            server,
            hetrix,
            cache,
            stats,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::configuration(format!("Server config error: {}", e)))?;

        self.cache
            .validate()
            .map_err(|e| GatewayError::configuration(format!("Cache config error: {}", e)))?;

        self.hetrix
            .validate()
            .map_err(|e| GatewayError::configuration(format!("Upstream config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

/// Read and parse a variable, falling back to a default on absence or parse failure
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag
///
/// Unset means the default; anything other than a literal `true`
/// (case-insensitive) means `false`.
fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => value.eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}
