//! Configuration models
//!
//! Typed configuration sections with serde defaults. Values come from the
//! environment via [`crate::config::Config::from_env`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Cache window configuration, in seconds
///
/// The three windows drive the fetcher's serving decision: data younger than
/// `fresh_secs` is served without an upstream call, data younger than
/// `stale_secs` is served while a background refresh runs, and after a
/// rate-limit failure no upstream call is attempted for `cooldown_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Fresh window: serve cached data with no side effects
    #[serde(default = "default_fresh_secs")]
    pub fresh_secs: u64,
    /// Stale window: serve cached data, revalidate in the background
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    /// Cooldown after a rate-limit failure before retrying upstream
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fresh_secs: default_fresh_secs(),
            stale_secs: default_stale_secs(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl CacheConfig {
    /// Fresh window as a duration
    pub fn fresh(&self) -> Duration {
        Duration::from_secs(self.fresh_secs)
    }

    /// Stale window as a duration
    pub fn stale(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    /// Rate-limit cooldown as a duration
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.stale_secs < self.fresh_secs {
            return Err(format!(
                "Stale window ({}s) cannot be shorter than fresh window ({}s)",
                self.stale_secs, self.fresh_secs
            ));
        }
        Ok(())
    }
}

/// Display flags for the server resource stats sections
///
/// Read once at startup. `system` gates the stats endpoint entirely; the
/// per-category flags blank individual fields of the stats payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDisplayConfig {
    /// Master switch for the stats endpoint
    #[serde(default = "default_true")]
    pub system: bool,
    /// Show CPU usage
    #[serde(default = "default_true")]
    pub cpu: bool,
    /// Show RAM usage
    #[serde(default = "default_true")]
    pub ram: bool,
    /// Show disk usage
    #[serde(default = "default_true")]
    pub disk: bool,
    /// Show network throughput
    #[serde(default = "default_true")]
    pub network: bool,
}

impl Default for StatsDisplayConfig {
    fn default() -> Self {
        Self {
            system: true,
            cpu: true,
            ram: true,
            disk: true,
            network: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_fresh_secs() -> u64 {
    30
}

fn default_stale_secs() -> u64 {
    300
}

fn default_cooldown_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
        };
        assert_eq!(config.address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_server_config_rejects_port_zero() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.fresh(), Duration::from_secs(30));
        assert_eq!(config.stale(), Duration::from_secs(300));
        assert_eq!(config.cooldown(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cache_config_rejects_inverted_windows() {
        let config = CacheConfig {
            fresh_secs: 600,
            stale_secs: 300,
            cooldown_secs: 60,
        };
        assert!(config.validate().is_err());
    }
}
