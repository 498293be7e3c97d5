//! HetrixTools client configuration

use std::env;

/// Default v3 API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.hetrixtools.com/v3";

/// Configuration for the HetrixTools API client
#[derive(Debug, Clone)]
pub struct HetrixConfig {
    /// Bearer token for the v3 API; absence is a fatal configuration error
    pub api_token: Option<String>,
    /// Base URL, overridable for self-hosted proxies and tests
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for HetrixConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}

impl HetrixConfig {
    /// Create a config with the given token and defaults for everything else
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            ..Default::default()
        }
    }

    /// Load from the environment
    ///
    /// A missing token is not an error here; it is caught by `validate` so
    /// startup can report every configuration problem through one path.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.api_token = env::var("HETRIX_API_TOKEN").ok();

        if let Ok(base_url) = env::var("HETRIX_API_URL") {
            config.base_url = base_url;
        }

        config
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), String> {
        match &self.api_token {
            None => Err("HETRIX_API_TOKEN environment variable is not configured".to_string()),
            Some(token) if token.is_empty() => {
                Err("HETRIX_API_TOKEN must not be empty".to_string())
            }
            Some(_) => Ok(()),
        }
    }
}
