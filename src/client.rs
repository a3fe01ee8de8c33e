use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent with every request; also part of the signed string.
pub const USER_AGENT: &str = concat!("enstratus-rs/", env!("CARGO_PKG_VERSION"));

/// Default API endpoint, including the API version path
pub const DEFAULT_ENDPOINT: &str = "https://api.enstratus.com/api/enstratus/2012-06-15";

/// Create the default HTTP client for API requests
/// with optimized settings for connection pooling and timeouts
pub fn create_rest_client() -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint URL, including the API version path
    pub endpoint: String,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Config {
            endpoint: endpoint.into(),
            debug: false,
        }
    }

    /// Create a configuration from the environment.
    ///
    /// `ES_ENDPOINT` overrides the default endpoint.
    pub fn from_env() -> Self {
        match std::env::var("ES_ENDPOINT") {
            Ok(endpoint) if !endpoint.is_empty() => Config::new(endpoint),
            _ => Config::default(),
        }
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get the full URL for an API resource path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.debug);
    }

    #[test]
    fn test_url_for_joins_slashes() {
        let config = Config::new("http://localhost:8080/api/");
        assert_eq!(
            config.url_for("/admin/ApiKey"),
            "http://localhost:8080/api/admin/ApiKey"
        );
        assert_eq!(
            config.url_for("admin/ApiKey/ABCDEF"),
            "http://localhost:8080/api/admin/ApiKey/ABCDEF"
        );
    }
}
