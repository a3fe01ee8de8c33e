use crate::auth::Credentials;
use crate::client::{create_rest_client, Config, USER_AGENT};
use crate::error::{ApiError, Result};
use crate::resource::DetailLevel;
use crate::response::{Param, Response};
use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Context for API requests
#[derive(Debug, Clone)]
pub struct ApiContext {
    /// HTTP client
    pub client: Client,
    /// Configuration
    pub config: Config,
    /// Signing credentials
    pub credentials: Credentials,
}

impl ApiContext {
    /// Create a new API context with default configuration
    pub fn new(credentials: Credentials) -> Self {
        ApiContext {
            client: create_rest_client(),
            config: Config::default(),
            credentials,
        }
    }

    /// Create a context configured entirely from the environment.
    ///
    /// Reads `ES_ACCESS_KEY`, `ES_SECRET_KEY` and (optionally) `ES_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        Ok(ApiContext {
            client: create_rest_client(),
            config: Config::from_env(),
            credentials: Credentials::from_env()?,
        })
    }

    /// Create a new API context with custom configuration
    pub fn with_config(credentials: Credentials, config: Config) -> Self {
        ApiContext {
            client: create_rest_client(),
            config,
            credentials,
        }
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Make a GET request
    pub fn get(&self, path: &str, params: &Param, details: DetailLevel) -> Result<Response> {
        self.do_request("GET", path, params, None, details)
    }

    /// Make a POST request with a JSON body
    pub fn post(&self, path: &str, body: &Value, details: DetailLevel) -> Result<Response> {
        self.do_request("POST", path, &Param::new(), Some(body), details)
    }

    /// Make a PUT request with a JSON body
    pub fn put(&self, path: &str, body: &Value, details: DetailLevel) -> Result<Response> {
        self.do_request("PUT", path, &Param::new(), Some(body), details)
    }

    /// Make a DELETE request
    pub fn delete(&self, path: &str, details: DetailLevel) -> Result<Response> {
        self.do_request("DELETE", path, &Param::new(), None, details)
    }

    /// Execute a signed API request and parse the JSON response
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, PUT, DELETE)
    /// * `path` - API resource path, e.g. `admin/ApiKey`
    /// * `query` - Query parameters
    /// * `body` - Request body for POST/PUT
    /// * `details` - Level of detail requested via `x-es-details`
    pub fn do_request(
        &self,
        method: &str,
        path: &str,
        query: &Param,
        body: Option<&Value>,
        details: DetailLevel,
    ) -> Result<Response> {
        let http_method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ApiError::Other(format!("invalid HTTP method: {}", method)))?;

        // Build URL with query parameters
        let mut url = Url::parse(&self.config.url_for(path))?;
        for (key, value) in query {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            url.query_pairs_mut().append_pair(key, &rendered);
        }

        // The signature covers the resource path, not the full URL
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let signature = self.credentials.sign(method, path, timestamp);

        let mut request = self
            .client
            .request(http_method, url.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("x-esauth-access", self.credentials.access_key.as_str())
            .header("x-esauth-timestamp", timestamp.to_string())
            .header("x-esauth-signature", signature)
            .header("x-es-details", details.as_str());

        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(serde_json::to_vec(body)?);
        }

        // Execute request
        let start = std::time::Instant::now();
        let http_response = request.send()?;
        let status = http_response.status();

        // Get x-es-requestid header
        let request_id = http_response
            .headers()
            .get("x-es-requestid")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Read response body
        let bytes = http_response.bytes()?;

        if self.config.debug {
            let duration = start.elapsed();
            eprintln!(
                "[rest] {} {} => {:?} (status: {})",
                method, path, duration, status
            );
        }

        if !status.is_success() {
            return Err(ApiError::from_error_body(
                status.as_u16(),
                &String::from_utf8_lossy(&bytes),
            ));
        }

        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(Response {
            status: status.as_u16(),
            data,
            request_id,
        })
    }
}
