use thiserror::Error;

/// Main error type for enStratus API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error returned by the enStratus API endpoint
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// HTTP transport error
    #[error("HTTP error {status}: {body}")]
    Http {
        status: u16,
        body: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Assignment attempted on a lazy attribute with no declared writer
    #[error("attribute `{0}` is read-only")]
    ImmutableAttribute(&'static str),

    /// `load()` completed without populating the requested attribute
    #[error("attribute `{0}` was not populated by load()")]
    AttributeUnset(&'static str),

    /// Required attributes missing before a remote create call
    #[error("missing required attributes: {0}")]
    Validation(String),

    /// API key generation failed
    #[error("API key generation failed: {0}")]
    KeyGeneration(String),

    /// Credentials missing from the environment
    #[error("missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Create an error from an HTTP error status and response body.
    ///
    /// The API wraps failures as `{"error": {"message": "..."}}`; anything
    /// else becomes a plain HTTP error.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(message) = value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return ApiError::Api {
                    message: message.to_string(),
                    status: Some(status),
                };
            }
        }
        ApiError::Http {
            status,
            body: body.to_string(),
            source: None,
        }
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Get the HTTP status code if this error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => *status,
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for enStratus operations
pub type Result<T> = std::result::Result<T, ApiError>;
