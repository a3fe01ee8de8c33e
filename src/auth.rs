use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::env;

use crate::client::USER_AGENT;
use crate::error::{ApiError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Access and secret key pair used to sign API requests.
#[derive(Clone)]
pub struct Credentials {
    /// API access key identifier. Same as `ES_ACCESS_KEY`.
    pub access_key: String,
    /// Secret key used for signing
    secret_key: String,
}

impl Credentials {
    /// Create credentials from an access key and secret key
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Credentials {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials from the `ES_ACCESS_KEY` and `ES_SECRET_KEY`
    /// environment variables
    pub fn from_env() -> Result<Self> {
        let access_key =
            env::var("ES_ACCESS_KEY").map_err(|_| ApiError::MissingCredentials("ES_ACCESS_KEY"))?;
        let secret_key =
            env::var("ES_SECRET_KEY").map_err(|_| ApiError::MissingCredentials("ES_SECRET_KEY"))?;
        Ok(Credentials::new(access_key, secret_key))
    }

    /// Generate the signature for an API request.
    ///
    /// The signed string is `access:METHOD:path:timestamp:user-agent`,
    /// authenticated with HMAC-SHA256 under the secret key and encoded
    /// as base64.
    pub fn sign(&self, method: &str, path: &str, timestamp: u64) -> String {
        let to_sign = format!(
            "{}:{}:{}:{}:{}",
            self.access_key, method, path, timestamp, USER_AGENT
        );

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(to_sign.as_bytes());

        STANDARD.encode(mac.finalize().into_bytes())
    }
}

// Implement Debug manually to avoid exposing the secret key
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
