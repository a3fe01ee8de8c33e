//! # enstratus - enStratus cloud management API client
//!
//! A Rust client for the enStratus cloud management REST API, starting
//! with the administrative surface for API keys.
//!
//! ## Features
//!
//! - Signed API requests (HMAC-SHA256 over access key, method, path and
//!   timestamp)
//! - Lazily loaded resource attributes: a resource fetches itself on the
//!   first attribute read and caches the result for the instance's lifetime
//! - Typed read results that keep remote failures distinct from attribute
//!   values
//! - API key administration: generate, inspect and list keys
//!
//! ## Basic Usage
//!
//! ```no_run
//! use enstratus::{ApiContext, ApiKey};
//!
//! fn main() -> Result<(), enstratus::ApiError> {
//!     // Credentials come from ES_ACCESS_KEY / ES_SECRET_KEY
//!     let ctx = ApiContext::from_env()?;
//!
//!     let mut key = ApiKey::with_access_key(ctx, "ABCDEF123");
//!     if let Some(state) = key.state()?.value() {
//!         println!("key state: {}", state);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Generating a key
//!
//! ```no_run
//! use enstratus::{ApiContext, ApiKey};
//!
//! # fn main() -> Result<(), enstratus::ApiError> {
//! let ctx = ApiContext::from_env()?;
//! let key = ApiKey::generate(ctx, "automation", "CI automation key")?;
//! println!("access key: {:?}", key.access_key());
//! # Ok(())
//! # }
//! ```
//!
//! ## Lazy attributes
//!
//! Reading a lazy attribute on an unloaded resource triggers a single
//! blocking fetch that fills every field; later reads are served from the
//! cache. A read returns [`AttrValue::LastError`] when the most recent
//! remote operation failed, so error text can never be mistaken for data.

pub mod api_key;
pub mod auth;
pub mod client;
pub mod error;
pub mod lazy;
pub mod resource;
pub mod response;
pub mod rest;
pub mod time;

// Re-export main types for convenience
pub use api_key::{ApiKey, KeyFilter};
pub use auth::Credentials;
pub use client::Config;
pub use error::{ApiError, Result};
pub use lazy::{lazy_get, Attr, AttrValue, LoadableResource};
pub use resource::{DetailLevel, ResourceState};
pub use response::{Param, Response};
pub use rest::ApiContext;
pub use time::Time;

// Re-export serde_json for convenience
pub use serde_json::json;
