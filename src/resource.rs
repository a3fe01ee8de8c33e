//! Shared state and remote-operation plumbing for API resources.
//!
//! Every concrete resource embeds a [`ResourceState`], which wraps the
//! [`ApiContext`] with the per-instance bookkeeping the lazy attribute
//! machinery relies on: the loaded flag and the `last_error` field
//! recording the most recent remote failure.

use serde_json::Value;

use crate::error::Result;
use crate::response::{Param, Response};
use crate::rest::ApiContext;

/// Level of detail the API includes in responses, sent as `x-es-details`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    #[default]
    Basic,
    Extended,
}

impl DetailLevel {
    /// Header value for the detail level
    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Basic => "basic",
            DetailLevel::Extended => "extended",
        }
    }
}

/// Remote-operation state embedded by every concrete resource.
///
/// The `get`/`post`/`put`/`delete` operations delegate to the context and
/// record any failure in `last_error` instead of returning it; lazy
/// attribute reads then surface the recorded error. A successful operation
/// clears a previously recorded error.
#[derive(Debug)]
pub struct ResourceState {
    ctx: ApiContext,
    loaded: bool,
    last_error: Option<String>,
    request_details: DetailLevel,
}

impl ResourceState {
    pub fn new(ctx: ApiContext) -> Self {
        ResourceState {
            ctx,
            loaded: false,
            last_error: None,
            request_details: DetailLevel::Basic,
        }
    }

    /// The context used for remote calls
    pub fn context(&self) -> &ApiContext {
        &self.ctx
    }

    /// Whether a remote load has completed
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Mark the instance as loaded once `load()` has filled every slot
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// The most recent remote-operation failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record a failure without a remote round-trip
    pub fn fail(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Clear a recorded failure
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Requested level of detail for subsequent fetches
    pub fn request_details(&self) -> DetailLevel {
        self.request_details
    }

    pub fn set_request_details(&mut self, details: DetailLevel) {
        self.request_details = details;
    }

    /// GET `path`, recording any failure in `last_error`
    pub fn get(&mut self, path: &str, params: &Param) -> Option<Response> {
        let result = self.ctx.get(path, params, self.request_details);
        self.record(result)
    }

    /// POST `body` to `path`, recording any failure in `last_error`
    pub fn post(&mut self, path: &str, body: &Value) -> Option<Response> {
        let result = self.ctx.post(path, body, self.request_details);
        self.record(result)
    }

    /// PUT `body` to `path`, recording any failure in `last_error`
    pub fn put(&mut self, path: &str, body: &Value) -> Option<Response> {
        let result = self.ctx.put(path, body, self.request_details);
        self.record(result)
    }

    /// DELETE `path`, recording any failure in `last_error`
    pub fn delete(&mut self, path: &str) -> Option<Response> {
        let result = self.ctx.delete(path, self.request_details);
        self.record(result)
    }

    fn record(&mut self, result: Result<Response>) -> Option<Response> {
        match result {
            Ok(response) => {
                self.last_error = None;
                Some(response)
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                None
            }
        }
    }
}
