//! API key administration.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::lazy::{lazy_get, Attr, AttrValue, LoadableResource};
use crate::resource::{DetailLevel, ResourceState};
use crate::response::Param;
use crate::rest::ApiContext;
use crate::time::Time;

/// An API key is an access key and secret key pair that provide API access.
///
/// Most fields load lazily: the first read of any of them fetches the key
/// from `admin/ApiKey/{access_key}` and caches every field for the
/// instance's lifetime. A key constructed without an access key represents
/// a not-yet-generated key; populate `name` and `description`, then call
/// [`ApiKey::create`].
#[derive(Debug)]
pub struct ApiKey {
    res: ResourceState,
    access_key: Option<String>,
    account: Attr<Value>,
    activation: Attr<Time>,
    expiration: Attr<Time>,
    customer: Attr<Value>,
    customer_management_key: Attr<bool>,
    description: Attr<String>,
    name: Attr<String>,
    secret_key: Attr<String>,
    state: Attr<String>,
    system_management_key: Attr<bool>,
    user: Attr<Value>,
}

/// Wire shape of a single `apiKeys` collection item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiKeyData {
    access_key: String,
    #[serde(default)]
    secret_key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    activation: Option<Time>,
    #[serde(default)]
    expiration: Option<Time>,
    #[serde(default)]
    customer_management_key: Option<bool>,
    #[serde(default)]
    system_management_key: Option<bool>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    account: Option<Value>,
    #[serde(default)]
    customer: Option<Value>,
    #[serde(default)]
    user: Option<Value>,
}

/// Restrict an [`ApiKey::all`] listing to one account's or one user's keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFilter {
    /// System keys belonging to the account
    Account(i64),
    /// Keys belonging to the user
    User(i64),
}

impl ApiKey {
    pub const PATH: &'static str = "admin/ApiKey";
    pub const COLLECTION_NAME: &'static str = "apiKeys";

    /// Create a handle for a key that does not exist remotely yet
    pub fn new(ctx: ApiContext) -> Self {
        Self::build(ctx, None)
    }

    /// Create a handle addressing an existing key by its access key
    pub fn with_access_key(ctx: ApiContext, access_key: impl Into<String>) -> Self {
        Self::build(ctx, Some(access_key.into()))
    }

    fn build(ctx: ApiContext, access_key: Option<String>) -> Self {
        ApiKey {
            res: ResourceState::new(ctx),
            access_key,
            account: Attr::read_only("account"),
            activation: Attr::read_only("activation"),
            expiration: Attr::writable("expiration"),
            customer: Attr::read_only("customer"),
            customer_management_key: Attr::read_only("customer_management_key"),
            description: Attr::writable("description"),
            name: Attr::writable("name"),
            secret_key: Attr::read_only("secret_key"),
            state: Attr::read_only("state"),
            system_management_key: Attr::read_only("system_management_key"),
            user: Attr::read_only("user"),
        }
    }

    /// The primary identifier of the key. Same as `ES_ACCESS_KEY`.
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    /// Level of detail requested on subsequent fetches
    pub fn set_request_details(&mut self, details: DetailLevel) {
        self.res.set_request_details(details);
    }

    /// The account with which this API key is associated
    pub fn account(&mut self) -> Result<AttrValue<'_, Value>> {
        lazy_get(self, |k| &k.account)
    }

    /// The date and time when this key was activated
    pub fn activation(&mut self) -> Result<AttrValue<'_, Time>> {
        lazy_get(self, |k| &k.activation)
    }

    /// The date and time when this key should automatically be made inactive
    pub fn expiration(&mut self) -> Result<AttrValue<'_, Time>> {
        lazy_get(self, |k| &k.expiration)
    }

    pub fn set_expiration(&mut self, expiration: Time) -> Result<()> {
        self.expiration.set(expiration)
    }

    /// The customer to whom this API key belongs
    pub fn customer(&mut self) -> Result<AttrValue<'_, Value>> {
        lazy_get(self, |k| &k.customer)
    }

    /// Whether this key can be used across all customer accounts
    pub fn customer_management_key(&mut self) -> Result<AttrValue<'_, bool>> {
        lazy_get(self, |k| &k.customer_management_key)
    }

    /// A user-friendly description of this API key
    pub fn description(&mut self) -> Result<AttrValue<'_, String>> {
        lazy_get(self, |k| &k.description)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.description.set(description.into())
    }

    /// The user-friendly name used to identify the key
    pub fn name(&mut self) -> Result<AttrValue<'_, String>> {
        lazy_get(self, |k| &k.name)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name.set(name.into())
    }

    /// The secret part of this API key
    pub fn secret_key(&mut self) -> Result<AttrValue<'_, String>> {
        lazy_get(self, |k| &k.secret_key)
    }

    /// The status of the key (e.g. `ACTIVE`)
    pub fn state(&mut self) -> Result<AttrValue<'_, String>> {
        lazy_get(self, |k| &k.state)
    }

    /// Whether the key can be used for system management functions
    pub fn system_management_key(&mut self) -> Result<AttrValue<'_, bool>> {
        lazy_get(self, |k| &k.system_management_key)
    }

    /// The user associated with this API key. Account-level keys carry
    /// `{"userId": -1}`.
    pub fn user(&mut self) -> Result<AttrValue<'_, Value>> {
        lazy_get(self, |k| &k.user)
    }

    /// Call the API to generate an API key from the current instance.
    ///
    /// Requires `name` and `description` to be set. On success the returned
    /// access key is stored and the instance is loaded.
    pub fn create(&mut self) -> Result<()> {
        let mut missing = Vec::new();
        if !self.name.is_set() {
            missing.push("name");
        }
        if !self.description.is_set() {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(ApiError::Validation(missing.join(", ")));
        }

        let payload = json!({
            "generateApiKey": [{
                "description": self.description.get(),
                "name": self.name.get(),
            }]
        });

        match self.res.post(Self::PATH, &payload) {
            Some(response) => {
                let access_key = response
                    .get_string(&format!("{}/0/accessKey", Self::COLLECTION_NAME))
                    .ok_or_else(|| ApiError::Api {
                        message: "response did not include an access key".to_string(),
                        status: None,
                    })?;
                self.access_key = Some(access_key);
                self.load()
            }
            None => Err(ApiError::KeyGeneration(
                self.res.last_error().unwrap_or("unknown error").to_string(),
            )),
        }
    }

    /// Generate a new API key
    ///
    /// # Arguments
    /// * `ctx` - API context to generate the key with
    /// * `name` - the name for the key
    /// * `description` - the description for the key
    pub fn generate(
        ctx: ApiContext,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ApiKey> {
        let mut key = ApiKey::new(ctx);
        key.set_name(name)?;
        key.set_description(description)?;
        key.create()?;
        Ok(key)
    }

    /// Get all API keys visible to the requesting credentials.
    ///
    /// `filter` narrows the listing to one account's system keys or one
    /// user's keys.
    pub fn all(
        ctx: &ApiContext,
        detail: DetailLevel,
        filter: Option<KeyFilter>,
    ) -> Result<Vec<ApiKey>> {
        let mut params = Param::new();
        match filter {
            Some(KeyFilter::Account(account_id)) => {
                params.insert("accountId".to_string(), Value::from(account_id));
            }
            Some(KeyFilter::User(user_id)) => {
                params.insert("userId".to_string(), Value::from(user_id));
            }
            None => {}
        }

        let response = ctx.get(Self::PATH, &params, detail)?;
        let items = response
            .collection(Self::COLLECTION_NAME)
            .ok_or_else(|| ApiError::Api {
                message: format!("response did not include `{}`", Self::COLLECTION_NAME),
                status: None,
            })?;

        let mut keys = Vec::with_capacity(items.len());
        for item in items {
            let data: ApiKeyData = serde_json::from_value(item.clone())?;
            keys.push(ApiKey::with_access_key(ctx.clone(), data.access_key));
        }
        Ok(keys)
    }
}

impl LoadableResource for ApiKey {
    type Key = str;

    fn primary_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    fn load(&mut self) -> Result<()> {
        let Some(access_key) = self.access_key.clone() else {
            self.res.fail("cannot load an API key without an access key");
            return Ok(());
        };

        let path = format!("{}/{}", Self::PATH, access_key);
        let Some(response) = self.res.get(&path, &Param::new()) else {
            // failure recorded in last_error
            return Ok(());
        };

        let item = response
            .collection(Self::COLLECTION_NAME)
            .and_then(|items| items.first())
            .ok_or_else(|| ApiError::Api {
                message: format!("response did not include `{}`", Self::COLLECTION_NAME),
                status: None,
            })?
            .clone();
        let data: ApiKeyData = serde_json::from_value(item)?;

        self.access_key = Some(data.access_key);
        if let Some(secret_key) = data.secret_key {
            self.secret_key.fill(secret_key);
        }
        if let Some(name) = data.name {
            self.name.fill(name);
        }
        if let Some(description) = data.description {
            self.description.fill(description);
        }
        if let Some(activation) = data.activation {
            self.activation.fill(activation);
        }
        if let Some(expiration) = data.expiration {
            self.expiration.fill(expiration);
        }
        if let Some(customer_management_key) = data.customer_management_key {
            self.customer_management_key.fill(customer_management_key);
        }
        if let Some(system_management_key) = data.system_management_key {
            self.system_management_key.fill(system_management_key);
        }
        if let Some(state) = data.state {
            self.state.fill(state);
        }
        if let Some(account) = data.account {
            self.account.fill(account);
        }
        if let Some(customer) = data.customer {
            self.customer.fill(customer);
        }
        if let Some(user) = data.user {
            self.user.fill(user);
        }

        self.res.mark_loaded();
        Ok(())
    }

    fn last_error(&self) -> Option<&str> {
        self.res.last_error()
    }

    fn is_loaded(&self) -> bool {
        self.res.is_loaded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn test_ctx() -> ApiContext {
        ApiContext::new(Credentials::new("abcdef", "12345"))
    }

    #[test]
    fn test_access_key_is_optional() {
        let key = ApiKey::new(test_ctx());
        assert_eq!(key.access_key(), None);
        assert_eq!(key.primary_key(), None);

        let key = ApiKey::with_access_key(test_ctx(), "ABCDEF123");
        assert_eq!(key.access_key(), Some("ABCDEF123"));
        assert_eq!(key.primary_key(), Some("ABCDEF123"));
    }

    #[test]
    fn test_create_requires_name_and_description() {
        let mut key = ApiKey::new(test_ctx());

        match key.create().unwrap_err() {
            ApiError::Validation(missing) => assert_eq!(missing, "name, description"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_description() {
        let mut key = ApiKey::new(test_ctx());
        key.set_name("ops").unwrap();

        match key.create().unwrap_err() {
            ApiError::Validation(missing) => assert_eq!(missing, "description"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_writable_attrs_readable_without_load() {
        let mut key = ApiKey::new(test_ctx());
        key.set_name("staging").unwrap();
        key.set_description("Staging key").unwrap();

        assert_eq!(
            key.name().unwrap().value().map(String::as_str),
            Some("staging")
        );
        assert_eq!(
            key.description().unwrap().value().map(String::as_str),
            Some("Staging key")
        );
        assert!(!key.is_loaded());
    }

    #[test]
    fn test_secret_key_is_immutable() {
        let mut key = ApiKey::with_access_key(test_ctx(), "ABCDEF123");

        let error = key.secret_key.set("nope".to_string()).unwrap_err();
        assert!(matches!(error, ApiError::ImmutableAttribute("secret_key")));
    }

    #[test]
    fn test_api_key_data_deserialization() {
        let item = serde_json::json!({
            "accessKey": "ABCDEF123",
            "secretKey": "shhh",
            "name": "production",
            "description": "Production automation key",
            "activation": 1338937263000i64,
            "customerManagementKey": false,
            "systemManagementKey": true,
            "state": "ACTIVE",
            "user": {"userId": -1}
        });

        let data: ApiKeyData = serde_json::from_value(item).unwrap();
        assert_eq!(data.access_key, "ABCDEF123");
        assert_eq!(data.secret_key.as_deref(), Some("shhh"));
        assert_eq!(data.state.as_deref(), Some("ACTIVE"));
        assert_eq!(data.activation.unwrap().millis(), 1338937263000);
        assert!(data.expiration.is_none());
        assert_eq!(data.customer_management_key, Some(false));
        assert_eq!(data.system_management_key, Some(true));
        assert_eq!(data.user, Some(serde_json::json!({"userId": -1})));
    }
}
