use serde_json::Value;

/// Param is a convenience type for query parameters passed to API requests.
pub type Param = std::collections::HashMap<String, Value>;

/// Response represents a parsed API response body plus request metadata.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body; `Null` when the endpoint returned no content
    pub data: Value,
    /// x-es-requestid header from the HTTP response
    pub request_id: Option<String>,
}

impl Response {
    /// Get the raw data value from the response
    pub fn raw(&self) -> &Value {
        &self.data
    }

    /// Get a value from the response data by a slash-separated path.
    /// For example, "user/name" would access the "name" field inside the
    /// "user" object.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut current = &self.data;

        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the response data by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Get a collection array from the response envelope, e.g. `apiKeys`
    pub fn collection(&self, name: &str) -> Option<&Vec<Value>> {
        self.data.get(name).and_then(Value::as_array)
    }

    /// Apply unmarshals the response data into the provided type
    pub fn apply<T>(&self) -> Result<T, crate::error::ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(self.data.clone()).map_err(|e| e.into())
    }
}
