//! Lazily loaded resource attributes.
//!
//! Remote resources expose most of their fields lazily: a field's backing
//! slot starts out empty and is populated by the owning resource's `load()`
//! the first time any lazy attribute is read. [`Attr`] is the backing slot,
//! [`LoadableResource`] is the contract a host type must satisfy, and
//! [`lazy_get`] implements the read path shared by every resource.
//!
//! `load()` is a blocking remote fetch with no retry or timeout policy of
//! its own; any such policy belongs to the transport. The `&mut` receiver
//! on [`lazy_get`] makes a read an exclusive operation, so at most one load
//! can be in flight per instance. Nothing is shared across instances.

use crate::error::{ApiError, Result};

/// Backing slot for a single lazy attribute.
///
/// The slot is populated by the owning resource's `load()` through
/// [`Attr::fill`]. Explicit writes go through [`Attr::set`] and are only
/// permitted when the attribute was declared writable.
#[derive(Debug, Clone)]
pub struct Attr<T> {
    name: &'static str,
    value: Option<T>,
    writable: bool,
}

impl<T> Attr<T> {
    /// Declare a read-only attribute. [`Attr::set`] on it always fails.
    pub fn read_only(name: &'static str) -> Self {
        Attr {
            name,
            value: None,
            writable: false,
        }
    }

    /// Declare a writable attribute.
    pub fn writable(name: &'static str) -> Self {
        Attr {
            name,
            value: None,
            writable: true,
        }
    }

    /// Attribute name as declared
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the backing value has been populated
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The cached value, if populated
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Populate the slot from `load()`. Permitted for every attribute.
    pub fn fill(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Explicitly overwrite the value.
    ///
    /// Fails with [`ApiError::ImmutableAttribute`] unless the attribute was
    /// declared writable.
    pub fn set(&mut self, value: T) -> Result<()> {
        if !self.writable {
            return Err(ApiError::ImmutableAttribute(self.name));
        }
        self.value = Some(value);
        Ok(())
    }
}

/// Contract a resource type must satisfy to host lazy attributes.
pub trait LoadableResource {
    /// Primary key type (an access key string, a numeric id, ...)
    type Key: ?Sized;

    /// The primary key, absent while the remote entity has not been created
    fn primary_key(&self) -> Option<&Self::Key>;

    /// Fetch the remote entity and fill every backing slot.
    ///
    /// On success sets the loaded flag. Failures either propagate as `Err`
    /// or are recorded in `last_error`, per the transport convention.
    fn load(&mut self) -> Result<()>;

    /// The most recent remote-operation failure; `None` means success
    fn last_error(&self) -> Option<&str>;

    /// Whether a remote load has completed
    fn is_loaded(&self) -> bool;
}

/// Result of a lazy attribute read.
///
/// The API records remote failures in the resource's `last_error` field and
/// hands them back through attribute reads. `AttrValue` keeps that behavior
/// while separating the two cases by type, so a value that happens to look
/// like an error message cannot be mistaken for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a, T> {
    /// The attribute's cached value
    Value(&'a T),
    /// The resource's recorded remote error, returned in place of the value
    LastError(&'a str),
}

impl<'a, T> AttrValue<'a, T> {
    /// The cached value, or `None` for the error case
    pub fn value(&self) -> Option<&'a T> {
        match *self {
            AttrValue::Value(value) => Some(value),
            AttrValue::LastError(_) => None,
        }
    }

    /// The recorded error, or `None` for the value case
    pub fn last_error(&self) -> Option<&'a str> {
        match *self {
            AttrValue::Value(_) => None,
            AttrValue::LastError(error) => Some(error),
        }
    }

    /// Whether this read produced a value
    pub fn is_value(&self) -> bool {
        matches!(self, AttrValue::Value(_))
    }
}

/// Read a lazy attribute, loading the resource if its slot is empty.
///
/// The read path:
///
/// 1. a populated slot is returned as-is, with no remote call;
/// 2. an empty slot triggers `load()`, unless `last_error` already records
///    a failure; an `Err` from `load()` propagates unchanged;
/// 3. a non-empty `last_error` after that is returned as
///    [`AttrValue::LastError`];
/// 4. otherwise the slot must have been populated by `load()`; if it was
///    not, the read fails with [`ApiError::AttributeUnset`] and a later read
///    attempts the load again.
///
/// Each empty slot re-triggers `load()` independently; `load()` fills every
/// slot in one call, so in practice only the first read pays for a fetch.
pub fn lazy_get<'r, R, T>(resource: &'r mut R, attr: fn(&R) -> &Attr<T>) -> Result<AttrValue<'r, T>>
where
    R: LoadableResource,
{
    if !attr(resource).is_set() {
        if resource.last_error().is_none() {
            resource.load()?;
        }
        if let Some(error) = resource.last_error() {
            return Ok(AttrValue::LastError(error));
        }
    }

    let name = attr(resource).name();
    match attr(resource).get() {
        Some(value) => Ok(AttrValue::Value(value)),
        None => Err(ApiError::AttributeUnset(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_starts_unset() {
        let attr: Attr<String> = Attr::read_only("state");
        assert_eq!(attr.name(), "state");
        assert!(!attr.is_set());
        assert_eq!(attr.get(), None);
    }

    #[test]
    fn test_read_only_attr_rejects_set() {
        let mut attr: Attr<String> = Attr::read_only("state");

        let error = attr.set("ACTIVE".to_string()).unwrap_err();
        assert!(matches!(error, ApiError::ImmutableAttribute("state")));
        assert!(!attr.is_set());
    }

    #[test]
    fn test_read_only_attr_accepts_fill() {
        let mut attr: Attr<String> = Attr::read_only("state");

        attr.fill("ACTIVE".to_string());
        assert_eq!(attr.get().map(String::as_str), Some("ACTIVE"));
    }

    #[test]
    fn test_writable_attr_accepts_set() {
        let mut attr: Attr<String> = Attr::writable("description");

        attr.set("first".to_string()).unwrap();
        attr.set("second".to_string()).unwrap();
        assert_eq!(attr.get().map(String::as_str), Some("second"));
    }

    #[test]
    fn test_attr_value_accessors() {
        let value = "ACTIVE".to_string();
        let read: AttrValue<'_, String> = AttrValue::Value(&value);
        assert!(read.is_value());
        assert_eq!(read.value(), Some(&value));
        assert_eq!(read.last_error(), None);

        let failed: AttrValue<'_, String> = AttrValue::LastError("kaboom!");
        assert!(!failed.is_value());
        assert_eq!(failed.value(), None);
        assert_eq!(failed.last_error(), Some("kaboom!"));
    }
}
