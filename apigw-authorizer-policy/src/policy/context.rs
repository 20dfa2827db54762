//! Authorizer context: extra key/value pairs the gateway exposes to the
//! backend as `$context.authorizer.<key>`.
//!
//! The enforcement point only accepts a flat map of string, number, and
//! boolean values. Nested objects and arrays are rejected here rather than
//! passed through.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PolicyError, PolicyResult};

/// A scalar context value. Nesting is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<serde_json::Number> for ContextValue {
    fn from(value: serde_json::Number) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat string-to-scalar mapping attached to an authorization result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizerContext(BTreeMap<String, ContextValue>);

impl AuthorizerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    /// Build a context from a JSON object, rejecting non-object input and
    /// any nested object or array value.
    pub fn from_json(value: Value) -> PolicyResult<Self> {
        let Value::Object(entries) = value else {
            return Err(PolicyError::NonScalarContextValue("<root>".to_string()));
        };

        let mut context = Self::new();
        for (key, entry) in entries {
            match entry {
                Value::String(s) => context.insert(key, s),
                Value::Number(n) => context.insert(key, n),
                Value::Bool(b) => context.insert(key, b),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(PolicyError::NonScalarContextValue(key));
                }
            };
        }
        Ok(context)
    }
}

impl TryFrom<Value> for AuthorizerContext {
    type Error = PolicyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_as_flat_object() {
        let mut context = AuthorizerContext::new();
        context
            .insert("stringKey", "stringval")
            .insert("numberKey", 123_i64)
            .insert("booleanKey", true);

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(
            value,
            json!({"stringKey": "stringval", "numberKey": 123, "booleanKey": true})
        );
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut context = AuthorizerContext::new();
        context.insert("key", "first").insert("key", "second");
        assert_eq!(context.len(), 1);
        assert_eq!(context.get("key"), Some(&ContextValue::from("second")));
    }

    #[test]
    fn test_from_json_accepts_flat_object() {
        let context =
            AuthorizerContext::from_json(json!({"user": "alice", "age": 30, "admin": false}))
                .unwrap();
        assert_eq!(context.len(), 3);
        assert_eq!(context.get("admin"), Some(&ContextValue::Bool(false)));
    }

    #[test]
    fn test_from_json_rejects_nested_object() {
        let err =
            AuthorizerContext::from_json(json!({"nested": {"inner": 1}})).unwrap_err();
        assert_eq!(err, PolicyError::NonScalarContextValue("nested".to_string()));
    }

    #[test]
    fn test_from_json_rejects_array() {
        let err = AuthorizerContext::from_json(json!({"roles": ["a", "b"]})).unwrap_err();
        assert_eq!(err, PolicyError::NonScalarContextValue("roles".to_string()));
    }

    #[test]
    fn test_from_json_rejects_non_object_root() {
        let err = AuthorizerContext::from_json(json!(["a"])).unwrap_err();
        assert_eq!(
            err,
            PolicyError::NonScalarContextValue("<root>".to_string())
        );
    }

    #[test]
    fn test_round_trips_through_serde() {
        let mut context = AuthorizerContext::new();
        context.insert("k", 7_i64);
        let json = serde_json::to_string(&context).unwrap();
        let back: AuthorizerContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, context);
    }
}
