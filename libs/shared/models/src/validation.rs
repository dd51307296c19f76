//! Field-level validation shared by the configuration models.
//!
//! Payloads arrive as raw JSON objects so that a key the client omitted can be
//! told apart from a key the client explicitly set to `null`. [`FieldReader`]
//! pulls typed values out of such an object, applies defaults, checks numeric
//! domains and collects every problem it finds instead of stopping at the first.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "field": self.field, "message": self.message })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// A validated, normalized configuration mapping ready to be handed upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig(Map<String, Value>);

impl NormalizedConfig {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// How a key appears in a raw payload.
#[derive(Debug, Clone, Copy)]
pub enum Presence<'a> {
    Absent,
    Null,
    Value(&'a Value),
}

/// Typed, error-collecting access to a raw JSON object.
///
/// In partial mode (patch payloads) a missing required key is not an error and
/// defaults are returned only as placeholders; the caller emits supplied keys
/// only. An explicit `null` on a required key is an error in both modes.
pub struct FieldReader<'a> {
    raw: &'a Map<String, Value>,
    partial: bool,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(raw: &'a Map<String, Value>, partial: bool) -> Self {
        Self {
            raw,
            partial,
            errors: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn raw(&self) -> &'a Map<String, Value> {
        self.raw
    }

    pub fn supplied(&self, key: &str) -> bool {
        self.raw.contains_key(key)
    }

    pub fn presence(&self, key: &str) -> Presence<'a> {
        match self.raw.get(key) {
            None => Presence::Absent,
            Some(Value::Null) => Presence::Null,
            Some(value) => Presence::Value(value),
        }
    }

    pub fn reject(&mut self, key: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(key, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reject each of `keys` that neither the payload nor `fallback` fills in.
    /// Keys already rejected keep their first error.
    pub fn require_filled(&mut self, keys: &[&str], fallback: Option<&Map<String, Value>>, message: &str) {
        for key in keys {
            let filled = !is_blank(self.raw.get(*key)) || !is_blank(fallback.and_then(|stored| stored.get(*key)));
            let reported = self.errors.iter().any(|e| e.field == *key);
            if !filled && !reported {
                self.reject(key, message);
            }
        }
    }

    fn missing(&mut self, key: &str) {
        if !self.partial {
            self.reject(key, "is required");
        }
    }

    pub fn required_str(&mut self, key: &str) -> String {
        match self.presence(key) {
            Presence::Absent => {
                self.missing(key);
                String::new()
            }
            Presence::Null => {
                self.reject(key, "is required");
                String::new()
            }
            Presence::Value(Value::String(s)) if s.trim().is_empty() => {
                self.reject(key, "must not be empty");
                String::new()
            }
            Presence::Value(Value::String(s)) => s.clone(),
            Presence::Value(_) => {
                self.reject(key, "must be a string");
                String::new()
            }
        }
    }

    pub fn optional_str(&mut self, key: &str) -> Option<String> {
        match self.presence(key) {
            Presence::Absent | Presence::Null => None,
            Presence::Value(Value::String(s)) => Some(s.clone()),
            Presence::Value(_) => {
                self.reject(key, "must be a string");
                None
            }
        }
    }

    pub fn str_or(&mut self, key: &str, default: &str) -> String {
        match self.presence(key) {
            Presence::Absent => default.to_string(),
            Presence::Null => {
                self.reject(key, "must not be null");
                default.to_string()
            }
            Presence::Value(Value::String(s)) => s.clone(),
            Presence::Value(_) => {
                self.reject(key, "must be a string");
                default.to_string()
            }
        }
    }

    /// A string restricted to a fixed vocabulary.
    pub fn one_of(&mut self, key: &str, default: &str, allowed: &[&str]) -> String {
        let value = self.str_or(key, default);
        if !allowed.contains(&value.as_str()) {
            self.reject(key, format!("must be one of: {}", allowed.join(", ")));
        }
        value
    }

    fn int_value(&mut self, key: &str, value: &Value) -> Option<i64> {
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                self.reject(key, "must be an integer");
                None
            }
        }
    }

    fn check_range(&mut self, key: &str, n: i64, min: i64, max: i64) -> bool {
        if n < min || n > max {
            if max == i64::MAX {
                self.reject(key, format!("must be at least {}", min));
            } else {
                self.reject(key, format!("must be between {} and {}", min, max));
            }
            return false;
        }
        true
    }

    pub fn int_or(&mut self, key: &str, default: i64, min: i64) -> i64 {
        self.int_in(key, default, min, i64::MAX)
    }

    pub fn int_in(&mut self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        match self.presence(key) {
            Presence::Absent => default,
            Presence::Null => {
                self.reject(key, "must not be null");
                default
            }
            Presence::Value(value) => match self.int_value(key, value) {
                Some(n) if self.check_range(key, n, min, max) => n,
                _ => default,
            },
        }
    }

    pub fn required_int(&mut self, key: &str, min: i64, max: i64) -> i64 {
        match self.presence(key) {
            Presence::Absent => {
                self.missing(key);
                0
            }
            Presence::Null => {
                self.reject(key, "is required");
                0
            }
            Presence::Value(value) => match self.int_value(key, value) {
                Some(n) if self.check_range(key, n, min, max) => n,
                _ => 0,
            },
        }
    }

    pub fn optional_int(&mut self, key: &str, min: i64) -> Option<i64> {
        match self.presence(key) {
            Presence::Absent | Presence::Null => None,
            Presence::Value(value) => match self.int_value(key, value) {
                Some(n) if self.check_range(key, n, min, i64::MAX) => Some(n),
                _ => None,
            },
        }
    }

    pub fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.presence(key) {
            Presence::Absent => default,
            Presence::Value(Value::Bool(b)) => *b,
            Presence::Null | Presence::Value(_) => {
                self.reject(key, "must be a boolean");
                default
            }
        }
    }

    pub fn optional_list(&mut self, key: &str) -> Option<Vec<Value>> {
        match self.presence(key) {
            Presence::Absent | Presence::Null => None,
            Presence::Value(Value::Array(items)) => Some(items.clone()),
            Presence::Value(_) => {
                self.reject(key, "must be a list");
                None
            }
        }
    }

    pub fn list_or(&mut self, key: &str, default: Vec<Value>) -> Vec<Value> {
        match self.presence(key) {
            Presence::Absent => default,
            Presence::Value(Value::Array(items)) => items.clone(),
            Presence::Null | Presence::Value(_) => {
                self.reject(key, "must be a list");
                default
            }
        }
    }

    /// A list that must be present and contain at least one element.
    pub fn required_list(&mut self, key: &str) -> Vec<Value> {
        match self.presence(key) {
            Presence::Absent => {
                self.missing(key);
                Vec::new()
            }
            Presence::Value(Value::Array(items)) if items.is_empty() => {
                self.reject(key, "must not be empty");
                Vec::new()
            }
            Presence::Value(Value::Array(items)) => items.clone(),
            Presence::Null => {
                self.reject(key, "is required");
                Vec::new()
            }
            Presence::Value(_) => {
                self.reject(key, "must be a list");
                Vec::new()
            }
        }
    }

    /// Any JSON value, passed through untouched.
    pub fn optional_value(&mut self, key: &str) -> Option<Value> {
        match self.presence(key) {
            Presence::Absent | Presence::Null => None,
            Presence::Value(value) => Some(value.clone()),
        }
    }

    pub fn optional_object(&mut self, key: &str) -> Option<Map<String, Value>> {
        match self.presence(key) {
            Presence::Absent | Presence::Null => None,
            Presence::Value(Value::Object(map)) => Some(map.clone()),
            Presence::Value(_) => {
                self.reject(key, "must be an object");
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Interpret a request body as a JSON object.
pub fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::single("body", "must be a JSON object"))
}

/// Whether a value carries nothing: missing, `null`, blank text or an empty list.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Keep only the keys the client supplied that also appear in `normalized`,
/// preserving explicit nulls.
pub fn supplied_subset(raw: &Map<String, Value>, normalized: &Map<String, Value>) -> Map<String, Value> {
    raw.keys()
        .filter_map(|key| normalized.get(key).map(|value| (key.clone(), value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_collects_every_error() {
        let raw = object(json!({ "name": "", "interval": -1, "upsideDown": "yes" }));
        let mut reader = FieldReader::new(&raw, false);
        reader.required_str("name");
        reader.required_str("url");
        reader.int_or("interval", 60, 1);
        reader.bool_or("upsideDown", false);

        let err = reader.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "url", "interval", "upsideDown"]);
    }

    #[test]
    fn test_partial_mode_tolerates_missing_required() {
        let raw = object(json!({ "name": "new" }));
        let mut reader = FieldReader::new(&raw, true);
        reader.required_str("hostname");
        reader.required_int("port", 1, 65535);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_explicit_null_on_required_rejected_in_partial_mode() {
        let raw = object(json!({ "hostname": null }));
        let mut reader = FieldReader::new(&raw, true);
        reader.required_str("hostname");
        let err = reader.finish().unwrap_err();
        assert!(err.has_field("hostname"));
    }

    #[test]
    fn test_defaults_and_ranges() {
        let raw = object(json!({ "port": 70000, "interval": 1 }));
        let mut reader = FieldReader::new(&raw, false);
        assert_eq!(reader.int_or("interval", 60, 1), 1);
        assert_eq!(reader.int_or("maxretries", 1, 0), 1);
        assert_eq!(reader.int_in("port", 53, 0, 65535), 53);
        assert_matches!(reader.finish(), Err(ValidationError { .. }));
    }

    #[test]
    fn test_required_list_must_not_be_empty() {
        let raw = object(json!({ "brokers": [] }));
        let mut reader = FieldReader::new(&raw, false);
        reader.required_list("brokers");
        let err = reader.finish().unwrap_err();
        assert_eq!(err.errors[0].message, "must not be empty");
    }

    #[test]
    fn test_supplied_subset_keeps_nulls() {
        let raw = object(json!({ "name": "new", "description": null, "bogus": 1 }));
        let normalized = object(json!({ "name": "new", "description": null, "interval": 60 }));
        let subset = supplied_subset(&raw, &normalized);
        assert_eq!(Value::Object(subset), json!({ "name": "new", "description": null }));
    }

    #[test]
    fn test_require_filled_falls_back_to_stored_values() {
        let raw = object(json!({ "type": "port", "port": 443 }));
        let stored = object(json!({ "hostname": "db.internal", "port": null, "keyword": "" }));
        let mut reader = FieldReader::new(&raw, true);
        reader.require_filled(&["hostname", "port", "keyword"], Some(&stored), "is required");
        let err = reader.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["keyword"]);
    }
}
