//! Typed access to a resource event's property bag.
//!
//! The template engine sends properties as loosely typed JSON: strings,
//! string-encoded integers, lists of strings, and lists of objects. Every
//! accessor here either returns a typed value or an
//! [`Error::InvalidProperty`] naming the offending field, so decoding a
//! resource spec never panics on unexpected input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON object of resource properties plus the path used in error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    values: Map<String, Value>,
    #[serde(skip)]
    path: String,
}

impl PropertyBag {
    #[must_use]
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values,
            path: String::new(),
        }
    }

    /// Build a bag from any JSON value; non-objects are rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self::new(values)),
            Value::Null => Ok(Self::default()),
            other => Err(Error::invalid_property(
                "ResourceProperties",
                format!("expected an object, got {}", type_name(&other)),
            )),
        }
    }

    fn nested(values: Map<String, Value>, path: String) -> Self {
        Self { values, path }
    }

    /// Fully qualified field name, e.g. `Tasks[0].Image`.
    #[must_use]
    pub fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.path)
        }
    }

    fn invalid(&self, field: &str, reason: impl Into<String>) -> Error {
        Error::invalid_property(self.field_path(field), reason)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.get(field).is_some_and(|v| !v.is_null())
    }

    /// A string field that must be present and non-empty.
    pub fn required_str(&self, field: &str) -> Result<&str> {
        match self.optional_str(field)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.invalid(field, "required")),
        }
    }

    /// A string field that may be absent, null, or empty.
    pub fn optional_str(&self, field: &str) -> Result<Option<&str>> {
        match self.values.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(
                field,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    /// A non-negative integer field sent either as a JSON number or a string.
    pub fn required_u32(&self, field: &str) -> Result<u32> {
        let value = self
            .values
            .get(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| self.invalid(field, "required"))?;
        self.as_u32(field, value)
    }

    /// Like [`Self::required_u32`], but absent or malformed values yield `None`.
    #[must_use]
    pub fn lenient_u32(&self, field: &str) -> Option<u32> {
        let value = self.values.get(field)?;
        self.as_u32(field, value).ok()
    }

    fn as_u32(&self, field: &str, value: &Value) -> Result<u32> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| self.invalid(field, format!("{n} is not a non-negative integer"))),
            Value::String(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|e| self.invalid(field, format!("{s:?} is not a non-negative integer: {e}"))),
            other => Err(self.invalid(
                field,
                format!("expected an integer, got {}", type_name(other)),
            )),
        }
    }

    /// A list of strings; absent or null means empty.
    pub fn str_list(&self, field: &str) -> Result<Vec<String>> {
        let items = match self.values.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(self.invalid(
                    field,
                    format!("expected a list, got {}", type_name(other)),
                ))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.invalid(
                    &format!("{field}[{i}]"),
                    format!("expected a string, got {}", type_name(other)),
                )),
            })
            .collect()
    }

    /// A list of nested objects; absent or null means empty.
    pub fn object_list(&self, field: &str) -> Result<Vec<PropertyBag>> {
        let items = match self.values.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(self.invalid(
                    field,
                    format!("expected a list, got {}", type_name(other)),
                ))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = self.field_path(&format!("{field}[{i}]"));
                match item {
                    Value::Object(values) => Ok(Self::nested(values.clone(), path)),
                    other => Err(Error::invalid_property(
                        path,
                        format!("expected an object, got {}", type_name(other)),
                    )),
                }
            })
            .collect()
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
