//! Wire-form contract shared by every value object and request body.
//!
//! Each level builds its full candidate mapping and drops absent entries once;
//! parents never re-filter the nested objects they embed.

use serde_json::{Map, Value};
use std::fmt;

/// A value object with a canonical JSON-object representation.
pub trait WireForm: fmt::Debug {
    /// Mapping from wire key to value with every absent (null) entry removed.
    fn to_wire_form(&self) -> Map<String, Value>;
}

/// A field-level value that resolves to a single JSON value on the wire.
pub trait WireValue {
    fn to_wire_value(&self) -> Value;
}

/// Drop every entry whose value is `null`, keeping the declared order of the rest.
///
/// An all-absent input yields an empty map, never `null`.
pub fn drop_absent<K, I>(entries: I) -> Map<String, Value>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    entries
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.into(), v))
        .collect()
}

/// Lift an optional value into a JSON value, `None` becoming `null`.
pub(crate) fn opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

/// Lift an optional wire value, `None` becoming `null`.
pub(crate) fn opt_wire<T: WireValue>(value: Option<&T>) -> Value {
    value.map(WireValue::to_wire_value).unwrap_or(Value::Null)
}

/// A parameter accepted either as a structured value or as raw JSON.
///
/// Raw values are forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<T> {
    Structured(T),
    Raw(Value),
}

impl<T> Param<T> {
    pub fn raw(value: impl Into<Value>) -> Self {
        Param::Raw(value.into())
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Param::Raw(_))
    }
}

impl<T: WireValue> WireValue for Param<T> {
    fn to_wire_value(&self) -> Value {
        match self {
            Param::Structured(inner) => inner.to_wire_value(),
            Param::Raw(value) => value.clone(),
        }
    }
}

impl<T> From<Map<String, Value>> for Param<T> {
    fn from(map: Map<String, Value>) -> Self {
        Param::Raw(Value::Object(map))
    }
}

impl WireValue for Map<String, Value> {
    fn to_wire_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl WireValue for Value {
    fn to_wire_value(&self) -> Value {
        self.clone()
    }
}

impl WireValue for String {
    fn to_wire_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireValue for bool {
    fn to_wire_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn to_wire_value(&self) -> Value {
        Value::Array(self.iter().map(WireValue::to_wire_value).collect())
    }
}
