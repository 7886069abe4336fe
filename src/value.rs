/*!
# JSON Value

Defines the value tree produced by the [parser](crate::parser): objects,
arrays, strings, numbers, booleans and null.

Values derive [`Serialize`] so callers can render them with `serde_json`:

```rust
use jparse::JsonValue;

let value: JsonValue = r#"{"id": 7}"#.parse().expect("valid JSON");
assert_eq!(r#"{"id":7}"#, value.to_json().unwrap());
```
*/
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::JsonParseError;

/// A JSON number: either an exact integer or a floating-point value.
///
/// Source text with a fractional part or exponent (or an integer too large
/// for `i64`) becomes a [`Number::Float`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Exact integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
}

impl Number {
    /// Returns the number as an `f64`, converting integers.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns the integer value, if this is an integer.
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Primary JSON value tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonValue {
    /// A JSON object; duplicate keys keep the last value written
    Object(HashMap<String, JsonValue>),
    /// An ordered JSON array
    Array(Vec<JsonValue>),
    /// A decoded JSON string
    String(String),
    /// A JSON number
    Number(Number),
    /// A JSON boolean
    Boolean(bool),
    /// JSON null
    Null,
}

impl JsonValue {
    /// Compute the depth of the JSON document. Scalars have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(map) => {
                let inner_depth =
                    map.values().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::Array(arr) => {
                let inner_depth =
                    arr.iter().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::String(_) | Self::Number(_) | Self::Boolean(_) | Self::Null => {
                1
            }
        }
    }

    /// Look up a key, if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the string content, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this value is an array.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns whether this value is JSON null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert to pretty-printed JSON string
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to compact JSON string
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(number) => {
                Self::Number(number.as_i64().map_or_else(
                    || Number::Float(number.as_f64().unwrap_or(f64::NAN)),
                    Number::Integer,
                ))
            }
            serde_json::Value::String(str) => Self::String(str),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

impl FromStr for JsonValue {
    type Err = JsonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

// `TryFrom` over `From` since the input text may be malformed
impl TryFrom<&str> for JsonValue {
    type Error = JsonParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
