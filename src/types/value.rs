use std::fmt;

use super::schema::ValueType;

/// A typed attribute value read from a rule document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string. Identifier-typed keys are stored here too.
    String(String),
}

impl Value {
    /// Coerce a JSON value into the given value type.
    /// Returns `None` when the JSON type cannot represent `ty`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value, ty: ValueType) -> Option<Value> {
        match (ty, json) {
            (ValueType::Int, serde_json::Value::Number(n)) => n.as_i64().map(Value::Int),
            (ValueType::Float, serde_json::Value::Number(n)) => n.as_f64().map(Value::Float),
            (ValueType::Bool, serde_json::Value::Bool(b)) => Some(Value::Bool(*b)),
            (ValueType::String | ValueType::Identifier, serde_json::Value::String(s)) => {
                Some(Value::String(s.clone()))
            }
            // Dimension ids and the like may be written as bare numbers.
            (ValueType::Identifier, serde_json::Value::Number(n)) if n.is_i64() => {
                Some(Value::String(n.to_string()))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats and integers both read as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// The value type this value satisfies. Strings report [`ValueType::String`].
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
        }
    }
}
