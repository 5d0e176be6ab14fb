//! Values crossing the scripting boundary.

use serde::{Serialize, Serializer};

/// An argument to, or a return value from, a native function.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// An ordered sequence, e.g. the paths returned by `globfiles`.
    Array(Vec<Value>),
}

impl Value {
    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to JSON. NaN and infinities become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Null.to_json(), serde_json::json!(null));
        assert_eq!(Value::from(true).to_json(), serde_json::json!(true));
        assert_eq!(Value::from(7).to_json(), serde_json::json!(7));
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::json!(null));
        assert_eq!(
            Value::from(vec!["a.txt", "b.txt"]).to_json(),
            serde_json::json!(["a.txt", "b.txt"])
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let value = Value::Array(vec![Value::Null, Value::from("error"), Value::from(1)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[null,"error",1]"#);
    }
}
