//! Argument values carried by a log entry
//!
//! An entry's argument list is a flat, ordered sequence of [`Value`]s. Field
//! style formatters read it as alternating key/value pairs; the text formatter
//! joins it with spaces and the JSON formatter encodes it as an array.
//!
//! Cloning a value never copies string or JSON content that lives on the
//! heap once it is [shared](Value::into_shared); loggers store their fixed
//! prefix and suffix arguments that way.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Value type for log arguments
#[derive(Debug, Clone)]
pub enum Value {
    Str(Cow<'static, str>),
    /// Reference-counted string, cloned without copying
    Shared(Arc<str>),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary structured data, encoded as-is by the JSON formatter
    Json(Arc<serde_json::Value>),
}

impl Value {
    /// Encode any serializable value as a structured argument
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Move an owned string behind a reference count so clones share it
    #[must_use]
    pub fn into_shared(self) -> Self {
        match self {
            Value::Str(Cow::Owned(s)) => Value::Shared(Arc::from(s)),
            other => other,
        }
    }

    /// The string content, if this is a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Shared(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Shared(_))
    }
}

/// String values compare by content whatever their storage
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Json(a), Value::Json(b)) => a == b,
            _ => match (self.as_str(), other.as_str()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Shared(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Shared(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::Json(v) => v.serialize(serializer),
        }
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Cow::Owned(s))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(s: Cow<'static, str>) -> Self {
        Value::Str(s)
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Shared(s)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(u: $t) -> Self {
                Value::Uint(u as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(Cow::Owned(c.to_string()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(Arc::new(v))
    }
}

impl From<Arc<serde_json::Value>> for Value {
    fn from(v: Arc<serde_json::Value>) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(-42).to_string(), "-42");
        assert_eq!(Value::from(7u8).to_string(), "7");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(None::<i32>).to_string(), "null");
        assert_eq!(
            Value::from(serde_json::json!({"a": 1})).to_string(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_serialize() {
        let args = vec![
            Value::from("name"),
            Value::from("张三"),
            Value::from(3),
            Value::Null,
            Value::from(false),
        ];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, r#"["name","张三",3,null,false]"#);
    }

    #[test]
    fn test_json_constructor() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = Value::json(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn test_borrowed_str_does_not_allocate() {
        let value = Value::from("static");
        assert!(matches!(value, Value::Str(Cow::Borrowed(_))));
        assert_eq!(value.as_str(), Some("static"));
        assert!(!Value::from(1).is_str());
    }

    #[test]
    fn test_shared_clones_point_at_one_allocation() {
        let value = Value::from(String::from("billing")).into_shared();
        let copy = value.clone();
        match (&value, &copy) {
            (Value::Shared(a), Value::Shared(b)) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("expected shared strings, got {:?}", other),
        }
        assert_eq!(copy.as_str(), Some("billing"));
        assert_eq!(copy, Value::from("billing"));
        assert_eq!(copy.to_string(), "billing");
        assert_eq!(serde_json::to_string(&copy).unwrap(), r#""billing""#);

        let json = Value::from(serde_json::json!({"region": "eu"}));
        match (&json, &json.clone()) {
            (Value::Json(a), Value::Json(b)) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("expected json values, got {:?}", other),
        }

        assert!(matches!(Value::from("static").into_shared(), Value::Str(Cow::Borrowed(_))));
        assert_ne!(Value::from("1"), Value::from(1));
    }
}
