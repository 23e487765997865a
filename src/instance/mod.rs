//! Runtime object graph
//!
//! Resolution reads attribute values off live objects through the [`Object`]
//! trait. Relation managers are exposed as [`Collection`]s, methods as
//! zero-argument callables. [`Record`] is a dynamic implementation used by
//! fixtures and tests; host applications implement [`Object`] for their own
//! model types.

mod fixture;
mod record;

pub use fixture::{load_fixture, FixtureError};
pub use record::{Record, RecordBuilder, RelatedSet};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

/// Shared handle to an object in the instance graph
pub type ObjectRef = Arc<dyn Object>;

/// A model instance whose attributes can be read by name
pub trait Object: Send + Sync {
    /// Name of the model in the schema
    fn model(&self) -> &str;

    /// Read an attribute. `None` means the object has no such attribute.
    fn attr(&self, name: &str) -> Option<Attribute<'_>>;

    /// Human-readable representation of the object
    fn display(&self) -> String;
}

/// The result of reading one attribute off an object
pub enum Attribute<'a> {
    /// A plain value
    Value(Value),
    /// A relation manager; expanded into all related items
    Collection(&'a dyn Collection),
    /// A zero-argument method; invoked and its result used
    Callable(Box<dyn Fn() -> Value + 'a>),
}

impl fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Attribute::Collection(_) => write!(f, "Collection(..)"),
            Attribute::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

/// Capability to enumerate all related items of a to-many relation
pub trait Collection: Send + Sync {
    fn all(&self) -> Vec<Value>;
}

impl Collection for Vec<Value> {
    fn all(&self) -> Vec<Value> {
        self.clone()
    }
}

/// A runtime value produced by attribute access
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Object(ObjectRef),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Lookup key for value-keyed maps (badge colors and labels, route parameters).
    ///
    /// Objects are keyed by their `pk` attribute; null and lists have no key.
    /// Whole floats keep their fractional digit (`4.0`, not `4`).
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Null | Value::List(_) => None,
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => Some(format!("{:.1}", x)),
            Value::Object(obj) => match obj.attr("pk")? {
                Attribute::Value(pk) => pk.key(),
                Attribute::Callable(f) => f().key(),
                Attribute::Collection(_) => None,
            },
            other => Some(other.to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Date(d) => write!(f, "Date({})", d),
            Value::DateTime(dt) => write!(f, "DateTime({})", dt.to_rfc3339()),
            Value::Object(obj) => write!(f, "Object({}: {:?})", obj.model(), obj.display()),
            Value::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Object(obj) => write!(f, "{}", obj.display()),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Date(_) | Value::DateTime(_) | Value::Object(_) => {
                serializer.collect_str(self)
            }
            Value::List(items) => serializer.collect_seq(items),
        }
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

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<Arc<Record>> for Value {
    fn from(record: Arc<Record>) -> Self {
        Value::Object(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(4.2).to_string(), "4.2");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a, b");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::from(date).to_string(), "2024-03-09");
    }

    #[test]
    fn test_value_key() {
        assert_eq!(Value::from(true).key(), Some("true".to_string()));
        assert_eq!(Value::from(7).key(), Some("7".to_string()));
        assert_eq!(Value::Null.key(), None);
        assert_eq!(Value::from(vec![1, 2]).key(), None);
    }

    #[test]
    fn test_float_key_keeps_fraction() {
        assert_eq!(Value::Float(4.0).key(), Some("4.0".to_string()));
        assert_eq!(Value::Float(-2.0).key(), Some("-2.0".to_string()));
        assert_eq!(Value::Float(4.5).key(), Some("4.5".to_string()));
        assert_eq!(Value::Float(f64::INFINITY).key(), Some("inf".to_string()));
    }

    #[test]
    fn test_object_key_is_pk() {
        let rec = Record::builder("User").pk(12).build();
        assert_eq!(Value::from(rec).key(), Some("12".to_string()));
    }

    #[test]
    fn test_object_equality_is_identity() {
        let a = Record::builder("User").pk(1).build();
        let b = Record::builder("User").pk(1).build();
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<&str> = None;
        assert!(Value::from(none).is_null());
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_serialize_value() {
        let v = Value::from(vec![Value::from(1), Value::Null, Value::from("a")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,null,"a"]"#);
    }
}
