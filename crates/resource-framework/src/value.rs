//! # Value Graph
//!
//! The plain nested object/array/scalar graph exchanged with the markup codec.
//!
//! There are two "no value" states and they stay distinct on the wire:
//! [`Value::Empty`] means *never set* and [`Value::Null`] means *explicitly cleared*.
//! The codec renders them differently (see [`CodecConfig`](crate::codec::CodecConfig)).
//! `Empty` only exists on the write side: its default `<x></x>` reads back as an empty
//! [`Value::Text`].

use crate::resource::Resource;
use indexmap::IndexMap;

/// Insertion-ordered mapping from field name to value.
pub type Fields = IndexMap<String, Value>;

/// A node of the value graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Declared but unset.
    Empty,
    /// Explicitly cleared.
    Null,
    /// Scalar content. Numbers and booleans travel as text.
    Text(String),
    /// Sequence, rendered as repeated sibling elements.
    List(Vec<Value>),
    /// Nested structure.
    Map(Fields),
    /// Nested resource instance, serialized through its own descriptor.
    Resource(Box<Resource>),
}

impl Value {
    /// False for [`Value::Empty`] and [`Value::Null`].
    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Empty | Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_text().and_then(|s| s.trim().parse().ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_text()?.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Text(b.to_string())
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Text(n.to_string())
                }
            }
        )*
    };
}

value_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Fields> for Value {
    fn from(m: Fields) -> Self {
        Value::Map(m)
    }
}

impl From<Resource> for Value {
    fn from(r: Resource) -> Self {
        Value::Resource(Box::new(r))
    }
}

/// Builds a [`Fields`] map from `key => value` pairs.
///
/// ```rust
/// use resource_framework::{fields, Value};
///
/// let options = fields! {
///     "currency" => "USD",
///     "net_terms" => 30,
/// };
/// assert_eq!(options["currency"], Value::from("USD"));
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Fields::new();
        $( map.insert(::std::string::String::from($key), $crate::Value::from($value)); )+
        map
    }};
}
