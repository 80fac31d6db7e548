use std::borrow::Cow;
use std::iter::FromIterator;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::time::EventTime;

/// A decoded MessagePack value.
///
/// Positive fixints and the `uint*` family decode to `Uint`; negative fixints
/// and the `int*` family decode to `Int`, whatever their sign.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Map),
    Time(EventTime),
    /// Extension with no registered decoder.
    Ext(i8, Vec<u8>),
}

/// Closed set of shapes record extraction dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Mapping(Map),
    OrderedSequence(Vec<Value>),
    UnsignedInteger(u64),
    ExtensionTimestamp(EventTime),
    Other(Value),
}

impl Value {
    pub fn into_kind(self) -> Kind {
        match self {
            Value::Map(m) => Kind::Mapping(m),
            Value::Array(a) => Kind::OrderedSequence(a),
            Value::Uint(n) => Kind::UnsignedInteger(n),
            Value::Time(t) => Kind::ExtensionTimestamp(t),
            other => Kind::Other(other),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Text used when the value appears as a map key in text output.
    pub fn key_string(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            Value::Nil => Cow::Borrowed("null"),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Int(n) => Cow::Owned(n.to_string()),
            Value::Uint(n) => Cow::Owned(n.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::Bin(b) => String::from_utf8_lossy(b),
            Value::Time(t) => Cow::Owned(t.to_string()),
            other => Cow::Owned(serde_json::to_string(other).unwrap_or_default()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<EventTime> for Value {
    fn from(t: EventTime) -> Self {
        Value::Time(t)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bin(b) => serializer.serialize_bytes(b),
            Value::Array(a) => a.serialize(serializer),
            Value::Map(m) => m.serialize(serializer),
            Value::Time(t) => t.serialize(serializer),
            Value::Ext(tag, data) => {
                let mut ext = serializer.serialize_struct("Ext", 2)?;
                ext.serialize_field("type", tag)?;
                ext.serialize_field("data", data)?;
                ext.end()
            }
        }
    }
}

/// Key/value pairs in wire order. Keys are arbitrary values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map(Vec<(Value, Value)>);

impl Map {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        self.0.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.0.iter()
    }

    /// First value stored under the string key `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(_, v)| v)
    }

    /// Like `get`, falling back to an ASCII case-insensitive match.
    pub fn get_ignore_case(&self, name: &str) -> Option<&Value> {
        self.get(name).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| k.as_str().map_or(false, |k| k.eq_ignore_ascii_case(name)))
                .map(|(_, v)| v)
        })
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Map {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k.key_string().as_ref(), v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_kind() {
        assert_eq!(Kind::UnsignedInteger(7), Value::Uint(7).into_kind());
        assert_eq!(Kind::Other(Value::Int(7)), Value::Int(7).into_kind());
        assert_eq!(Kind::OrderedSequence(vec![]), Value::Array(vec![]).into_kind());
        assert_eq!(
            Kind::ExtensionTimestamp(EventTime::new(1, 2)),
            Value::Time(EventTime::new(1, 2)).into_kind()
        );
        assert_eq!(Kind::Mapping(Map::new()), Value::Map(Map::new()).into_kind());
    }

    #[test]
    fn test_map_lookup() {
        let map: Map = vec![("Name", "a"), ("name", "b"), ("Desc", "c")]
            .into_iter()
            .collect();
        assert_eq!(Some(&Value::from("b")), map.get("name"));
        assert_eq!(Some(&Value::from("b")), map.get_ignore_case("name"));
        assert_eq!(None, map.get("desc"));
        assert_eq!(Some(&Value::from("c")), map.get_ignore_case("desc"));
    }

    #[test]
    fn test_non_string_keys_are_skipped_by_lookup() {
        let mut map = Map::new();
        map.push(1u64, "one");
        assert_eq!(None, map.get("1"));
        assert_eq!(1, map.len());
    }

    #[test]
    fn test_serialize_json() -> Result<(), serde_json::Error> {
        let mut map = Map::new();
        map.push("log", "hello");
        map.push(7u64, vec![Value::Nil, Value::Bool(true), Value::Int(-1)]);
        map.push("t", EventTime::new(1, 500_000));
        assert_eq!(
            r#"{"log":"hello","7":[null,true,-1],"t":1.5}"#,
            serde_json::to_string(&map)?
        );
        Ok(())
    }
}
