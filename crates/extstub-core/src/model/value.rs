//! Constant and default values

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A value as the runtime reports it for constants and parameter defaults
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered array; keys keep their insertion order
    Array(Vec<(ArrayKey, Value)>),
}

/// Key of an array entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

impl ArrayKey {
    /// Normalize a string key the way the runtime does: canonical decimal
    /// integers become integer keys, anything else stays a string.
    pub fn from_string_key(key: &str) -> Self {
        if is_canonical_int(key) {
            if let Ok(n) = key.parse::<i64>() {
                return ArrayKey::Int(n);
            }
        }
        ArrayKey::String(key.to_string())
    }
}

fn is_canonical_int(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return !key.starts_with('-');
    }
    !digits.starts_with('0')
}

impl Value {
    /// Build a list with sequential integer keys
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(
            items
                .into_iter()
                .zip(0..)
                .map(|(value, index)| (ArrayKey::Int(index), value))
                .collect(),
        )
    }

    /// Build an array from explicit key/value pairs
    pub fn map(entries: impl IntoIterator<Item = (ArrayKey, Value)>) -> Self {
        Value::Array(entries.into_iter().collect())
    }

    /// Whether this is an array whose keys are exactly 0, 1, 2, ...
    pub fn is_list(&self) -> bool {
        match self {
            Value::Array(entries) => entries
                .iter()
                .zip(0..)
                .all(|((key, _), index)| *key == ArrayKey::Int(index)),
            _ => false,
        }
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

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number, a string, a list or a map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    // Integers beyond i64 overflow to float, as they do at runtime
    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<ArrayKey, Value>()? {
            entries.push((key, value));
        }
        Ok(Value::Array(entries))
    }
}

impl<'de> Deserialize<'de> for ArrayKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ArrayKeyVisitor)
    }
}

struct ArrayKeyVisitor;

impl Visitor<'_> for ArrayKeyVisitor {
    type Value = ArrayKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string array key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ArrayKey, E> {
        Ok(ArrayKey::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ArrayKey, E> {
        i64::try_from(v)
            .map(ArrayKey::Int)
            .map_err(|_| E::custom(format!("array key {v} is out of range")))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ArrayKey, E> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ArrayKey, E> {
        Ok(ArrayKey::from_string_key(v))
    }
}
