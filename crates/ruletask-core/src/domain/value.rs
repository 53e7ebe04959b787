//! Typed values: the uniform currency for decision inputs, outputs and variables.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind tag of a [`TypedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Null,
    String,
    Boolean,
    Integer,
    Long,
    Double,
    Object,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Long => "long",
            ValueKind::Double => "double",
            ValueKind::Object => "object",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// A tagged value.
///
/// Serialized as `{"type": "...", "value": ...}` so that the kind survives
/// a round trip through JSON (an `integer` and a `long` look the same as
/// bare JSON numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TypedValue {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    /// Opaque payload the engine does not interpret.
    Object(serde_json::Value),
    List(Vec<TypedValue>),
    Map(OutputMap),
}

impl TypedValue {
    pub fn string(value: impl Into<String>) -> Self {
        TypedValue::String(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Null => ValueKind::Null,
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Boolean(_) => ValueKind::Boolean,
            TypedValue::Integer(_) => ValueKind::Integer,
            TypedValue::Long(_) => ValueKind::Long,
            TypedValue::Double(_) => ValueKind::Double,
            TypedValue::Object(_) => ValueKind::Object,
            TypedValue::List(_) => ValueKind::List,
            TypedValue::Map(_) => ValueKind::Map,
        }
    }

    /// Wrap an untyped JSON value, inferring the narrowest kind.
    ///
    /// Integral numbers become `integer` when they fit in 32 bits and `long`
    /// otherwise. Arrays and objects stay opaque.
    pub fn untyped(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => TypedValue::Null,
            Value::Bool(b) => TypedValue::Boolean(b),
            Value::String(s) => TypedValue::String(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => TypedValue::Integer(small),
                        Err(_) => TypedValue::Long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    TypedValue::Double(f)
                } else {
                    // u64 above i64::MAX
                    TypedValue::Object(Value::Number(n))
                }
            }
            other => TypedValue::Object(other),
        }
    }

    /// Normalize a value for audit storage.
    ///
    /// Opaque objects that hold a primitive are re-typed; containers are
    /// normalized element-wise. Everything else is returned as is.
    pub fn normalized(self) -> Self {
        match self {
            TypedValue::Object(json) => TypedValue::untyped(json),
            TypedValue::List(items) => {
                TypedValue::List(items.into_iter().map(TypedValue::normalized).collect())
            }
            TypedValue::Map(map) => TypedValue::Map(
                map.into_iter()
                    .map(|(name, value)| (name, value.normalized()))
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Long(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Double(value)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Null => f.write_str("null"),
            TypedValue::String(s) => write!(f, "{s:?}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Integer(i) => write!(f, "{i}"),
            TypedValue::Long(l) => write!(f, "{l}L"),
            TypedValue::Double(d) => write!(f, "{d}"),
            TypedValue::Object(json) => write!(f, "{json}"),
            TypedValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            TypedValue::Map(map) => write!(f, "{map}"),
        }
    }
}

/// Insertion-ordered `name -> value` map.
///
/// Output clauses keep the order the evaluator reported them in, so a plain
/// `HashMap` (or a sorted `BTreeMap`) would lose information. Names are
/// unique: inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputMap {
    entries: Vec<(String, TypedValue)>,
}

impl OutputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) -> Option<TypedValue> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, TypedValue)> for OutputMap {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        let mut map = OutputMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl IntoIterator for OutputMap {
    type Item = (String, TypedValue);
    type IntoIter = std::vec::IntoIter<(String, TypedValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for OutputMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for OutputMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OutputMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OutputMapVisitor;

        impl<'de> Visitor<'de> for OutputMapVisitor {
            type Value = OutputMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of output names to typed values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OutputMap, A::Error> {
                let mut map = OutputMap::new();
                while let Some((name, value)) = access.next_entry::<String, TypedValue>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OutputMapVisitor)
    }
}
