use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A semi-structured document rooted at an object node.
///
/// Keys keep their insertion order, so a document read from YAML or JSON is written back
/// with its fields in the original order. Deserializing anything other than a mapping into
/// a `Document` fails, which keeps the object-root invariant at the parse boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field without disturbing the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Nested object stored under `key`, if the field holds an object
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    pub fn object_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(key).and_then(Value::as_object_mut)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Hands back the rejected value when it is not an object.
impl TryFrom<Value> for Document {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Human-readable node kind, used in error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Textual form of a scalar that carries content.
///
/// Blank strings, null, arrays and objects yield `None`; numbers and booleans yield their
/// display form.
pub fn non_blank_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn is_blank(value: Option<&Value>) -> bool {
    non_blank_text(value).is_none()
}
