use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::error::DocumentError;

/// A raw rule document: the fields of one JSON object, in source order.
///
/// Unlike `serde_json::Map`, repeated field names are all kept, so multi-valued
/// keys such as `"item"` can accumulate every occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, serde_json::Value)>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Earlier fields with the same name are kept.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.push(name, value.into());
        self
    }

    /// Append a field (mutable reference version).
    pub fn push(&mut self, name: &str, value: serde_json::Value) {
        self.entries.push((name.to_owned(), value));
    }

    /// Parse a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the text is not valid JSON or is not an object.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnObject`] for anything but a JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(DocumentError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Iterate over `(field, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rule object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
            entries.push((name, value));
        }
        Ok(Document { entries })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}
