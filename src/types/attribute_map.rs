use std::collections::BTreeMap;

use super::document::Document;
use super::schema::{Cardinality, Key, Schema, ValueType};
use super::value::Value;

/// Typed key/value store parsed from a rule [`Document`] against a [`Schema`].
///
/// Single-valued keys hold their last occurrence; multi-valued keys hold every
/// occurrence in document order. Only keys the schema declares are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    values: BTreeMap<Key, Vec<Value>>,
}

impl AttributeMap {
    /// Start building a map programmatically.
    #[must_use]
    pub fn builder() -> AttributeMapBuilder {
        AttributeMapBuilder::default()
    }

    /// Parse `document`, keeping only fields `schema` declares.
    ///
    /// Values of the wrong type are logged and skipped; they never abort the parse.
    #[must_use]
    pub fn parse(schema: &Schema, document: &Document) -> Self {
        let mut map = Self::default();
        for (name, json) in document.iter() {
            let Some(attr) = schema.get(name) else {
                continue;
            };
            match (attr.cardinality, json) {
                (Cardinality::Multi, serde_json::Value::Array(items)) => {
                    for item in items {
                        map.insert_json(attr.key, item);
                    }
                }
                _ => map.insert_json(attr.key, json),
            }
        }
        map
    }

    fn insert_json(&mut self, key: Key, json: &serde_json::Value) {
        match Value::from_json(json, key.value_type()) {
            Some(value) => self.insert(key, value),
            None => tracing::warn!(
                key = key.name(),
                value = %json,
                "ignoring value of the wrong type in loot rule"
            ),
        }
    }

    /// Store an already-conforming value according to the key's cardinality.
    fn insert(&mut self, key: Key, value: Value) {
        let slot = self.values.entry(key).or_default();
        if key.cardinality() == Cardinality::Single {
            slot.clear();
        }
        slot.push(value);
    }

    /// Whether the source document supplied `key`.
    #[must_use]
    pub fn has(&self, key: Key) -> bool {
        self.values.contains_key(&key)
    }

    /// The value of a single-valued key, or the last value of a multi-valued one.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&Value> {
        self.values.get(&key).and_then(|v| v.last())
    }

    /// All values of `key` in document order. Empty when absent.
    #[must_use]
    pub fn get_list(&self, key: Key) -> &[Value] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn get_int(&self, key: Key) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    #[must_use]
    pub fn get_float(&self, key: Key) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    #[must_use]
    pub fn get_bool(&self, key: Key) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_str(&self, key: Key) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String values of a multi-valued key, in document order.
    #[must_use]
    pub fn get_strs(&self, key: Key) -> Vec<&str> {
        self.get_list(key).iter().filter_map(Value::as_str).collect()
    }

    /// The keys present in this map, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.values.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for an [`AttributeMap`], the programmatic counterpart of a JSON document.
///
/// # Example
///
/// ```
/// use droprule::{AttributeMap, Key};
///
/// let map = AttributeMap::builder()
///     .set(Key::Mob, "minecraft:zombie")
///     .set(Key::MinHeight, 40)
///     .set(Key::Item, "minecraft:diamond")
///     .set(Key::ItemCount, "1/1-2")
///     .build();
///
/// assert!(map.has(Key::Mob));
/// assert_eq!(map.get_int(Key::MinHeight), Some(40));
/// ```
#[derive(Debug, Default)]
pub struct AttributeMapBuilder {
    map: AttributeMap,
}

impl AttributeMapBuilder {
    /// Set `key`. Multi-valued keys append; single-valued keys replace.
    /// A value that does not fit the key's type is logged and dropped.
    #[must_use]
    pub fn set(mut self, key: Key, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Set `key` (mutable reference version).
    pub fn insert(&mut self, key: Key, value: Value) {
        match conform(value, key.value_type()) {
            Ok(value) => self.map.insert(key, value),
            Err(value) => tracing::warn!(
                key = key.name(),
                value = %value,
                "ignoring value of the wrong type in loot rule"
            ),
        }
    }

    #[must_use]
    pub fn build(self) -> AttributeMap {
        self.map
    }
}

fn conform(value: Value, ty: ValueType) -> Result<Value, Value> {
    match (ty, value) {
        (ValueType::Int, v @ Value::Int(_))
        | (ValueType::Float, v @ Value::Float(_))
        | (ValueType::Bool, v @ Value::Bool(_))
        | (ValueType::String | ValueType::Identifier, v @ Value::String(_)) => Ok(v),
        #[allow(clippy::cast_precision_loss)]
        (ValueType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (ValueType::Identifier, Value::Int(i)) => Ok(Value::String(i.to_string())),
        (_, v) => Err(v),
    }
}
