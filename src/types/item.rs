use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use super::count::CountResolver;
use super::error::TagParseError;

/// A structured item tag tree, the payload attached by a rule's `nbt` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    List(Vec<Tag>),
    Compound(BTreeMap<String, Tag>),
}

/// A concrete item: identity plus quantity-independent attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    id: String,
    meta: u32,
    tag: Option<Tag>,
}

impl ItemDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meta: 0,
            tag: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: u32) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Registry name, e.g. `minecraft:diamond`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Metadata (damage) value distinguishing variants of one id.
    #[must_use]
    pub fn meta(&self) -> u32 {
        self.meta
    }

    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if self.meta != 0 {
            write!(f, "@{}", self.meta)?;
        }
        if self.tag.is_some() {
            f.write_str(" {..}")?;
        }
        Ok(())
    }
}

/// Resolves the item names written in rule documents.
pub trait ItemRegistry {
    /// `None` when `name` does not denote a known item.
    fn resolve(&self, name: &str) -> Option<ItemDescriptor>;
}

/// Parses the tag payload of a rule's `nbt` field.
pub trait TagParser {
    /// # Errors
    ///
    /// Returns [`TagParseError`] when the payload is malformed.
    fn parse(&self, payload: &str) -> Result<Tag, TagParseError>;
}

/// One item action: the item and how many of it.
///
/// All entries produced by one action share the same resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct LootEntry {
    item: ItemDescriptor,
    count: Arc<CountResolver>,
}

impl LootEntry {
    pub fn new(item: ItemDescriptor, count: Arc<CountResolver>) -> Self {
        Self { item, count }
    }

    #[must_use]
    pub fn item(&self) -> &ItemDescriptor {
        &self.item
    }

    #[must_use]
    pub fn count(&self) -> &Arc<CountResolver> {
        &self.count
    }

    /// Resolve the count for `looting` level.
    pub fn roll<R: Rng + ?Sized>(&self, looting: i32, rng: &mut R) -> i32 {
        self.count.resolve(looting, rng)
    }
}

/// An in-memory [`ItemRegistry`] over a fixed set of item ids.
///
/// Understands `namespace:path` and the `@meta` suffix; bare paths are looked
/// up in the `minecraft` namespace.
///
/// ```
/// use droprule::{ItemCatalog, ItemRegistry};
///
/// let catalog: ItemCatalog = ["minecraft:wool", "minecraft:stone"].into_iter().collect();
/// let wool = catalog.resolve("wool@14").unwrap();
/// assert_eq!(wool.id(), "minecraft:wool");
/// assert_eq!(wool.meta(), 14);
/// assert!(catalog.resolve("minecraft:bedrock").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    ids: HashSet<String>,
}

impl ItemCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully qualified item id.
    #[must_use]
    pub fn with(mut self, id: &str) -> Self {
        self.insert(id);
        self
    }

    pub fn insert(&mut self, id: &str) {
        self.ids.insert(id.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl ItemRegistry for ItemCatalog {
    fn resolve(&self, name: &str) -> Option<ItemDescriptor> {
        let parsed = crate::parse::item_name(name).ok()?;
        let id = parsed.qualified();
        if !self.ids.contains(&id) {
            return None;
        }
        Some(ItemDescriptor::new(id).with_meta(parsed.meta.unwrap_or(0)))
    }
}

/// A [`TagParser`] for payloads written as JSON objects.
///
/// Booleans become bytes, integers become ints (or longs when they do not fit),
/// other numbers become doubles.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTagParser;

impl TagParser for JsonTagParser {
    fn parse(&self, payload: &str) -> Result<Tag, TagParseError> {
        let json: serde_json::Value =
            serde_json::from_str(payload).map_err(|e| TagParseError::new(e.to_string()))?;
        match json {
            serde_json::Value::Object(_) => json_to_tag(json),
            _ => Err(TagParseError::new("tag payload must be an object")),
        }
    }
}

fn json_to_tag(json: serde_json::Value) -> Result<Tag, TagParseError> {
    Ok(match json {
        serde_json::Value::Null => return Err(TagParseError::new("null is not a tag value")),
        serde_json::Value::Bool(b) => Tag::Byte(i8::from(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map_or(Tag::Long(i), Tag::Int),
            None => Tag::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Tag::String(s),
        serde_json::Value::Array(items) => Tag::List(
            items
                .into_iter()
                .map(json_to_tag)
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(fields) => Tag::Compound(
            fields
                .into_iter()
                .map(|(k, v)| json_to_tag(v).map(|t| (k, t)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::new()
            .with("minecraft:stone")
            .with("minecraft:wool")
            .with("thaumcraft:amber")
    }

    #[test]
    fn catalog_resolves_known_items() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve("minecraft:stone"),
            Some(ItemDescriptor::new("minecraft:stone"))
        );
        assert_eq!(
            catalog.resolve("stone"),
            Some(ItemDescriptor::new("minecraft:stone"))
        );
        assert_eq!(
            catalog.resolve("thaumcraft:amber@1"),
            Some(ItemDescriptor::new("thaumcraft:amber").with_meta(1))
        );
    }

    #[test]
    fn catalog_rejects_unknown_or_malformed() {
        let catalog = catalog();
        assert_eq!(catalog.resolve("bogus"), None);
        assert_eq!(catalog.resolve("thaumcraft:stone"), None);
        assert_eq!(catalog.resolve("stone@"), None);
        assert_eq!(catalog.resolve(""), None);
    }

    #[test]
    fn json_tag_compound() {
        let tag = JsonTagParser
            .parse(r#"{"display": {"Name": "Lucky"}, "Unbreakable": true, "ench": [1, 2]}"#)
            .unwrap();
        let Tag::Compound(fields) = tag else {
            panic!("expected compound");
        };
        assert_eq!(fields["Unbreakable"], Tag::Byte(1));
        assert_eq!(fields["ench"], Tag::List(vec![Tag::Int(1), Tag::Int(2)]));
        assert!(matches!(&fields["display"], Tag::Compound(d) if d["Name"] == Tag::String("Lucky".into())));
    }

    #[test]
    fn json_tag_numbers() {
        let tag = JsonTagParser
            .parse(r#"{"big": 10000000000, "half": 0.5}"#)
            .unwrap();
        let Tag::Compound(fields) = tag else {
            panic!("expected compound");
        };
        assert_eq!(fields["big"], Tag::Long(10_000_000_000));
        assert_eq!(fields["half"], Tag::Double(0.5));
    }

    #[test]
    fn json_tag_rejects_malformed() {
        assert!(JsonTagParser.parse("{display:").is_err());
        assert!(JsonTagParser.parse("[1, 2]").is_err());
        assert!(JsonTagParser.parse(r#"{"a": null}"#).is_err());
    }

    #[test]
    fn descriptor_display() {
        assert_eq!(ItemDescriptor::new("minecraft:wool").to_string(), "minecraft:wool");
        assert_eq!(
            ItemDescriptor::new("minecraft:wool").with_meta(3).to_string(),
            "minecraft:wool@3"
        );
        let tagged = ItemDescriptor::new("minecraft:stick").with_tag(Tag::Compound(BTreeMap::new()));
        assert_eq!(tagged.to_string(), "minecraft:stick {..}");
    }

    #[test]
    fn entries_roll_through_shared_resolver() {
        use rand::SeedableRng;

        let count = Arc::new(CountResolver::Constant(3));
        let a = LootEntry::new(ItemDescriptor::new("minecraft:stone"), Arc::clone(&count));
        let b = LootEntry::new(ItemDescriptor::new("minecraft:wool"), Arc::clone(&count));
        assert!(Arc::ptr_eq(a.count(), b.count()));
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        assert_eq!(a.roll(0, &mut rng), 3);
    }
}
