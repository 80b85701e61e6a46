use std::fmt;

use rand::Rng;

use super::attribute_map::AttributeMap;
use super::condition::{Condition, ConditionEvaluator};
use super::document::Document;
use super::item::{ItemRegistry, LootEntry, TagParser};
use super::query::EventQuery;
use super::report::MatchReport;
use super::schema::{Key, Schema};

/// One declarative loot rule: conditions on a drop event plus the item
/// actions to apply when they all hold.
///
/// Built once while loading configuration and read-only afterwards, so a rule
/// can be shared between threads behind an `Arc`. Deciding which of several
/// matching rules applies is left to the caller.
///
/// ```
/// use droprule::{Document, ItemCatalog, JsonTagParser, LootRule};
///
/// let doc = Document::new()
///     .with("mob", "minecraft:zombie")
///     .with("item", "minecraft:diamond")
///     .with("itemcount", "1/1-2/2-3");
/// let catalog = ItemCatalog::new().with("minecraft:diamond");
///
/// let rule = LootRule::parse(Some(&doc), &catalog, &JsonTagParser).unwrap();
/// assert_eq!(rule.to_add_items().len(), 1);
/// assert!(!rule.is_remove_all());
/// ```
#[derive(Debug, Clone)]
pub struct LootRule {
    evaluator: ConditionEvaluator,
    to_add: Vec<LootEntry>,
    to_remove: Vec<LootEntry>,
    remove_all: bool,
}

impl LootRule {
    /// Build a rule from a document. `None` in gives `None` out without
    /// touching the registry or the tag parser.
    ///
    /// Bad values inside the document are logged and degrade; they never
    /// prevent the rule from being built.
    pub fn parse<I, T>(document: Option<&Document>, registry: &I, tags: &T) -> Option<Self>
    where
        I: ItemRegistry + ?Sized,
        T: TagParser + ?Sized,
    {
        let document = document?;
        let attributes = Schema::LOOT.parse(document);
        Some(Self::from_attributes(attributes, registry, tags))
    }

    /// Build a rule from an attribute map assembled in code.
    pub fn from_attributes<I, T>(attributes: AttributeMap, registry: &I, tags: &T) -> Self
    where
        I: ItemRegistry + ?Sized,
        T: TagParser + ?Sized,
    {
        let to_add = crate::actions::resolve_add(
            &attributes.get_strs(Key::Item),
            attributes.get_str(Key::ItemNbt),
            attributes.get_str(Key::ItemCount),
            registry,
            tags,
        );
        let to_remove = crate::actions::resolve_remove(&attributes.get_strs(Key::Remove), registry);
        let remove_all = attributes.get_bool(Key::RemoveAll).unwrap_or(false);

        let evaluator = ConditionEvaluator::new(attributes);
        tracing::debug!(
            conditions = evaluator.conditions().len(),
            add = to_add.len(),
            remove = to_remove.len(),
            remove_all,
            "loot rule built"
        );

        Self {
            evaluator,
            to_add,
            to_remove,
            remove_all,
        }
    }

    /// Parse a rule from the text of one JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`](crate::Error::Document) if the text is not
    /// a JSON object. Problems inside the object degrade as in
    /// [`parse`](Self::parse).
    pub fn from_json<I, T>(text: &str, registry: &I, tags: &T) -> Result<Self, crate::Error>
    where
        I: ItemRegistry + ?Sized,
        T: TagParser + ?Sized,
    {
        let document = Document::from_json(text)?;
        Ok(Self::from_attributes(
            Schema::LOOT.parse(&document),
            registry,
            tags,
        ))
    }

    /// Whether `event` satisfies every condition of this rule.
    ///
    /// `rng` is drawn from only by a `random` condition that is reached.
    pub fn matches<E, Q, R>(&self, event: &E, query: &Q, rng: &mut R) -> bool
    where
        E: ?Sized,
        Q: EventQuery<E> + ?Sized,
        R: Rng + ?Sized,
    {
        self.evaluator.matches(event, query, rng)
    }

    /// Like [`matches`](Self::matches), but reports where the check stopped.
    pub fn matches_detailed<E, Q, R>(&self, event: &E, query: &Q, rng: &mut R) -> MatchReport
    where
        E: ?Sized,
        Q: EventQuery<E> + ?Sized,
        R: Rng + ?Sized,
    {
        self.evaluator.matches_detailed(event, query, rng)
    }

    /// Items to add, in document order.
    #[must_use]
    pub fn to_add_items(&self) -> &[LootEntry] {
        &self.to_add
    }

    /// Items to remove, in document order. Each counts as one.
    #[must_use]
    pub fn to_remove_items(&self) -> &[LootEntry] {
        &self.to_remove
    }

    /// Whether every existing drop should be removed. Independent of
    /// [`to_remove_items`](Self::to_remove_items).
    #[must_use]
    pub fn is_remove_all(&self) -> bool {
        self.remove_all
    }

    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        self.evaluator.attributes()
    }

    /// Compiled conditions in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        self.evaluator.conditions()
    }
}

impl fmt::Display for LootRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.conditions().iter().map(|c| c.key().name()).collect();
        write!(f, "when [{}]", keys.join(", "))?;
        for entry in &self.to_add {
            write!(f, "\n  add {} x {}", entry.item(), entry.count())?;
        }
        for entry in &self.to_remove {
            write!(f, "\n  remove {}", entry.item())?;
        }
        if self.remove_all {
            f.write_str("\n  remove all")?;
        }
        Ok(())
    }
}
