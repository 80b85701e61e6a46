use std::fmt;

use super::attribute_map::AttributeMap;
use super::document::Document;

/// Whether a key holds one value or an ordered list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// The last occurrence in a document wins.
    Single,
    /// Every occurrence is kept, in document order.
    Multi,
}

/// The type a key's values are coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Bool,
    String,
    Float,
    /// A registry name such as `minecraft:zombie`. Numbers are accepted and stringified.
    Identifier,
}

/// Every key a loot rule document may contain.
///
/// The discriminant order matches [`LOOT_ATTRIBUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    MinTime,
    MaxTime,
    MinLight,
    MaxLight,
    MinHeight,
    MaxHeight,
    MinDifficulty,
    MaxDifficulty,
    MinSpawnDist,
    MaxSpawnDist,
    Random,
    InBuilding,
    InCity,
    InStreet,
    InSphere,
    GameStage,
    Passive,
    Hostile,
    SeeSky,
    Weather,
    TempCategory,
    Difficulty,
    Structure,
    Player,
    RealPlayer,
    FakePlayer,
    Projectile,
    Explosion,
    Fire,
    Magic,
    Mob,
    Mod,
    Block,
    Biome,
    BiomeType,
    Dimension,
    Source,
    HeldItem,
    ItemNbt,
    ItemCount,
    Item,
    Remove,
    RemoveAll,
}

/// A schema entry: the key, its document field name, cardinality and value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeKey {
    pub key: Key,
    pub name: &'static str,
    pub cardinality: Cardinality,
    pub value_type: ValueType,
}

const fn single(key: Key, name: &'static str, value_type: ValueType) -> AttributeKey {
    AttributeKey {
        key,
        name,
        cardinality: Cardinality::Single,
        value_type,
    }
}

const fn multi(key: Key, name: &'static str, value_type: ValueType) -> AttributeKey {
    AttributeKey {
        key,
        name,
        cardinality: Cardinality::Multi,
        value_type,
    }
}

/// The loot rule schema, indexed by `Key as usize`.
pub const LOOT_ATTRIBUTES: [AttributeKey; 43] = [
    single(Key::MinTime, "mintime", ValueType::Int),
    single(Key::MaxTime, "maxtime", ValueType::Int),
    single(Key::MinLight, "minlight", ValueType::Int),
    single(Key::MaxLight, "maxlight", ValueType::Int),
    single(Key::MinHeight, "minheight", ValueType::Int),
    single(Key::MaxHeight, "maxheight", ValueType::Int),
    single(Key::MinDifficulty, "mindifficulty", ValueType::Float),
    single(Key::MaxDifficulty, "maxdifficulty", ValueType::Float),
    single(Key::MinSpawnDist, "minspawndist", ValueType::Float),
    single(Key::MaxSpawnDist, "maxspawndist", ValueType::Float),
    single(Key::Random, "random", ValueType::Float),
    single(Key::InBuilding, "inbuilding", ValueType::Bool),
    single(Key::InCity, "incity", ValueType::Bool),
    single(Key::InStreet, "instreet", ValueType::Bool),
    single(Key::InSphere, "insphere", ValueType::Bool),
    single(Key::GameStage, "gamestage", ValueType::String),
    single(Key::Passive, "passive", ValueType::Bool),
    single(Key::Hostile, "hostile", ValueType::Bool),
    single(Key::SeeSky, "seesky", ValueType::Bool),
    single(Key::Weather, "weather", ValueType::String),
    single(Key::TempCategory, "tempcategory", ValueType::String),
    single(Key::Difficulty, "difficulty", ValueType::String),
    single(Key::Structure, "structure", ValueType::String),
    single(Key::Player, "player", ValueType::Bool),
    single(Key::RealPlayer, "realplayer", ValueType::Bool),
    single(Key::FakePlayer, "fakeplayer", ValueType::Bool),
    single(Key::Projectile, "projectile", ValueType::Bool),
    single(Key::Explosion, "explosion", ValueType::Bool),
    single(Key::Fire, "fire", ValueType::Bool),
    single(Key::Magic, "magic", ValueType::Bool),
    multi(Key::Mob, "mob", ValueType::Identifier),
    multi(Key::Mod, "mod", ValueType::Identifier),
    multi(Key::Block, "block", ValueType::Identifier),
    multi(Key::Biome, "biome", ValueType::Identifier),
    multi(Key::BiomeType, "biometype", ValueType::Identifier),
    multi(Key::Dimension, "dimension", ValueType::Identifier),
    multi(Key::Source, "source", ValueType::Identifier),
    multi(Key::HeldItem, "helditem", ValueType::Identifier),
    single(Key::ItemNbt, "nbt", ValueType::String),
    single(Key::ItemCount, "itemcount", ValueType::String),
    multi(Key::Item, "item", ValueType::Identifier),
    multi(Key::Remove, "remove", ValueType::Identifier),
    single(Key::RemoveAll, "removeall", ValueType::Bool),
];

impl Key {
    /// The schema entry for this key.
    #[must_use]
    pub fn attribute(self) -> &'static AttributeKey {
        &Schema::LOOT.attributes[self as usize]
    }

    /// The document field name, e.g. `"minlight"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.attribute().name
    }

    #[must_use]
    pub fn cardinality(self) -> Cardinality {
        self.attribute().cardinality
    }

    #[must_use]
    pub fn value_type(self) -> ValueType {
        self.attribute().value_type
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A closed set of recognized document keys.
///
/// Schemas are compile-time tables; [`Schema::LOOT`] is the one loot rules use.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    attributes: &'static [AttributeKey],
}

impl Schema {
    /// Schema for loot rule documents: every condition plus the item actions.
    pub const LOOT: Schema = Schema {
        attributes: &LOOT_ATTRIBUTES,
    };

    /// Look up a key by its document field name. Names are case-sensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static AttributeKey> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Whether the schema declares `key`.
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static AttributeKey> {
        self.attributes.iter()
    }

    /// Parse a document against this schema. Unknown fields are ignored.
    #[must_use]
    pub fn parse(&self, document: &Document) -> AttributeMap {
        AttributeMap::parse(self, document)
    }
}
