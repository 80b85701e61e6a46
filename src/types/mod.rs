mod attribute_map;
mod condition;
mod count;
mod document;
mod error;
mod item;
mod query;
mod report;
mod rule;
mod schema;
mod value;

pub use attribute_map::{AttributeMap, AttributeMapBuilder};
pub use condition::{Bounds, Condition, ConditionEvaluator};
pub use count::{CountRange, CountResolver};
pub use document::Document;
pub use error::{DocumentError, TagParseError};
pub use item::{ItemCatalog, ItemDescriptor, ItemRegistry, JsonTagParser, LootEntry, Tag, TagParser};
pub use query::{
    Biome, BlockPos, DamageSource, Difficulty, Entity, EventQuery, Settlement, TempCategory,
    Weather, World,
};
pub use report::MatchReport;
pub use rule::LootRule;
pub use schema::{AttributeKey, Cardinality, Key, Schema, ValueType, LOOT_ATTRIBUTES};
pub use value::Value;
