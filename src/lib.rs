//! Declarative loot-drop rules.
//!
//! A [`LootRule`] is built once from a JSON [`Document`]: condition keys become
//! an ordered list of [`Condition`]s and item keys become [`LootEntry`] lists.
//! Hosts then call [`LootRule::matches`] for each drop event through an
//! [`EventQuery`] and apply the rule's actions themselves.
//!
//! Configuration mistakes never abort a rule. They are reported as `tracing`
//! events and the offending piece degrades to a safe default.

mod actions;
mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;

#[cfg(test)]
extern crate self as droprule;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_support;

pub use error::Error;
pub use types::{
    AttributeKey, AttributeMap, AttributeMapBuilder, Biome, BlockPos, Bounds, Cardinality,
    Condition, ConditionEvaluator, CountRange, CountResolver, DamageSource, Difficulty, Document,
    DocumentError, Entity, EventQuery, ItemCatalog, ItemDescriptor, ItemRegistry, JsonTagParser,
    Key, LootEntry, LootRule, MatchReport, Schema, Settlement, Tag, TagParseError, TagParser,
    TempCategory, Value, ValueType, Weather, World, LOOT_ATTRIBUTES,
};
