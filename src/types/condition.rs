use rand::Rng;

use super::attribute_map::AttributeMap;
use super::query::{Difficulty, EventQuery, TempCategory, Weather};
use super::report::MatchReport;
use super::schema::Key;

/// Optional inclusive lower and upper bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Whether `value` satisfies every bound that is set.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// A single compiled condition, checked against event facts.
///
/// Produced from an [`AttributeMap`] once per rule; see [`ConditionEvaluator`].
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Time of day in `[0, 24000)`. When both bounds are set and `min > max`
    /// the window wraps past midnight.
    Time(Bounds<i64>),
    Light(Bounds<i64>),
    Height(Bounds<i64>),
    LocalDifficulty(Bounds<f64>),
    SpawnDistance(Bounds<f64>),
    /// Passes when a fresh draw in `[0, 1)` is below the probability.
    Random(f64),
    InBuilding(bool),
    InCity(bool),
    InStreet(bool),
    InSphere(bool),
    /// The responsible player has unlocked this progression stage.
    GameStage(String),
    Passive(bool),
    Hostile(bool),
    SeeSky(bool),
    Weather(Weather),
    Temperature(TempCategory),
    Difficulty(Difficulty),
    Structure(String),
    Player(bool),
    RealPlayer(bool),
    FakePlayer(bool),
    Projectile(bool),
    Explosion(bool),
    Fire(bool),
    Magic(bool),
    Mob(Vec<String>),
    Mod(Vec<String>),
    Block(Vec<String>),
    Biome(Vec<String>),
    BiomeType(Vec<String>),
    Dimension(Vec<String>),
    Source(Vec<String>),
    HeldItem(Vec<String>),
    /// A condition whose configured value was not understood. Never passes.
    Never(Key),
}

impl Condition {
    /// The document key this condition was compiled from. Range conditions
    /// report their lower-bound key when it is set.
    #[must_use]
    pub fn key(&self) -> Key {
        fn range<T>(bounds: &Bounds<T>, min: Key, max: Key) -> Key {
            if bounds.min.is_some() { min } else { max }
        }

        match self {
            Condition::Time(b) => range(b, Key::MinTime, Key::MaxTime),
            Condition::Light(b) => range(b, Key::MinLight, Key::MaxLight),
            Condition::Height(b) => range(b, Key::MinHeight, Key::MaxHeight),
            Condition::LocalDifficulty(b) => range(b, Key::MinDifficulty, Key::MaxDifficulty),
            Condition::SpawnDistance(b) => range(b, Key::MinSpawnDist, Key::MaxSpawnDist),
            Condition::Random(_) => Key::Random,
            Condition::InBuilding(_) => Key::InBuilding,
            Condition::InCity(_) => Key::InCity,
            Condition::InStreet(_) => Key::InStreet,
            Condition::InSphere(_) => Key::InSphere,
            Condition::GameStage(_) => Key::GameStage,
            Condition::Passive(_) => Key::Passive,
            Condition::Hostile(_) => Key::Hostile,
            Condition::SeeSky(_) => Key::SeeSky,
            Condition::Weather(_) => Key::Weather,
            Condition::Temperature(_) => Key::TempCategory,
            Condition::Difficulty(_) => Key::Difficulty,
            Condition::Structure(_) => Key::Structure,
            Condition::Player(_) => Key::Player,
            Condition::RealPlayer(_) => Key::RealPlayer,
            Condition::FakePlayer(_) => Key::FakePlayer,
            Condition::Projectile(_) => Key::Projectile,
            Condition::Explosion(_) => Key::Explosion,
            Condition::Fire(_) => Key::Fire,
            Condition::Magic(_) => Key::Magic,
            Condition::Mob(_) => Key::Mob,
            Condition::Mod(_) => Key::Mod,
            Condition::Block(_) => Key::Block,
            Condition::Biome(_) => Key::Biome,
            Condition::BiomeType(_) => Key::BiomeType,
            Condition::Dimension(_) => Key::Dimension,
            Condition::Source(_) => Key::Source,
            Condition::HeldItem(_) => Key::HeldItem,
            Condition::Never(key) => *key,
        }
    }
}

/// Evaluates every condition declared in an [`AttributeMap`] against an event.
///
/// Conditions are compiled once, in a fixed category order, and combined with
/// AND: the first failing condition ends the check. A map without conditions
/// matches every event.
#[derive(Debug, Clone)]
pub struct ConditionEvaluator {
    attributes: AttributeMap,
    conditions: Vec<Condition>,
}

impl ConditionEvaluator {
    #[must_use]
    pub fn new(attributes: AttributeMap) -> Self {
        let conditions = crate::compile::compile(&attributes);
        Self {
            attributes,
            conditions,
        }
    }

    /// Whether `event` satisfies every present condition.
    ///
    /// `rng` is only drawn from by a `random` condition.
    pub fn matches<E, Q, R>(&self, event: &E, query: &Q, rng: &mut R) -> bool
    where
        E: ?Sized,
        Q: EventQuery<E> + ?Sized,
        R: Rng + ?Sized,
    {
        crate::evaluate::evaluate(&self.conditions, event, query, rng)
    }

    /// Like [`matches`](Self::matches), but reports which condition failed.
    pub fn matches_detailed<E, Q, R>(&self, event: &E, query: &Q, rng: &mut R) -> MatchReport
    where
        E: ?Sized,
        Q: EventQuery<E> + ?Sized,
        R: Rng + ?Sized,
    {
        crate::evaluate::evaluate_detailed(&self.conditions, event, query, rng)
    }

    /// Compiled conditions in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The attribute map the conditions were compiled from.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}
