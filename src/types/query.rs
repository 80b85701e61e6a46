//! Capabilities a hosting game exposes so rule conditions can read event facts.
//!
//! The engine never owns worlds, entities or damage sources. A host implements
//! [`World`], [`Entity`] and [`DamageSource`] over its own handles, and one
//! [`EventQuery`] per event kind that locates them inside an event.

use std::fmt;

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position one block lower. Stays put at the bottom of the coordinate range.
    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y.saturating_sub(1), self.z)
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: BlockPos) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// World difficulty setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Peaceful,
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Parse a rule document name (`"peaceful"`, `"easy"`, `"normal"`, `"hard"`), ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "peaceful" => Some(Self::Peaceful),
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Coarse biome temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempCategory {
    Cold,
    Medium,
    Warm,
}

impl TempCategory {
    /// Parse a rule document name (`"cold"`, `"medium"`, `"warm"`), ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cold" => Some(Self::Cold),
            "medium" => Some(Self::Medium),
            "warm" => Some(Self::Warm),
            _ => None,
        }
    }
}

/// Weather states a rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Rain,
    Thunder,
}

impl Weather {
    /// Parse a rule document name (`"rain"`, `"thunder"`), ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rain" => Some(Self::Rain),
            "thunder" => Some(Self::Thunder),
            _ => None,
        }
    }
}

/// Biome facts at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Biome {
    /// Registry name, e.g. `minecraft:plains`.
    pub id: String,
    /// Dictionary types such as `FOREST` or `HOT`.
    pub types: Vec<String>,
    pub temperature: TempCategory,
}

/// Where a position sits inside a generated settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    pub in_building: bool,
    pub in_city: bool,
    pub in_street: bool,
    pub in_sphere: bool,
}

/// Read access to the world an event happened in.
pub trait World {
    /// Absolute world time in ticks. Rules compare `time % 24000`.
    fn world_time(&self) -> i64;

    fn light_level(&self, pos: BlockPos) -> i32;

    /// Regional difficulty at `pos`.
    fn local_difficulty(&self, pos: BlockPos) -> f64;

    fn spawn_point(&self) -> BlockPos;

    fn is_raining(&self) -> bool;

    fn is_thundering(&self) -> bool;

    fn difficulty(&self) -> Difficulty;

    fn can_see_sky(&self, pos: BlockPos) -> bool;

    /// Dimension identifier, e.g. `"0"` or `"minecraft:the_nether"`.
    fn dimension(&self) -> &str;

    fn biome(&self, pos: BlockPos) -> &Biome;

    /// Registry name of the block at `pos`.
    fn block_id(&self, pos: BlockPos) -> &str;

    /// Whether `pos` lies inside a generated structure named `name`.
    fn is_in_structure(&self, name: &str, pos: BlockPos) -> bool;

    /// Settlement membership at `pos`. Worlds without settlements report nothing.
    fn settlement(&self, _pos: BlockPos) -> Settlement {
        Settlement::default()
    }
}

/// Read access to a living entity.
pub trait Entity {
    /// Registry name, e.g. `minecraft:zombie`.
    fn type_id(&self) -> &str;

    fn is_player(&self) -> bool;

    /// Automated players (machines acting as players) report `true` here and in
    /// [`is_player`](Self::is_player).
    fn is_fake_player(&self) -> bool {
        false
    }

    fn is_passive(&self) -> bool;

    fn is_hostile(&self) -> bool;

    /// Registry name of the item in the main hand.
    fn held_item(&self) -> Option<&str>;

    /// Progression stages only apply to players.
    fn has_game_stage(&self, _stage: &str) -> bool {
        false
    }
}

/// What caused an entity's death.
pub trait DamageSource {
    /// Damage type name, e.g. `"lava"` or `"arrow"`.
    fn id(&self) -> &str;

    fn is_projectile(&self) -> bool;

    fn is_explosion(&self) -> bool;

    fn is_fire(&self) -> bool;

    fn is_magic(&self) -> bool;
}

/// Extracts condition facts from one kind of event.
///
/// Each supported event kind gets exactly one implementation. Conditions only
/// ever see an event through this trait.
pub trait EventQuery<E: ?Sized> {
    type World: World + ?Sized;
    type Entity: Entity + ?Sized;
    type Source: DamageSource + ?Sized;

    fn world<'e>(&self, event: &'e E) -> &'e Self::World;

    fn pos(&self, event: &E) -> BlockPos;

    /// Vertical coordinate used by height conditions.
    fn y(&self, event: &E) -> i32 {
        self.pos(event).y
    }

    /// The entity the event is about, e.g. the one that died.
    fn entity<'e>(&self, event: &'e E) -> &'e Self::Entity;

    fn source<'e>(&self, event: &'e E) -> Option<&'e Self::Source>;

    /// The entity ultimately responsible, if any.
    fn attacker<'e>(&self, event: &'e E) -> Option<&'e Self::Entity>;
}
