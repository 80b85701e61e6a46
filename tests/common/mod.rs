//! Fakes and a diagnostic recorder shared by unit tests, integration tests and benches.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use droprule::{
    Biome, BlockPos, DamageSource, Difficulty, Entity, EventQuery, ItemCatalog, Settlement,
    TempCategory, World,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

// --- Diagnostics ---

/// A `warn` or `error` event recorded while running a closure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<Diagnostic>>>,
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level > Level::WARN {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Diagnostic {
            level,
            message: visitor.0,
        });
    }
}

/// Run `f` with a thread-local subscriber and return its warnings and errors.
pub fn capture_diagnostics<T>(f: impl FnOnce() -> T) -> (T, Vec<Diagnostic>) {
    let recorder = Recorder::default();
    let events = Arc::clone(&recorder.events);
    let subscriber = tracing_subscriber::registry().with(recorder);
    let out = tracing::subscriber::with_default(subscriber, f);
    let diagnostics = events.lock().unwrap().clone();
    (out, diagnostics)
}

// --- Items ---

pub fn catalog() -> ItemCatalog {
    [
        "minecraft:stone",
        "minecraft:dirt",
        "minecraft:bone",
        "minecraft:diamond",
        "minecraft:rotten_flesh",
    ]
    .into_iter()
    .collect()
}

// --- World ---

#[derive(Debug, Clone)]
pub struct FakeWorld {
    pub time: i64,
    pub light: i32,
    pub local_difficulty: f64,
    pub spawn: BlockPos,
    pub raining: bool,
    pub thundering: bool,
    pub difficulty: Difficulty,
    pub sky: bool,
    pub dimension: String,
    pub biome: Biome,
    pub block_below: String,
    pub structures: Vec<String>,
    pub settlement: Settlement,
}

impl Default for FakeWorld {
    fn default() -> Self {
        Self {
            time: 6000,
            light: 15,
            local_difficulty: 1.5,
            spawn: BlockPos::new(0, 64, 0),
            raining: false,
            thundering: false,
            difficulty: Difficulty::Normal,
            sky: true,
            dimension: "minecraft:overworld".into(),
            biome: Biome {
                id: "minecraft:plains".into(),
                types: vec!["PLAINS".into()],
                temperature: TempCategory::Medium,
            },
            block_below: "minecraft:grass".into(),
            structures: Vec::new(),
            settlement: Settlement::default(),
        }
    }
}

impl World for FakeWorld {
    fn world_time(&self) -> i64 {
        self.time
    }

    fn light_level(&self, _pos: BlockPos) -> i32 {
        self.light
    }

    fn local_difficulty(&self, _pos: BlockPos) -> f64 {
        self.local_difficulty
    }

    fn spawn_point(&self) -> BlockPos {
        self.spawn
    }

    fn is_raining(&self) -> bool {
        self.raining
    }

    fn is_thundering(&self) -> bool {
        self.thundering
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn can_see_sky(&self, _pos: BlockPos) -> bool {
        self.sky
    }

    fn dimension(&self) -> &str {
        &self.dimension
    }

    fn biome(&self, _pos: BlockPos) -> &Biome {
        &self.biome
    }

    fn block_id(&self, _pos: BlockPos) -> &str {
        &self.block_below
    }

    fn is_in_structure(&self, name: &str, _pos: BlockPos) -> bool {
        self.structures.iter().any(|s| s == name)
    }

    fn settlement(&self, _pos: BlockPos) -> Settlement {
        self.settlement
    }
}

// --- Entities and damage ---

#[derive(Debug, Clone, Default)]
pub struct FakeMob {
    pub type_id: String,
    pub player: bool,
    pub fake: bool,
    pub passive: bool,
    pub hostile: bool,
    pub held: Option<String>,
    pub stages: Vec<String>,
}

impl FakeMob {
    pub fn zombie() -> Self {
        Self {
            type_id: "minecraft:zombie".into(),
            hostile: true,
            ..Self::default()
        }
    }

    pub fn player() -> Self {
        Self {
            type_id: "minecraft:player".into(),
            player: true,
            ..Self::default()
        }
    }

    pub fn holding(mut self, item: &str) -> Self {
        self.held = Some(item.to_owned());
        self
    }
}

impl Entity for FakeMob {
    fn type_id(&self) -> &str {
        &self.type_id
    }

    fn is_player(&self) -> bool {
        self.player
    }

    fn is_fake_player(&self) -> bool {
        self.fake
    }

    fn is_passive(&self) -> bool {
        self.passive
    }

    fn is_hostile(&self) -> bool {
        self.hostile
    }

    fn held_item(&self) -> Option<&str> {
        self.held.as_deref()
    }

    fn has_game_stage(&self, stage: &str) -> bool {
        self.stages.iter().any(|s| s == stage)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeHit {
    pub id: String,
    pub projectile: bool,
    pub explosion: bool,
    pub fire: bool,
    pub magic: bool,
}

impl FakeHit {
    pub fn arrow() -> Self {
        Self {
            id: "arrow".into(),
            projectile: true,
            ..Self::default()
        }
    }

    pub fn lava() -> Self {
        Self {
            id: "lava".into(),
            fire: true,
            ..Self::default()
        }
    }
}

impl DamageSource for FakeHit {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_projectile(&self) -> bool {
        self.projectile
    }

    fn is_explosion(&self) -> bool {
        self.explosion
    }

    fn is_fire(&self) -> bool {
        self.fire
    }

    fn is_magic(&self) -> bool {
        self.magic
    }
}

// --- Events ---

/// A mob death: who died, where, how, and who is responsible.
#[derive(Debug, Clone)]
pub struct DropEvent {
    pub world: FakeWorld,
    pub pos: BlockPos,
    pub entity: FakeMob,
    pub source: Option<FakeHit>,
    pub attacker: Option<FakeMob>,
}

impl Default for DropEvent {
    fn default() -> Self {
        Self {
            world: FakeWorld::default(),
            pos: BlockPos::new(10, 64, 0),
            entity: FakeMob::zombie(),
            source: None,
            attacker: None,
        }
    }
}

pub struct DropQuery;

impl EventQuery<DropEvent> for DropQuery {
    type World = FakeWorld;
    type Entity = FakeMob;
    type Source = FakeHit;

    fn world<'e>(&self, event: &'e DropEvent) -> &'e FakeWorld {
        &event.world
    }

    fn pos(&self, event: &DropEvent) -> BlockPos {
        event.pos
    }

    fn entity<'e>(&self, event: &'e DropEvent) -> &'e FakeMob {
        &event.entity
    }

    fn source<'e>(&self, event: &'e DropEvent) -> Option<&'e FakeHit> {
        event.source.as_ref()
    }

    fn attacker<'e>(&self, event: &'e DropEvent) -> Option<&'e FakeMob> {
        event.attacker.as_ref()
    }
}
